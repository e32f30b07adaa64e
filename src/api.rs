//! The client facade tying the API bindings together.

use crate::locations::LocationsApi;
use crate::people::PeopleApi;
use crate::person_settings::PersonSettingsApi;
use crate::rest::RestSession;
use crate::telephony::TelephonyApi;
use crate::tokens::{TokenProvider, Tokens};
use crate::webhook::WebhookApi;
use std::sync::Arc;

/// The top-level API client.
///
/// Bundles one shared [`RestSession`] with bindings for each resource. Clone
/// is cheap; all clones share the session, its HTTP connection pool and its
/// retry policy.
#[derive(Clone)]
pub struct WebexSimpleApi {
    session: Arc<RestSession>,
    /// People API.
    pub people: PeopleApi,
    /// Person settings API (barge, forwarding, intercept, recording,
    /// caller id).
    pub person_settings: PersonSettingsApi,
    /// Locations API.
    pub locations: LocationsApi,
    /// Webhook management API.
    pub webhook: WebhookApi,
    /// Telephony API (call control and schedules).
    pub telephony: TelephonyApi,
}

impl WebexSimpleApi {
    /// Client against the production API using a fixed set of tokens.
    pub fn new(tokens: Tokens) -> Self {
        Self::with_token_provider(Arc::new(tokens))
    }

    /// Client against the production API using a custom token source,
    /// for callers that refresh tokens themselves.
    pub fn with_token_provider(tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_session(RestSession::new(tokens))
    }

    /// Client over a pre-built session (alternate base URL, retry policy).
    pub fn with_session(session: RestSession) -> Self {
        let session = Arc::new(session);
        Self {
            people: PeopleApi::new(Arc::clone(&session)),
            person_settings: PersonSettingsApi::new(Arc::clone(&session)),
            locations: LocationsApi::new(Arc::clone(&session)),
            webhook: WebhookApi::new(Arc::clone(&session)),
            telephony: TelephonyApi::new(Arc::clone(&session)),
            session,
        }
    }

    /// The underlying REST session, for requests outside the typed surface.
    pub fn session(&self) -> &RestSession {
        &self.session
    }
}
