//! Webhook types and API.

use crate::error::RestError;
use crate::model::webex_id_to_uuid;
use crate::rest::RestSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The event type a webhook fires on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WebHookEvent {
    Created,
    Updated,
    Deleted,
    Started,
    Ended,
    Joined,
    Left,
    All,
}

/// The resource type a webhook watches.
///
/// Creating a webhook requires `read` scope on the resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WebHookResource {
    #[serde(rename = "attachmentActions")]
    AttachmentActions,
    #[serde(rename = "memberships")]
    Memberships,
    #[serde(rename = "messages")]
    Messages,
    #[serde(rename = "rooms")]
    Rooms,
    #[serde(rename = "telephony_calls")]
    TelephonyCalls,
    #[serde(rename = "telephony_mwi")]
    TelephonyMwi,
    #[serde(rename = "meetings")]
    Meetings,
    #[serde(rename = "recordings")]
    Recordings,
    #[serde(rename = "meetingParticipants")]
    MeetingParticipants,
    #[serde(rename = "meetingTranscripts")]
    MeetingTranscripts,
}

/// Body of a webhook create request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebHookCreate {
    /// A user-friendly name for the webhook.
    pub name: String,
    /// The URL that receives POST requests for each event.
    pub target_url: String,
    /// The resource type for the webhook.
    pub resource: WebHookResource,
    /// The event type for the webhook.
    pub event: WebHookEvent,
    /// The filter that defines the webhook scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// The secret used to generate payload signatures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Set when creating an org/admin level webhook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
}

/// A webhook subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebHook {
    /// The unique identifier for the webhook.
    #[serde(rename = "id")]
    pub webhook_id: String,
    /// A user-friendly name for the webhook.
    pub name: String,
    /// The URL that receives POST requests for each event.
    pub target_url: String,
    /// The resource type for the webhook.
    pub resource: WebHookResource,
    /// The event type for the webhook.
    pub event: WebHookEvent,
    /// The filter that defines the webhook scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// The secret used to generate payload signatures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// The status of the webhook; `active` re-enables a disabled webhook.
    pub status: String,
    /// The date and time the webhook was created.
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
}

impl WebHook {
    /// Webhook id in bare UUID format.
    pub fn webhook_id_uuid(&self) -> Option<String> {
        webex_id_to_uuid(&self.webhook_id)
    }

    /// App id in bare UUID format.
    pub fn app_id_uuid(&self) -> Option<String> {
        self.app_id.as_deref().and_then(webex_id_to_uuid)
    }
}

/// Webhook management API.
#[derive(Clone)]
pub struct WebhookApi {
    session: Arc<RestSession>,
}

impl WebhookApi {
    pub(crate) fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    fn ep(&self, path: &str) -> String {
        if path.is_empty() {
            self.session.ep("webhooks")
        } else {
            self.session.ep(&format!("webhooks/{path}"))
        }
    }

    /// List all webhooks of the authenticated user.
    pub async fn list(&self) -> Result<Vec<WebHook>, RestError> {
        self.session.follow_pagination(&self.ep(""), &[]).await
    }

    /// Details for a webhook, by id.
    pub async fn details(&self, webhook_id: &str) -> Result<WebHook, RestError> {
        self.session.rest_get(&self.ep(webhook_id), &[]).await?.json()
    }

    /// Create a webhook; returns the created subscription.
    pub async fn create(&self, settings: &WebHookCreate) -> Result<WebHook, RestError> {
        let body = serde_json::to_value(settings).map_err(RestError::Json)?;
        self.session.rest_post(&self.ep(""), Some(&body)).await?.json()
    }

    /// Delete a webhook, by id.
    pub async fn delete(&self, webhook_id: &str) -> Result<(), RestError> {
        self.session.rest_delete(&self.ep(webhook_id)).await
    }
}
