//! Call control types and API.

use crate::error::RestError;
use crate::rest::RestSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Call type of a party.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Location,
    Organization,
    External,
    Emergency,
    Repair,
    Other,
}

/// A calling/called party of a call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TelephonyEventParty {
    /// The party's name; absent when unavailable or privacy is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The party's number; digits or a URI.
    pub number: String,
    /// The party's person id, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    /// The party's place id, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// Whether privacy is enabled for the name, number and ids.
    pub privacy_enabled: bool,
    /// The call type for the party.
    pub call_type: CallType,
}

/// Reason for a call redirection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RedirectReason {
    Busy,
    NoAnswer,
    Unavailable,
    Unconditional,
    TimeOfDay,
    Divert,
    FollowMe,
    HuntGroup,
    CallQueue,
    Unknown,
}

/// One redirection of an incoming call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Redirection {
    /// The reason the incoming call was redirected.
    pub reason: RedirectReason,
    /// The party who redirected the incoming call.
    pub redirecting_party: TelephonyEventParty,
}

/// Recall details of an incoming call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recall {
    /// The type of recall; currently only `park`.
    #[serde(rename = "type")]
    pub recall_type: String,
    /// Where the call was parked, when the type is `park`.
    pub party: TelephonyEventParty,
}

/// Recording state of a call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    Pending,
    Started,
    Paused,
    Stopped,
    Failed,
}

/// Role of an entity in a call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Personality {
    Originator,
    Terminator,
    ClickToDial,
}

/// Call state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CallState {
    Connecting,
    Alerting,
    Connected,
    Held,
    RemoteHeld,
    Disconnected,
}

/// A call as seen by the telephony API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TelephonyCall {
    // The telephony API names the call id "id" while events use "callId";
    // call_id() papers over the difference.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "callId", default, skip_serializing_if = "Option::is_none")]
    pub event_call_id: Option<String>,
    /// Identifier of the call session this call belongs to; correlates
    /// multiple calls of the same session.
    pub call_session_id: String,
    /// The personality of the call.
    pub personality: Personality,
    /// The current state of the call.
    pub state: CallState,
    /// The remote party's details.
    pub remote_party: TelephonyEventParty,
    /// Appearance value, used to order a user's calls across devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<i64>,
    /// The date and time the call was created.
    pub created: DateTime<Utc>,
    /// The date and time the call was answered, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answered: Option<DateTime<Utc>>,
    /// Previous redirections of the incoming call, most recent first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redirections: Vec<Redirection>,
    /// Recall details, when the incoming call is for a recall.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall: Option<Recall>,
    /// Current recording state, when recording was invoked on this call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_state: Option<RecordingState>,
    /// The date and time the call was disconnected, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disconnected: Option<DateTime<Utc>>,
}

impl TelephonyCall {
    /// The call identifier, from whichever field the source populated.
    pub fn call_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.event_call_id.as_deref())
    }
}

/// Payload of a `telephony_calls` webhook event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TelephonyEventData {
    #[serde(flatten)]
    pub call: TelephonyCall,
    pub event_type: String,
    pub event_timestamp: DateTime<Utc>,
}

/// A `telephony_calls` webhook event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TelephonyEvent {
    #[serde(rename = "id")]
    pub event_id: String,
    pub name: String,
    pub target_url: String,
    pub resource: String,
    pub event: String,
    pub org_id: String,
    pub created_by: String,
    pub app_id: String,
    pub owned_by: String,
    pub status: String,
    pub created: DateTime<Utc>,
    pub actor_id: String,
    pub data: TelephonyEventData,
}

/// Result of call initiation via [`CallsApi::dial`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DialResponse {
    pub call_id: String,
    pub call_session_id: String,
}

// ---------------------------------------------------------------------------
// API
// ---------------------------------------------------------------------------

/// Call control API.
#[derive(Clone)]
pub struct CallsApi {
    session: Arc<RestSession>,
}

impl CallsApi {
    pub(crate) fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    fn ep(&self, path: &str) -> String {
        if path.is_empty() {
            self.session.ep("telephony/calls")
        } else {
            self.session.ep(&format!("telephony/calls/{path}"))
        }
    }

    /// Initiate an outbound call to a destination (click to dial).
    ///
    /// Alerts on all devices belonging to the user; when the user answers on
    /// one of them, an outbound call is placed from that device.
    pub async fn dial(&self, destination: &str) -> Result<DialResponse, RestError> {
        let body = json!({ "destination": destination });
        self.session
            .rest_post(&self.ep("dial"), Some(&body))
            .await?
            .json()
    }

    /// Answer an incoming call on the user's primary device.
    pub async fn answer(&self, call_id: &str) -> Result<(), RestError> {
        let body = json!({ "callId": call_id });
        self.session.rest_post(&self.ep("answer"), Some(&body)).await?;
        Ok(())
    }

    /// Hang up a call. On an unanswered incoming call, the call is rejected
    /// and sent to busy.
    pub async fn hangup(&self, call_id: &str) -> Result<(), RestError> {
        let body = json!({ "callId": call_id });
        self.session.rest_post(&self.ep("hangup"), Some(&body)).await?;
        Ok(())
    }

    /// List details for all active calls of the user.
    pub async fn list_calls(&self) -> Result<Vec<TelephonyCall>, RestError> {
        self.session.follow_pagination(&self.ep(""), &[]).await
    }

    /// Details of one active call, by id.
    pub async fn call_details(&self, call_id: &str) -> Result<TelephonyCall, RestError> {
        self.session.rest_get(&self.ep(call_id), &[]).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{bind, spawn, MockResponse};
    use crate::tokens::Tokens;
    use serde_json::json;

    fn call_json(id_field: &str) -> serde_json::Value {
        json!({
            id_field: "c1",
            "callSessionId": "s1",
            "personality": "originator",
            "state": "connected",
            "remoteParty": {
                "number": "+12223334444",
                "privacyEnabled": false,
                "callType": "external"
            },
            "created": "2021-05-01T12:00:00.000Z"
        })
    }

    // The API uses "id" while events use "callId"; both resolve the same.
    #[test]
    fn call_id_resolves_either_alias() {
        let api_call: TelephonyCall = serde_json::from_value(call_json("id")).unwrap();
        assert_eq!(api_call.call_id(), Some("c1"));
        let event_call: TelephonyCall = serde_json::from_value(call_json("callId")).unwrap();
        assert_eq!(event_call.call_id(), Some("c1"));
        assert!(event_call.id.is_none());
    }

    #[test]
    fn decode_event_data_with_flattened_call() {
        let data: TelephonyEventData = serde_json::from_value(json!({
            "callId": "c1",
            "callSessionId": "s1",
            "personality": "terminator",
            "state": "alerting",
            "remoteParty": {
                "number": "1234",
                "privacyEnabled": false,
                "callType": "location"
            },
            "created": "2021-05-01T12:00:00.000Z",
            "eventType": "created",
            "eventTimestamp": "2021-05-01T12:00:01.000Z"
        }))
        .unwrap();
        assert_eq!(data.call.call_id(), Some("c1"));
        assert_eq!(data.event_type, "created");
        assert_eq!(data.call.state, CallState::Alerting);
    }

    #[tokio::test]
    async fn dial_posts_destination_and_parses_ids() {
        let (listener, base) = bind().await;
        let log = spawn(
            listener,
            vec![MockResponse::json(
                200,
                r#"{"callId":"c1","callSessionId":"s1"}"#,
            )],
        );

        let session = Arc::new(RestSession::with_base_url(
            Arc::new(Tokens::new("t")),
            &base,
        ));
        let calls = CallsApi::new(session);
        let dialed = calls.dial("+12223334444").await.unwrap();
        assert_eq!(dialed.call_id, "c1");
        assert_eq!(dialed.call_session_id, "s1");

        let recorded = log.lock().unwrap();
        assert_eq!(recorded[0].method, "POST");
        assert_eq!(recorded[0].path, "/telephony/calls/dial");
        let body: serde_json::Value = serde_json::from_str(&recorded[0].body).unwrap();
        assert_eq!(body, json!({"destination": "+12223334444"}));
    }

    #[tokio::test]
    async fn answer_posts_call_id() {
        let (listener, base) = bind().await;
        let log = spawn(listener, vec![MockResponse::json(204, "")]);

        let session = Arc::new(RestSession::with_base_url(
            Arc::new(Tokens::new("t")),
            &base,
        ));
        let calls = CallsApi::new(session);
        calls.answer("c1").await.unwrap();

        let recorded = log.lock().unwrap();
        assert_eq!(recorded[0].path, "/telephony/calls/answer");
        let body: serde_json::Value = serde_json::from_str(&recorded[0].body).unwrap();
        assert_eq!(body, json!({"callId": "c1"}));
    }
}
