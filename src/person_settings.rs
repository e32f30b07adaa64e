//! Per-person calling feature settings.
//!
//! Each feature lives under `people/{person_id}/features/...` and follows the
//! same read/configure pair: GET returns the full setting, PUT takes the
//! setting back with server-maintained fields stripped from the payload.

use crate::error::RestError;
use crate::rest::RestSession;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Barge in
// ---------------------------------------------------------------------------

/// Barge in settings of a person.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BargeSettings {
    /// Whether the barge in feature is enabled.
    pub enabled: bool,
    /// Play a stutter dial tone when someone barges in on an active call.
    pub tone_enabled: bool,
}

// ---------------------------------------------------------------------------
// Call forwarding
// ---------------------------------------------------------------------------

/// Forwarding settings shared by the busy and business continuity cases.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallForwardingCommon {
    /// Whether this forwarding case is enabled.
    pub enabled: bool,
    /// Destination for forwarded calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Send to voicemail when the destination is an internal number with
    /// voicemail enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_voicemail_enabled: Option<bool>,
}

/// Forwarding of all incoming calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallForwardingAlways {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_voicemail_enabled: Option<bool>,
    /// Play a brief tone on the person's phone when a call was forwarded.
    pub ring_reminder_enabled: bool,
}

/// Forwarding of unanswered calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallForwardingNoAnswer {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_voicemail_enabled: Option<bool>,
    /// Rings before the call is forwarded.
    pub number_of_rings: u32,
    /// System-wide ceiling for `number_of_rings`; read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_max_number_of_rings: Option<u32>,
}

impl Default for CallForwardingNoAnswer {
    fn default() -> Self {
        Self {
            enabled: false,
            destination: None,
            destination_voicemail_enabled: None,
            number_of_rings: 3,
            system_max_number_of_rings: None,
        }
    }
}

/// The three call forwarding cases.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallForwarding {
    pub always: CallForwardingAlways,
    pub busy: CallForwardingCommon,
    pub no_answer: CallForwardingNoAnswer,
}

/// A person's full call forwarding setting.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingSetting {
    pub call_forwarding: CallForwarding,
    /// Forwarding used when the person's phone is not connected to the
    /// network (outage, wiring, connectivity).
    pub business_continuity: CallForwardingCommon,
}

impl ForwardingSetting {
    /// JSON payload for a forwarding update.
    ///
    /// `systemMaxNumberOfRings` is server-maintained and rejected on PUT.
    pub fn update_payload(&self) -> Result<Value, RestError> {
        let mut value = serde_json::to_value(self).map_err(RestError::Json)?;
        if let Some(Value::Object(no_answer)) = value
            .get_mut("callForwarding")
            .and_then(|cf| cf.get_mut("noAnswer"))
        {
            no_answer.remove("systemMaxNumberOfRings");
        }
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Call intercept
// ---------------------------------------------------------------------------

/// How incoming calls are handled while intercept is active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterceptTypeIncoming {
    /// Incoming calls are routed as destination and voicemail specify.
    InterceptAll,
    /// Incoming calls are not intercepted.
    AllowAll,
}

/// Greeting played to intercepted callers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Greeting {
    /// An uploaded custom greeting.
    Custom,
    /// The system default message.
    Default,
}

/// A number announced to intercepted callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterceptNumber {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

/// Announcement settings for intercepted incoming calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterceptAnnouncements {
    pub greeting: Greeting,
    /// Filename of the custom greeting; empty when none was uploaded.
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Announcement of the new number.
    pub new_number: InterceptNumber,
    /// Handling when the caller presses zero.
    pub zero_transfer: InterceptNumber,
}

impl Default for InterceptAnnouncements {
    fn default() -> Self {
        Self {
            greeting: Greeting::Default,
            file_name: None,
            new_number: InterceptNumber::default(),
            zero_transfer: InterceptNumber::default(),
        }
    }
}

/// Incoming side of the intercept setting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterceptSettingIncoming {
    #[serde(rename = "type")]
    pub intercept_type: InterceptTypeIncoming,
    /// Route intercepted calls to the person's voicemail.
    pub voicemail_enabled: bool,
    pub announcements: InterceptAnnouncements,
}

impl Default for InterceptSettingIncoming {
    fn default() -> Self {
        Self {
            intercept_type: InterceptTypeIncoming::InterceptAll,
            voicemail_enabled: false,
            announcements: InterceptAnnouncements::default(),
        }
    }
}

/// How outgoing calls are handled while intercept is active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterceptTypeOutgoing {
    /// Outgoing calls are routed as destination and voicemail specify.
    InterceptAll,
    /// Only non-local calls are intercepted.
    AllowLocalOnly,
}

/// Outgoing side of the intercept setting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterceptSettingOutgoing {
    #[serde(rename = "type")]
    pub intercept_type: InterceptTypeOutgoing,
    /// Play a system message and transfer outbound calls to the destination.
    pub transfer_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl Default for InterceptSettingOutgoing {
    fn default() -> Self {
        Self {
            intercept_type: InterceptTypeOutgoing::InterceptAll,
            transfer_enabled: false,
            destination: None,
        }
    }
}

/// A person's call intercept setting.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterceptSetting {
    pub enabled: bool,
    pub incoming: InterceptSettingIncoming,
    pub outgoing: InterceptSettingOutgoing,
}

impl InterceptSetting {
    /// JSON payload for an intercept update.
    ///
    /// The greeting `fileName` is server-maintained and rejected on PUT.
    pub fn update_payload(&self) -> Result<Value, RestError> {
        let mut value = serde_json::to_value(self).map_err(RestError::Json)?;
        if let Some(Value::Object(announcements)) = value
            .get_mut("incoming")
            .and_then(|inc| inc.get_mut("announcements"))
        {
            announcements.remove("fileName");
        }
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Call recording
// ---------------------------------------------------------------------------

/// When calls are recorded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Record {
    /// All calls, no user control.
    #[serde(rename = "Always")]
    Always,
    /// No recording.
    #[serde(rename = "Never")]
    Never,
    /// All calls; the user can pause and resume, but not stop.
    #[serde(rename = "Always with Pause/Resume")]
    AlwaysWithPauseResume,
    /// Only after the user starts recording; pause, resume and stop work.
    #[serde(rename = "On Demand with User Initiated Start")]
    OnDemand,
}

/// Sound played when recording pauses or resumes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationType {
    #[serde(rename = "None")]
    None,
    #[serde(rename = "Beep")]
    Beep,
    #[serde(rename = "Play Announcement")]
    PlayAnnouncement,
}

/// Periodic warning beep while recording.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRepeat {
    /// Beep interval in seconds, 10 to 1800.
    pub interval: u32,
    pub enabled: bool,
}

/// Pause/resume notification setting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub enabled: bool,
}

/// A person's call recording setting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallRecordingSetting {
    pub enabled: bool,
    /// Scenarios under which calls are recorded.
    pub record: Record,
    /// Also record voicemail messages.
    pub record_voicemail_enabled: bool,
    /// Announce when recording starts and stops.
    pub start_stop_announcement_enabled: bool,
    pub notification: Notification,
    pub repeat: NotificationRepeat,
    /// Provider of the recording service; read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_provider: Option<String>,
    /// Provider-side group; read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_group: Option<String>,
    /// Provider-side person identifier; read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_identifier: Option<String>,
}

impl Default for CallRecordingSetting {
    fn default() -> Self {
        Self {
            enabled: false,
            record: Record::Never,
            record_voicemail_enabled: false,
            start_stop_announcement_enabled: false,
            notification: Notification {
                notification_type: NotificationType::None,
                enabled: false,
            },
            repeat: NotificationRepeat {
                interval: 15,
                enabled: false,
            },
            service_provider: None,
            external_group: None,
            external_identifier: None,
        }
    }
}

/// Provider fields the recording PUT must not carry.
const RECORDING_READ_ONLY: &[&str] = &["serviceProvider", "externalGroup", "externalIdentifier"];

impl CallRecordingSetting {
    /// JSON payload for a recording update, with the read-only provider
    /// fields stripped.
    pub fn update_payload(&self) -> Result<Value, RestError> {
        let mut value = serde_json::to_value(self).map_err(RestError::Json)?;
        if let Value::Object(map) = &mut value {
            for key in RECORDING_READ_ONLY {
                map.remove(*key);
            }
        }
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Caller id
// ---------------------------------------------------------------------------

/// Outgoing caller id source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallerIdSelectedType {
    /// The person's direct line number and/or extension.
    DirectLine,
    /// The location's main number.
    LocationNumber,
    /// The person's mobile number.
    MobileNumber,
    /// The value from the custom number field.
    Custom,
}

/// Whether the custom caller id number is internal or external.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomNumberType {
    Internal,
    External,
}

/// Details of the custom caller id number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomNumberInfo {
    #[serde(rename = "type")]
    pub custom_number_type: CustomNumberType,
    pub first_name: String,
    pub last_name: String,
}

/// Policy for the external caller id name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExternalCallerIdNamePolicy {
    /// The caller's direct line name.
    DirectLine,
    /// The location's site name.
    Location,
    /// The custom external caller id name.
    Other,
}

/// A person's caller id setting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallerId {
    /// Caller id types this person may select from.
    #[serde(rename = "types")]
    pub caller_id_types: Vec<CallerIdSelectedType>,
    /// The selected outgoing caller id type.
    pub selected: CallerIdSelectedType,
    /// Shown when `DIRECT_LINE` is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_number: Option<String>,
    /// Shown when `LOCATION_NUMBER` is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_number: Option<String>,
    /// Whether the location number is toll free.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toll_free_location_number: Option<bool>,
    /// Shown when `MOBILE_NUMBER` is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    /// Must be an assigned number from the person's location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_number_info: Option<CustomNumberInfo>,
    pub first_name: String,
    pub last_name: String,
    /// Block caller id on forwarded calls.
    pub block_in_forward_calls_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_caller_id_name_policy: Option<ExternalCallerIdNamePolicy>,
    /// Shown when the external caller id name policy is `OTHER`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_external_caller_id_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_external_caller_id_name: Option<String>,
}

/// Fields a caller id PUT may carry; everything else is read-only.
const CALLER_ID_CONFIGURABLE: &[&str] = &[
    "selected",
    "customNumber",
    "firstName",
    "lastName",
    "externalCallerIdNamePolicy",
    "customExternalCallerIdName",
];

impl CallerId {
    /// JSON payload for a caller id update: only the configurable subset.
    pub fn update_payload(&self) -> Result<Value, RestError> {
        let mut value = serde_json::to_value(self).map_err(RestError::Json)?;
        if let Value::Object(map) = &mut value {
            map.retain(|key, _| CALLER_ID_CONFIGURABLE.contains(&key.as_str()));
        }
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// API
// ---------------------------------------------------------------------------

/// Person settings API.
#[derive(Clone)]
pub struct PersonSettingsApi {
    session: Arc<RestSession>,
}

impl PersonSettingsApi {
    pub(crate) fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// Feature endpoint for a person: `people/{person_id}/features/{path}`.
    fn f_ep(&self, person_id: &str, path: &str) -> String {
        self.session.ep(&format!("people/{person_id}/features/{path}"))
    }

    /// Barge in settings of a person.
    pub async fn barge_read(
        &self,
        person_id: &str,
        org_id: Option<&str>,
    ) -> Result<BargeSettings, RestError> {
        let url = self.f_ep(person_id, "bargeIn");
        self.session.rest_get(&url, &org_params(org_id)).await?.json()
    }

    /// Configure a person's barge in settings.
    pub async fn barge_configure(
        &self,
        person_id: &str,
        settings: &BargeSettings,
        org_id: Option<&str>,
    ) -> Result<(), RestError> {
        let url = self.f_ep(person_id, "bargeIn");
        let body = serde_json::to_value(settings).map_err(RestError::Json)?;
        self.session
            .rest_put(&url, &org_params(org_id), Some(&body))
            .await?;
        Ok(())
    }

    /// Call forwarding settings of a person: always, busy, no answer and
    /// business continuity.
    pub async fn forwarding_read(
        &self,
        person_id: &str,
        org_id: Option<&str>,
    ) -> Result<ForwardingSetting, RestError> {
        let url = self.f_ep(person_id, "callForwarding");
        self.session.rest_get(&url, &org_params(org_id)).await?.json()
    }

    /// Configure a person's call forwarding settings.
    pub async fn forwarding_configure(
        &self,
        person_id: &str,
        forwarding: &ForwardingSetting,
        org_id: Option<&str>,
    ) -> Result<(), RestError> {
        let url = self.f_ep(person_id, "callForwarding");
        let body = forwarding.update_payload()?;
        self.session
            .rest_put(&url, &org_params(org_id), Some(&body))
            .await?;
        Ok(())
    }

    /// Call intercept settings of a person.
    pub async fn call_intercept_read(
        &self,
        person_id: &str,
        org_id: Option<&str>,
    ) -> Result<InterceptSetting, RestError> {
        let url = self.f_ep(person_id, "intercept");
        self.session.rest_get(&url, &org_params(org_id)).await?.json()
    }

    /// Configure a person's call intercept settings.
    pub async fn call_intercept_configure(
        &self,
        person_id: &str,
        intercept: &InterceptSetting,
        org_id: Option<&str>,
    ) -> Result<(), RestError> {
        let url = self.f_ep(person_id, "intercept");
        let body = intercept.update_payload()?;
        self.session
            .rest_put(&url, &org_params(org_id), Some(&body))
            .await?;
        Ok(())
    }

    /// Call recording settings of a person.
    pub async fn call_recording_read(
        &self,
        person_id: &str,
        org_id: Option<&str>,
    ) -> Result<CallRecordingSetting, RestError> {
        let url = self.f_ep(person_id, "callRecording");
        self.session.rest_get(&url, &org_params(org_id)).await?.json()
    }

    /// Configure a person's call recording settings.
    pub async fn call_recording_configure(
        &self,
        person_id: &str,
        recording: &CallRecordingSetting,
        org_id: Option<&str>,
    ) -> Result<(), RestError> {
        let url = self.f_ep(person_id, "callRecording");
        let body = recording.update_payload()?;
        self.session
            .rest_put(&url, &org_params(org_id), Some(&body))
            .await?;
        Ok(())
    }

    /// Caller id settings of a person.
    pub async fn caller_id_read(
        &self,
        person_id: &str,
        org_id: Option<&str>,
    ) -> Result<CallerId, RestError> {
        let url = self.f_ep(person_id, "callerId");
        self.session.rest_get(&url, &org_params(org_id)).await?.json()
    }

    /// Configure a person's caller id settings; only the configurable subset
    /// of `settings` is sent.
    pub async fn caller_id_configure(
        &self,
        person_id: &str,
        settings: &CallerId,
        org_id: Option<&str>,
    ) -> Result<(), RestError> {
        let url = self.f_ep(person_id, "callerId");
        let body = settings.update_payload()?;
        self.session
            .rest_put(&url, &org_params(org_id), Some(&body))
            .await?;
        Ok(())
    }
}

fn org_params(org_id: Option<&str>) -> Vec<(String, String)> {
    match org_id {
        Some(org_id) => vec![("orgId".to_string(), org_id.to_string())],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{bind, spawn, MockResponse};
    use crate::tokens::Tokens;
    use serde_json::json;

    #[test]
    fn forwarding_update_drops_system_max_rings() {
        let mut forwarding = ForwardingSetting::default();
        forwarding.call_forwarding.no_answer.system_max_number_of_rings = Some(20);
        forwarding.call_forwarding.no_answer.number_of_rings = 5;
        let payload = forwarding.update_payload().unwrap();
        let no_answer = &payload["callForwarding"]["noAnswer"];
        assert!(no_answer.get("systemMaxNumberOfRings").is_none());
        assert_eq!(no_answer["numberOfRings"], 5);
    }

    #[test]
    fn intercept_update_drops_greeting_file_name() {
        let mut intercept = InterceptSetting::default();
        intercept.incoming.announcements.file_name = Some("greeting.wav".to_string());
        let payload = intercept.update_payload().unwrap();
        let announcements = &payload["incoming"]["announcements"];
        assert!(announcements.get("fileName").is_none());
        assert_eq!(announcements["greeting"], "DEFAULT");
        // "type" is the wire name of the intercept type
        assert_eq!(payload["incoming"]["type"], "INTERCEPT_ALL");
    }

    #[test]
    fn recording_update_drops_provider_fields() {
        let recording = CallRecordingSetting {
            service_provider: Some("provider".to_string()),
            external_group: Some("group".to_string()),
            external_identifier: Some("ext-1".to_string()),
            ..CallRecordingSetting::default()
        };
        let payload = recording.update_payload().unwrap();
        for key in RECORDING_READ_ONLY {
            assert!(payload.get(*key).is_none(), "{key} must be stripped");
        }
        assert_eq!(payload["record"], "Never");
        assert_eq!(payload["repeat"]["interval"], 15);
    }

    #[test]
    fn recording_mode_wire_names() {
        assert_eq!(
            serde_json::to_value(Record::AlwaysWithPauseResume).unwrap(),
            json!("Always with Pause/Resume")
        );
        let record: Record =
            serde_json::from_value(json!("On Demand with User Initiated Start")).unwrap();
        assert_eq!(record, Record::OnDemand);
    }

    fn caller_id_json() -> Value {
        json!({
            "types": ["DIRECT_LINE", "LOCATION_NUMBER"],
            "selected": "DIRECT_LINE",
            "directNumber": "+12223334444",
            "locationNumber": "+12223330000",
            "firstName": "A",
            "lastName": "Person",
            "blockInForwardCallsEnabled": false,
            "externalCallerIdNamePolicy": "DIRECT_LINE"
        })
    }

    // The configure payload carries only the settable subset; display-only
    // fields like directNumber never go back to the server.
    #[test]
    fn caller_id_update_keeps_only_configurable_fields() {
        let caller_id: CallerId = serde_json::from_value(caller_id_json()).unwrap();
        let payload = caller_id.update_payload().unwrap();
        assert_eq!(payload["selected"], "DIRECT_LINE");
        assert_eq!(payload["firstName"], "A");
        assert_eq!(payload["externalCallerIdNamePolicy"], "DIRECT_LINE");
        assert!(payload.get("directNumber").is_none());
        assert!(payload.get("locationNumber").is_none());
        assert!(payload.get("types").is_none());
        assert!(payload.get("blockInForwardCallsEnabled").is_none());
    }

    #[tokio::test]
    async fn barge_read_hits_the_feature_endpoint() {
        let (listener, base) = bind().await;
        let log = spawn(
            listener,
            vec![MockResponse::json(
                200,
                r#"{"enabled":true,"toneEnabled":false}"#,
            )],
        );

        let session = Arc::new(RestSession::with_base_url(
            Arc::new(Tokens::new("t")),
            &base,
        ));
        let api = PersonSettingsApi::new(session);
        let barge = api.barge_read("p1", Some("org1")).await.unwrap();
        assert!(barge.enabled);
        assert!(!barge.tone_enabled);

        let recorded = log.lock().unwrap();
        assert_eq!(recorded[0].method, "GET");
        assert_eq!(recorded[0].path, "/people/p1/features/bargeIn?orgId=org1");
    }

    #[tokio::test]
    async fn forwarding_configure_puts_the_stripped_payload() {
        let (listener, base) = bind().await;
        let log = spawn(listener, vec![MockResponse::json(204, "")]);

        let session = Arc::new(RestSession::with_base_url(
            Arc::new(Tokens::new("t")),
            &base,
        ));
        let api = PersonSettingsApi::new(session);

        let mut forwarding = ForwardingSetting::default();
        forwarding.call_forwarding.always.enabled = true;
        forwarding.call_forwarding.always.destination = Some("1234".to_string());
        forwarding.call_forwarding.no_answer.system_max_number_of_rings = Some(20);
        api.forwarding_configure("p1", &forwarding, None).await.unwrap();

        let recorded = log.lock().unwrap();
        assert_eq!(recorded[0].method, "PUT");
        assert_eq!(recorded[0].path, "/people/p1/features/callForwarding");
        let sent: Value = serde_json::from_str(&recorded[0].body).unwrap();
        assert_eq!(sent["callForwarding"]["always"]["destination"], "1234");
        assert!(sent["callForwarding"]["noAnswer"]
            .get("systemMaxNumberOfRings")
            .is_none());
    }
}
