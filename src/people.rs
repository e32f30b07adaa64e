//! People types and API.

use crate::error::RestError;
use crate::model::{to_camel, webex_id_to_uuid};
use crate::rest::RestSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Phone number type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhoneNumberType {
    Work,
    Mobile,
    Fax,
    WorkExtension,
}

/// Phone number: type and value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhoneNumber {
    #[serde(rename = "type")]
    pub number_type: PhoneNumberType,
    pub value: String,
}

/// SIP address type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SipType {
    #[serde(rename = "enterprise")]
    Enterprise,
    #[serde(rename = "cloud-calling")]
    CloudCalling,
    #[serde(rename = "personal-room")]
    PersonalRoom,
    #[serde(rename = "unknown")]
    Unknown,
}

/// SIP address: type, value and primary indication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SipAddress {
    #[serde(rename = "type")]
    pub sip_type: SipType,
    pub value: String,
    pub primary: bool,
}

/// Presence status of a person.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PeopleStatus {
    /// Active within the last 10 minutes.
    #[serde(rename = "active")]
    Active,
    /// The user is in a call.
    #[serde(rename = "call")]
    Call,
    /// The user has manually set their status to "Do Not Disturb".
    #[serde(rename = "DoNotDisturb")]
    DoNotDisturb,
    /// Last activity occurred more than 10 minutes ago.
    #[serde(rename = "inactive")]
    Inactive,
    /// The user is in a meeting.
    #[serde(rename = "meeting")]
    Meeting,
    /// The user or a Hybrid Calendar service has indicated "Out of Office".
    #[serde(rename = "OutOfOffice")]
    OutOfOffice,
    /// The user has never logged in; a status cannot be determined.
    #[serde(rename = "pending")]
    Pending,
    /// The user is sharing content.
    #[serde(rename = "presenting")]
    Presenting,
    /// The user's status could not be determined.
    #[serde(rename = "unknown")]
    Unknown,
}

/// Account type of a person.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PersonType {
    /// Account belongs to a person.
    #[serde(rename = "person")]
    Person,
    /// Account is a bot user.
    #[serde(rename = "bot")]
    Bot,
    /// Account is a guest user.
    #[serde(rename = "appuser")]
    AppUser,
}

/// A person on the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// A unique identifier for the person.
    #[serde(rename = "id")]
    pub person_id: String,
    /// The email addresses of the person.
    pub emails: Vec<String>,
    /// Phone numbers for the person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<Vec<PhoneNumber>>,
    /// The calling extension for the person; only with a calling license.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// The ID of the location for this person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    /// The full name of the person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// The nickname of the person, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    /// The first name of the person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// The last name of the person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// The URL to the person's avatar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// The ID of the organization to which this person belongs.
    pub org_id: String,
    /// Role ids assigned to this person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// License ids allocated to this person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<String>>,
    /// The date and time the person was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// The date and time the person was last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// The time zone of the person, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// The date and time of the person's last activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<String>,
    /// Site names where this user has a role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_urls: Option<Vec<String>>,
    /// The user's SIP addresses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sip_addresses: Option<Vec<SipAddress>>,
    /// Current presence status; only within the caller's organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PeopleStatus>,
    /// Whether an invite is pending for account activation; admin only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_pending: Option<bool>,
    /// Whether the user is allowed to log in; admin only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_enabled: Option<bool>,
    /// The type of account, such as person or bot.
    #[serde(rename = "type")]
    pub person_type: PersonType,
}

impl Person {
    /// Person id in bare UUID format.
    pub fn person_id_uuid(&self) -> Option<String> {
        webex_id_to_uuid(&self.person_id)
    }
}

/// Filters for [`PeopleApi::list`].
#[derive(Debug, Clone, Default)]
pub struct PeopleListQuery {
    /// List people with this email address.
    pub email: Option<String>,
    /// List people whose name starts with this string.
    pub display_name: Option<String>,
    /// List people by id; up to 85 ids.
    pub id_list: Vec<String>,
    /// List people in this organization; partner admins only.
    pub org_id: Option<String>,
    /// Include calling user details in the response.
    pub calling_data: bool,
    /// List people present in this location.
    pub location_id: Option<String>,
}

// ---------------------------------------------------------------------------
// API
// ---------------------------------------------------------------------------

/// Fields a PUT on a person may carry; everything else is read-only.
const PERSON_UPDATABLE: &[&str] = &[
    "emails",
    "phoneNumbers",
    "extension",
    "locationId",
    "displayName",
    "firstName",
    "lastName",
    "nickName",
    "avatar",
    "orgId",
    "roles",
    "licenses",
    "siteUrls",
    "loginEnabled",
];

/// People API.
#[derive(Clone)]
pub struct PeopleApi {
    session: Arc<RestSession>,
}

impl PeopleApi {
    pub(crate) fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    fn ep(&self, path: &str) -> String {
        if path.is_empty() {
            self.session.ep("people")
        } else {
            self.session.ep(&format!("people/{path}"))
        }
    }

    /// List people in the organization.
    ///
    /// For most users either `email` or `display_name` is required; admin
    /// users can omit both and list the whole organization.
    pub async fn list(&self, query: &PeopleListQuery) -> Result<Vec<Person>, RestError> {
        let mut params: Vec<(String, String)> = Vec::new();
        for (name, value) in [
            ("email", &query.email),
            ("display_name", &query.display_name),
            ("org_id", &query.org_id),
            ("location_id", &query.location_id),
        ] {
            if let Some(value) = value {
                params.push((to_camel(name), value.clone()));
            }
        }
        if query.calling_data {
            params.push(("callingData".to_string(), "true".to_string()));
        }
        if !query.id_list.is_empty() {
            params.push(("id".to_string(), query.id_list.join(",")));
        }
        self.session.follow_pagination(&self.ep(""), &params).await
    }

    /// Details for a person, by id.
    pub async fn details(&self, person_id: &str, calling_data: bool) -> Result<Person, RestError> {
        let params = calling_data_params(calling_data);
        self.session.rest_get(&self.ep(person_id), &params).await?.json()
    }

    /// Profile of the authenticated user.
    pub async fn me(&self, calling_data: bool) -> Result<Person, RestError> {
        let params = calling_data_params(calling_data);
        self.session.rest_get(&self.ep("me"), &params).await?.json()
    }

    /// Update a person, by id. Admin only.
    ///
    /// The endpoint expects all updatable fields present; fetch details
    /// first, mutate, then pass the result here. Read-only fields are
    /// stripped from the payload.
    pub async fn update_person(
        &self,
        person: &Person,
        calling_data: bool,
    ) -> Result<Person, RestError> {
        let mut value = serde_json::to_value(person).map_err(RestError::Json)?;
        if let Value::Object(map) = &mut value {
            map.retain(|key, _| PERSON_UPDATABLE.contains(&key.as_str()));
        }
        let params = calling_data_params(calling_data);
        self.session
            .rest_put(&self.ep(&person.person_id), &params, Some(&value))
            .await?
            .json()
    }

    /// Remove a person from the system. Admin only.
    pub async fn delete_person(&self, person_id: &str) -> Result<(), RestError> {
        self.session.rest_delete(&self.ep(person_id)).await
    }
}

fn calling_data_params(calling_data: bool) -> Vec<(String, String)> {
    if calling_data {
        vec![("callingData".to_string(), "true".to_string())]
    } else {
        Vec::new()
    }
}
