//! Location types and API.

use crate::error::RestError;
use crate::rest::RestSession;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Postal address of a location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocationAddress {
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country: String,
}

/// A location within the organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// A unique identifier for the location.
    #[serde(rename = "id")]
    pub location_id: String,
    /// The name of the location.
    pub name: String,
    /// The ID of the organization to which this location belongs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Time zone associated with this location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Default language for people at this location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    /// The address of the location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<LocationAddress>,
}

/// Locations API.
#[derive(Clone)]
pub struct LocationsApi {
    session: Arc<RestSession>,
}

impl LocationsApi {
    pub(crate) fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    fn ep(&self, path: &str) -> String {
        if path.is_empty() {
            self.session.ep("locations")
        } else {
            self.session.ep(&format!("locations/{path}"))
        }
    }

    /// List locations, optionally filtered by name or organization.
    pub async fn list(
        &self,
        name: Option<&str>,
        org_id: Option<&str>,
    ) -> Result<Vec<Location>, RestError> {
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(name) = name {
            params.push(("name".to_string(), name.to_string()));
        }
        if let Some(org_id) = org_id {
            params.push(("orgId".to_string(), org_id.to_string()));
        }
        self.session.follow_pagination(&self.ep(""), &params).await
    }

    /// Details for a location, by id.
    pub async fn details(&self, location_id: &str) -> Result<Location, RestError> {
        self.session.rest_get(&self.ep(location_id), &[]).await?.json()
    }
}
