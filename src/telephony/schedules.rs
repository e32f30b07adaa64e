//! Location schedules and their events.
//!
//! Schedules live under a location and come in two flavors, business hours
//! and holidays. A schedule holds events; an event is renamed by setting its
//! write-only `new_name` field and pushing an update. Create and update calls
//! return the entity id, and a rename changes the id, so callers must adopt
//! the returned id instead of reusing the one they sent.

use crate::error::RestError;
use crate::model::Patch;
use crate::rest::{Body, RestSession};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The type of a schedule; also a path segment of schedule URLs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScheduleType {
    /// Business hours of a location.
    #[serde(rename = "businessHours")]
    BusinessHours,
    /// Holidays of a location.
    #[serde(rename = "holidays")]
    Holidays,
}

impl ScheduleType {
    /// Wire name, used both as the `type` attribute and in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BusinessHours => "businessHours",
            Self::Holidays => "holidays",
        }
    }
}

/// Month of a yearly recurrence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScheduleMonth {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl ScheduleMonth {
    /// Month for a 1-based month number; `None` outside 1..=12.
    pub fn from_month_number(month: u32) -> Option<Self> {
        use ScheduleMonth::*;
        Some(match month {
            1 => January,
            2 => February,
            3 => March,
            4 => April,
            5 => May,
            6 => June,
            7 => July,
            8 => August,
            9 => September,
            10 => October,
            11 => November,
            12 => December,
            _ => return None,
        })
    }
}

/// Weekly recurrence: one flag per weekday.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecurWeekly {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sunday: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub monday: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub tuesday: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wednesday: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub thursday: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub friday: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub saturday: bool,
}

impl RecurWeekly {
    /// Recurrence on a single weekday, given by its lowercase English name.
    pub fn single_day(day: &str) -> Option<Self> {
        let mut weekly = Self::default();
        match day {
            "sunday" => weekly.sunday = true,
            "monday" => weekly.monday = true,
            "tuesday" => weekly.tuesday = true,
            "wednesday" => weekly.wednesday = true,
            "thursday" => weekly.thursday = true,
            "friday" => weekly.friday = true,
            "saturday" => weekly.saturday = true,
            _ => return None,
        }
        Some(weekly)
    }

    /// Recurrence on weekdays (Monday through Friday).
    pub fn work_week() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            ..Self::default()
        }
    }
}

/// Yearly recurrence on a fixed date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecurYearlyByDate {
    /// Day of the month, 1..=31.
    pub day_of_month: u32,
    /// Month of the year.
    pub month: ScheduleMonth,
}

impl RecurYearlyByDate {
    /// Yearly recurrence on the month and day of a date.
    pub fn from_date(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            day_of_month: date.day(),
            // month() is always 1..=12, so the fallback is unreachable
            month: ScheduleMonth::from_month_number(date.month())
                .unwrap_or(ScheduleMonth::January),
        }
    }
}

/// Recurrence of a schedule event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    /// Recur indefinitely.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub recur_for_ever: Patch<bool>,
    /// Last date the event recurs on.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub recur_end_date: Patch<NaiveDate>,
    /// Weekly recurrence pattern.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub recur_weekly: Patch<RecurWeekly>,
    /// Yearly recurrence on a fixed date.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub recur_yearly_by_date: Patch<RecurYearlyByDate>,
}

/// One event within a schedule.
///
/// `name` identifies the event; to rename it, set `new_name` and push an
/// update. `new_name` is write-only: the server never returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// A unique identifier for the event; assigned by the server.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// The name of the event.
    pub name: String,
    /// New name for the event; only honored on update.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub new_name: Patch<String>,
    /// Whether the event spans whole days.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub all_day_enabled: Patch<bool>,
    /// The date the event starts.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub start_date: Patch<NaiveDate>,
    /// The date the event ends.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub end_date: Patch<NaiveDate>,
    /// Start time of the event, `HH:MM`; not set for all-day events.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub start_time: Patch<String>,
    /// End time of the event, `HH:MM`; not set for all-day events.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub end_time: Patch<String>,
    /// Recurrence of the event.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub recurrence: Patch<Recurrence>,
}

impl Event {
    /// JSON payload for an event update.
    ///
    /// Drops the server-assigned id (the URL carries it) and drops `newName`
    /// when it equals `name`, which the server rejects as a self-rename.
    pub fn update_payload(&self) -> Result<Value, RestError> {
        let mut value = serde_json::to_value(self).map_err(RestError::Json)?;
        if let Value::Object(map) = &mut value {
            map.remove("id");
            strip_noop_rename(map);
        }
        Ok(value)
    }
}

/// A schedule of a location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// The ID of the location owning this schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    /// A unique identifier for the schedule; assigned by the server.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<String>,
    /// The name of the schedule.
    pub name: String,
    /// The type of the schedule.
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    /// The events of the schedule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
}

impl Schedule {
    /// A business hours schedule with one event per workday,
    /// 09:00 to 17:00, recurring indefinitely.
    pub fn business(name: &str) -> Self {
        let events = [
            ("monday", RecurWeekly::single_day("monday")),
            ("tuesday", RecurWeekly::single_day("tuesday")),
            ("wednesday", RecurWeekly::single_day("wednesday")),
            ("thursday", RecurWeekly::single_day("thursday")),
            ("friday", RecurWeekly::single_day("friday")),
        ]
        .into_iter()
        .filter_map(|(day, weekly)| {
            let weekly = weekly?;
            Some(Event {
                name: day.to_string(),
                start_time: Patch::Value("09:00".to_string()),
                end_time: Patch::Value("17:00".to_string()),
                all_day_enabled: Patch::Value(false),
                recurrence: Patch::Value(Recurrence {
                    recur_for_ever: Patch::Value(true),
                    recur_weekly: Patch::Value(weekly),
                    ..Recurrence::default()
                }),
                ..Event::default()
            })
        })
        .collect();
        Self {
            location_id: None,
            schedule_id: None,
            name: name.to_string(),
            schedule_type: ScheduleType::BusinessHours,
            events,
        }
    }

    /// JSON payload for a schedule update.
    ///
    /// Strips the server-assigned schedule id and location id (the URL
    /// carries both), keeps event ids so the server can correlate events,
    /// and drops each event's `newName` when it equals the current name.
    pub fn update_payload(&self) -> Result<Value, RestError> {
        let mut value = serde_json::to_value(self).map_err(RestError::Json)?;
        if let Value::Object(map) = &mut value {
            map.remove("id");
            map.remove("locationId");
            if let Some(Value::Array(events)) = map.get_mut("events") {
                for event in events {
                    if let Value::Object(event) = event {
                        strip_noop_rename(event);
                    }
                }
            }
        }
        Ok(value)
    }
}

/// Remove `newName` from an event object when it equals `name`.
fn strip_noop_rename(event: &mut serde_json::Map<String, Value>) {
    if event.get("newName") == event.get("name") {
        event.remove("newName");
    }
}

// ---------------------------------------------------------------------------
// API
// ---------------------------------------------------------------------------

/// Schedule API, scoped to locations.
#[derive(Clone)]
pub struct ScheduleApi {
    session: Arc<RestSession>,
}

impl ScheduleApi {
    pub(crate) fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    fn ep(&self, location_id: &str, path: &str) -> String {
        let base = format!("telephony/config/locations/{location_id}/schedules");
        if path.is_empty() {
            self.session.ep(&base)
        } else {
            self.session.ep(&format!("{base}/{path}"))
        }
    }

    /// List schedules of a location, optionally filtered by type or name.
    pub async fn list(
        &self,
        location_id: &str,
        schedule_type: Option<ScheduleType>,
        name: Option<&str>,
    ) -> Result<Vec<Schedule>, RestError> {
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(schedule_type) = schedule_type {
            params.push(("type".to_string(), schedule_type.as_str().to_string()));
        }
        if let Some(name) = name {
            params.push(("name".to_string(), name.to_string()));
        }
        self.session
            .follow_pagination(&self.ep(location_id, ""), &params)
            .await
    }

    /// Details of a schedule, including its events.
    pub async fn details(
        &self,
        location_id: &str,
        schedule_type: ScheduleType,
        schedule_id: &str,
    ) -> Result<Schedule, RestError> {
        let url = self.ep(location_id, &format!("{}/{schedule_id}", schedule_type.as_str()));
        self.session.rest_get(&url, &[]).await?.json()
    }

    /// Create a schedule; returns the new schedule id.
    pub async fn create(&self, location_id: &str, schedule: &Schedule) -> Result<String, RestError> {
        let mut body = serde_json::to_value(schedule).map_err(RestError::Json)?;
        if let Value::Object(map) = &mut body {
            map.remove("id");
            map.remove("locationId");
        }
        let result = self
            .session
            .rest_post(&self.ep(location_id, ""), Some(&body))
            .await?;
        id_from_body(result)
    }

    /// Update a schedule.
    ///
    /// The update may rename the schedule or its events; returns the
    /// schedule's id after the update, which can differ from `schedule_id`.
    pub async fn update(
        &self,
        location_id: &str,
        schedule_id: &str,
        schedule: &Schedule,
    ) -> Result<String, RestError> {
        let url = self.ep(
            location_id,
            &format!("{}/{schedule_id}", schedule.schedule_type.as_str()),
        );
        let body = schedule.update_payload()?;
        let result = self.session.rest_put(&url, &[], Some(&body)).await?;
        id_from_body(result)
    }

    /// Delete a schedule, by type and id.
    pub async fn delete_schedule(
        &self,
        location_id: &str,
        schedule_type: ScheduleType,
        schedule_id: &str,
    ) -> Result<(), RestError> {
        let url = self.ep(location_id, &format!("{}/{schedule_id}", schedule_type.as_str()));
        self.session.rest_delete(&url).await
    }

    /// Details of one event of a schedule.
    pub async fn event_details(
        &self,
        location_id: &str,
        schedule_type: ScheduleType,
        schedule_id: &str,
        event_id: &str,
    ) -> Result<Event, RestError> {
        let url = self.ep(
            location_id,
            &format!("{}/{schedule_id}/events/{event_id}", schedule_type.as_str()),
        );
        self.session.rest_get(&url, &[]).await?.json()
    }

    /// Add an event to a schedule; returns the new event id.
    pub async fn event_create(
        &self,
        location_id: &str,
        schedule_type: ScheduleType,
        schedule_id: &str,
        event: &Event,
    ) -> Result<String, RestError> {
        let url = self.ep(
            location_id,
            &format!("{}/{schedule_id}/events", schedule_type.as_str()),
        );
        let mut body = serde_json::to_value(event).map_err(RestError::Json)?;
        if let Value::Object(map) = &mut body {
            map.remove("id");
        }
        let result = self.session.rest_post(&url, Some(&body)).await?;
        id_from_body(result)
    }

    /// Update an event of a schedule.
    ///
    /// A rename via `new_name` changes the event id; returns the event's id
    /// after the update.
    pub async fn event_update(
        &self,
        location_id: &str,
        schedule_type: ScheduleType,
        schedule_id: &str,
        event_id: &str,
        event: &Event,
    ) -> Result<String, RestError> {
        let url = self.ep(
            location_id,
            &format!("{}/{schedule_id}/events/{event_id}", schedule_type.as_str()),
        );
        let body = event.update_payload()?;
        let result = self.session.rest_put(&url, &[], Some(&body)).await?;
        id_from_body(result)
    }

    /// Delete an event of a schedule.
    pub async fn event_delete(
        &self,
        location_id: &str,
        schedule_type: ScheduleType,
        schedule_id: &str,
        event_id: &str,
    ) -> Result<(), RestError> {
        let url = self.ep(
            location_id,
            &format!("{}/{schedule_id}/events/{event_id}", schedule_type.as_str()),
        );
        self.session.rest_delete(&url).await
    }
}

/// Extract the `id` attribute of a create/update response body.
fn id_from_body(body: Body) -> Result<String, RestError> {
    let value = body
        .into_value()
        .ok_or_else(|| RestError::InvalidBody("expected a JSON body with an id".into()))?;
    match value.get("id").and_then(Value::as_str) {
        Some(id) => Ok(id.to_string()),
        None => Err(RestError::InvalidBody(format!(
            "response carries no id: {value}"
        ))),
    }
}
