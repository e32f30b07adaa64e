//! Telephony types and API.
//!
//! Split into cohesive sub-resources:
//! - `calls`: call control (dial, answer, hangup, listing)
//! - `schedules`: location schedules and their events

pub mod calls;
pub mod schedules;

use crate::rest::RestSession;
use calls::CallsApi;
use schedules::ScheduleApi;
use std::sync::Arc;

/// The telephony API.
#[derive(Clone)]
pub struct TelephonyApi {
    /// Call control API.
    pub calls: CallsApi,
    /// Schedule API.
    pub schedules: ScheduleApi,
}

impl TelephonyApi {
    pub(crate) fn new(session: Arc<RestSession>) -> Self {
        Self {
            calls: CallsApi::new(Arc::clone(&session)),
            schedules: ScheduleApi::new(session),
        }
    }
}
