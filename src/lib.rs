//! A simple typed client for the Webex REST API, centered on calling.
//!
//! Covers people, locations, webhooks, telephony call control and location
//! schedules. All requests go through one [`rest::RestSession`] that attaches
//! authentication, retries on rate limiting and follows pagination links.
//!
//! ```no_run
//! use webex_simple::tokens::Tokens;
//! use webex_simple::WebexSimpleApi;
//!
//! # async fn run() -> Result<(), webex_simple::error::RestError> {
//! let api = WebexSimpleApi::new(Tokens::new("access-token"));
//!
//! let me = api.people.me(true).await?;
//! println!("{:?} {:?}", me.display_name, me.extension);
//!
//! for call in api.telephony.calls.list_calls().await? {
//!     println!("{:?} {:?}", call.call_id(), call.state);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod locations;
pub mod model;
pub mod people;
pub mod person_settings;
pub mod rest;
pub mod telephony;
pub mod tokens;
pub mod webhook;

mod api;
pub use api::WebexSimpleApi;

#[cfg(test)]
pub mod testsupport;
