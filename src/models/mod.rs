//! Data models for the Umami API.
//!
//! Response payloads are passed through as raw JSON, so this module only
//! holds request bodies and the enumerations tool inputs are restricted to.

mod auth;
mod common;
mod event;
mod report;
mod team;
mod user;
mod website;

pub use auth::*;
pub use common::*;
pub use event::*;
pub use report::*;
pub use team::*;
pub use user::*;
pub use website::*;
