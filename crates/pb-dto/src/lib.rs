//! Wire schemas for the session API.
//!
//! The transport is out of scope; these are the operation inputs, outputs,
//! and error codes any transport carries. All types serialize with serde;
//! cards travel as two-character `RS` tokens.
//!
//! - [`Request`] — operations on an existing session
//! - [`StartSession`] — session creation, handled by the lobby
//! - [`Reply`] — per-operation success payloads
//! - [`ApiError`] — the structured error taxonomy
mod error;
mod request;
mod response;

pub use error::*;
pub use request::*;
pub use response::*;
