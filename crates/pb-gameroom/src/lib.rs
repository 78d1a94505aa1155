//! Async runtime for live advisory sessions.
//!
//! Each session is an independent actor: a tokio task exclusively owning
//! one [`Session`] and draining a message channel, so operations on a
//! session are processed strictly in arrival order. There is no shared
//! mutable state between sessions.
//!
//! ## Architecture
//!
//! - [`Session`] — Mode-aware state machine binding the counter, decision
//!   engine, bet engine, and the auto-mode hand life-cycle
//! - [`Actor`] — Async task wrapper draining a session's request channel
//! - [`Lobby`] — Session registry routing requests to actors by id
//! - [`Envelope`] — A request paired with its oneshot reply channel
mod actor;
mod dealer;
mod lobby;
mod round;
mod session;
mod settle;

pub use actor::*;
pub use lobby::*;
pub use round::*;
pub use session::*;
