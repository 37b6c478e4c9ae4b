//! Per-user conversation state for the Helpline orchestrator.
//!
//! [`Session`] tracks one user's dialogue stage, detected language, chosen
//! issue and manual-relay flag. [`SessionStore`] is the sole source of truth
//! for sessions and provides per-user serialization: all mutation for one
//! user happens under that user's own async mutex, while different users
//! proceed fully concurrently.

/// The session data model.
pub mod session;
/// The process-wide session table.
pub mod store;

pub use session::{Issue, Session, Stage};
pub use store::{SessionEntry, SessionStore};
