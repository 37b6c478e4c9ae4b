//! Manual-mode relay between end users and the human operator.
//!
//! Once a session is in manual mode the dispatcher bypasses the
//! conversation engine entirely and forwards messages through
//! [`RelayBridge`], translating in both directions. [`AccessControl`] is
//! the separate access-control concern consulted before any privileged
//! action: the single operator identity, and the passcode-unlocked
//! authorized-caller set for privileged lookups.

/// Operator identity and authorized-caller set.
pub mod auth;
/// The translated user↔operator relay.
pub mod bridge;

pub use auth::AccessControl;
pub use bridge::RelayBridge;
