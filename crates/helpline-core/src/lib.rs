//! Core types and error definitions for the Helpline support orchestrator.
//!
//! This crate provides the foundational types shared across all Helpline
//! crates: the unified error enum, the inbound event model received from the
//! messaging platform, and the parsed command representation.
//!
//! # Main types
//!
//! - [`HelplineError`] — Unified error enum for all Helpline subsystems.
//! - [`HelplineResult`] — Convenience alias for `Result<T, HelplineError>`.
//! - [`InboundEvent`] — A single event (text, callback, command) from the platform.
//! - [`Command`] — A parsed message-prefixed command (`/help`, `/authorize`, ...).

/// Unified error type and result alias.
pub mod error;
/// Inbound event model and command parsing.
pub mod event;

pub use error::{HelplineError, HelplineResult};
pub use event::{ChatKind, Command, EventPayload, InboundEvent, MenuOption};
