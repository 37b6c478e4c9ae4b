//! Messaging-platform transport for the Helpline orchestrator.
//!
//! The [`ChatChannel`] trait is the narrow outbound surface the rest of the
//! system sends through; [`TelegramChannel`] implements it against the
//! Telegram Bot HTTP API and produces [`helpline_core::InboundEvent`]s from
//! a `getUpdates` long-poll loop.

/// The outbound channel trait.
pub mod channel;
/// Telegram Bot API adapter.
pub mod telegram;

pub use channel::ChatChannel;
pub use telegram::TelegramChannel;
