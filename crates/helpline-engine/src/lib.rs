//! The guided support dialogue and the group trigger scanner.
//!
//! The conversation engine is a pure state machine: [`fsm::step`] maps a
//! session snapshot and one input to the next stage plus the replies to
//! send, with no transport or store dependency. The [`TriggerScanner`]
//! inspects group messages for configured keywords and produces an
//! escalation event; the outreach itself is the dispatcher's job.

/// The conversation state machine.
pub mod fsm;
/// Keyword trigger scanning for group chats.
pub mod scanner;
/// Canned dialogue texts.
pub mod texts;

pub use fsm::{is_valid_address, step, FsmInput, Reply, Transition, MANUAL_SUPPORT_DATA};
pub use scanner::{TriggerEvent, TriggerScanner};
