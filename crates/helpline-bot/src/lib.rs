//! Wiring for the Helpline bot binary: configuration, the event
//! dispatcher, command handlers and the explorer lookup client.

/// Command handlers.
mod commands;
/// TOML + environment configuration.
pub mod config;
/// Inbound event routing.
pub mod dispatcher;
/// Chain-explorer balance lookup.
pub mod explorer;
/// Per-sender event workers.
pub mod workers;

pub use config::BotConfig;
pub use dispatcher::Dispatcher;
pub use explorer::ExplorerClient;
pub use workers::WorkerPool;
