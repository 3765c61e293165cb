//! Harmony CLI
//!
//! Headless driver for the Harmony playback engine. A `Session` opens the
//! persisted state and catalogue and acquires the shared engine; `commands`
//! turns each subcommand into text, and `simulate` plays in real time on a
//! tokio interval with heartbeat persistence.

#![forbid(unsafe_code)]

pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod simulate;
pub mod view;

pub use config::{AppConfig, DEFAULT_CONFIG_FILE};
pub use error::{CliError, Result};
pub use session::Session;
pub use simulate::{simulate, SimulationReport, StopReason};
pub use view::ConsoleView;
