//! Arena viewer - load recorded games and step through them
//!
//! # Architecture
//!
//! - **Sources**: `GameSource` implementations for the arena server and local files
//! - **Session**: `ReplaySession`, one loaded game plus its scrub controller
//! - **Report**: text output for the `print` and `verify` commands
//! - **TUI**: the interactive viewer
//! - **Config**: `ViewerConfig` from TOML, environment and flags

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod file_source;
mod http_source;
mod report;
mod session;
mod source;

pub mod tui;

// Crate-level exports - CLI and configuration
pub use cli::{Cli, Command, GameArgs};
pub use config::{ConfigError, SERVER_URL_ENV, ViewerConfig};

// Crate-level exports - Game sources
pub use file_source::FileGameSource;
pub use http_source::HttpGameSource;
pub use source::{GameSource, LoadError, LoadedGame, parse_game_id};

// Crate-level exports - Sessions and reports
pub use report::{VerifyReport, render_frame, verify};
pub use session::{ReplaySession, SessionError};
