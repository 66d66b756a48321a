//! Podcastr CLI Library
//!
//! Headless host for the Podcastr player: loads configuration and an episode
//! list, then drives the player surface over a simulated media handle.
//!
//! This library exposes the host components for testing purposes.

pub mod config;
pub mod error;
pub mod session;

// Re-export commonly used types for convenience
pub use config::CliConfig;
pub use error::{CliError, Result};
pub use session::{load_episodes, run_session, SessionReport};
