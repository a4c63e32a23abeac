//! Configuration types
//!
//! Deployment configuration (button layout, enable-line policy, timing)
//! parsed from the board's TOML file.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ConfigError};
pub use types::*;
