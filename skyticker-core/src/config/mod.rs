//! Device configuration
//!
//! Configuration is resolved once at boot (flash TOML, flash binary, or the
//! embedded default) and fixed thereafter.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
