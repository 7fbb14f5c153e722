//! Configuration loading
//!
//! Flash items are written by the provisioning tool. Without them the
//! firmware runs on the `device.toml` it was built with.

pub mod loader;

pub use loader::{log_config_summary, ConfigPersistence};
