//! Board-agnostic core logic for the Skyticker weather display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (data source, clock, renderer, buttons, backlight)
//! - Double-buffered ticker message channel
//! - Scroll animator with tear-free commit boundaries
//! - Refresh timer and bounded retry policy
//! - Fetch cycle state machine
//! - The orchestrator that owns all of the above and drives one tick
//! - Configuration types and the TOML subset parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod brightness;
pub mod channel;
pub mod config;
pub mod orchestrator;
pub mod scheduler;
pub mod state;
pub mod ticker;
pub mod time;
pub mod traits;
pub mod weather;

pub use orchestrator::Orchestrator;
