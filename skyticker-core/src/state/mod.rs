//! Fetch cycle state machine
//!
//! The machine is explicit, finite and deterministic. Waiting between
//! attempts is a state with a deadline, not a sleep.

pub mod events;
pub mod machine;

pub use events::FetchEvent;
pub use machine::FetchState;
