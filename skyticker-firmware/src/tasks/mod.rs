//! Embassy async tasks
//!
//! The display task owns the orchestrator and with it all application
//! state. The radio and network runners are driver plumbing.

pub mod display;
pub mod net;

pub use display::{display_task, App};
pub use net::{cyw43_task, net_task};
