//! Refresh timing and retry decisions
//!
//! Both types are pure bookkeeping over millisecond timestamps supplied by
//! the caller; neither reads a clock or sleeps.

pub mod refresh;
pub mod retry;

pub use refresh::RefreshTimer;
pub use retry::{RetryDecision, RetryPolicy, RetryState};
