//! Fetch state definition

use super::events::FetchEvent;

/// Fetch cycle states
///
/// A successful attempt passes straight back to `Idle`; success has no
/// state of its own because nothing waits in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchState {
    /// No cycle in progress
    #[default]
    Idle,
    /// An attempt is in flight
    Fetching,
    /// Last attempt failed; next one allowed at `deadline_ms`
    RetryWait {
        /// Earliest time for the next attempt (ms)
        deadline_ms: u64,
    },
}

impl FetchState {
    /// Whether a cycle is in progress
    pub fn in_cycle(&self) -> bool {
        !matches!(self, FetchState::Idle)
    }

    /// Retry deadline, if waiting
    pub fn deadline(&self) -> Option<u64> {
        match self {
            FetchState::RetryWait { deadline_ms } => Some(*deadline_ms),
            _ => None,
        }
    }

    /// Whether a retry wait has expired at `now_ms`
    pub fn backoff_elapsed(&self, now_ms: u64) -> bool {
        self.deadline().is_some_and(|deadline| now_ms >= deadline)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: FetchEvent) -> Self {
        use FetchEvent::*;
        use FetchState::*;

        match (self, event) {
            (Idle, CycleDue) => Fetching,

            (Fetching, AttemptSucceeded) => Idle,
            (Fetching, AttemptFailed { retry_at_ms }) => RetryWait {
                deadline_ms: retry_at_ms,
            },
            (Fetching, RetriesExhausted) => Idle,

            (RetryWait { .. }, BackoffElapsed) => Fetching,
            (RetryWait { .. }, RetriesExhausted) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_path() {
        let state = FetchState::Idle.transition(FetchEvent::CycleDue);
        assert_eq!(state, FetchState::Fetching);
        assert_eq!(
            state.transition(FetchEvent::AttemptSucceeded),
            FetchState::Idle
        );
    }

    #[test]
    fn test_retry_path() {
        let waiting =
            FetchState::Fetching.transition(FetchEvent::AttemptFailed { retry_at_ms: 5_000 });
        assert_eq!(waiting, FetchState::RetryWait { deadline_ms: 5_000 });
        assert!(waiting.in_cycle());
        assert!(!waiting.backoff_elapsed(4_999));
        assert!(waiting.backoff_elapsed(5_000));
        assert_eq!(
            waiting.transition(FetchEvent::BackoffElapsed),
            FetchState::Fetching
        );
    }

    #[test]
    fn test_abandon_returns_to_idle() {
        assert_eq!(
            FetchState::Fetching.transition(FetchEvent::RetriesExhausted),
            FetchState::Idle
        );
        assert_eq!(
            FetchState::RetryWait { deadline_ms: 1 }.transition(FetchEvent::RetriesExhausted),
            FetchState::Idle
        );
    }

    #[test]
    fn test_cycle_due_ignored_mid_cycle() {
        assert_eq!(
            FetchState::Fetching.transition(FetchEvent::CycleDue),
            FetchState::Fetching
        );
        let waiting = FetchState::RetryWait { deadline_ms: 9 };
        assert_eq!(waiting.transition(FetchEvent::CycleDue), waiting);
    }

    #[test]
    fn test_idle_ignores_attempt_events() {
        assert_eq!(
            FetchState::Idle.transition(FetchEvent::AttemptSucceeded),
            FetchState::Idle
        );
        assert_eq!(
            FetchState::Idle.transition(FetchEvent::BackoffElapsed),
            FetchState::Idle
        );
        assert!(!FetchState::Idle.in_cycle());
    }
}
