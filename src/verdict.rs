//! Aggregate pass/fail state for one harness run

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Monotonic failure flag: set once any supervised process fails or times
/// out, never reset for the rest of the run.
///
/// Clones share the same underlying state, so every supervisor, scenario and
/// the orchestrator observe one verdict. Set-only semantics make concurrent
/// writers from the drain and wait paths safe without locking.
#[derive(Clone, Debug, Default)]
pub struct FailureFlag(Arc<AtomicBool>);

impl FailureFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure.
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unset() {
        assert!(!FailureFlag::new().is_set());
    }

    #[test]
    fn clones_share_state() {
        let flag = FailureFlag::new();
        let other = flag.clone();

        other.set();

        assert!(flag.is_set());
        assert!(other.is_set());
    }

    #[test]
    fn set_is_idempotent() {
        let flag = FailureFlag::new();
        flag.set();
        flag.set();
        assert!(flag.is_set());
    }
}
