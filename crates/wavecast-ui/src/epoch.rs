use std::sync::atomic::{AtomicU64, Ordering};

/// Last-writer-wins guard for overlapping requests.
///
/// Every request takes a new epoch before it starts; a response may only be
/// applied while its epoch is still the latest.
#[derive(Debug, Default)]
pub struct SearchEpoch {
    latest: AtomicU64,
}

impl SearchEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request and return its epoch.
    pub fn advance(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn current(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.current() == epoch
    }
}
