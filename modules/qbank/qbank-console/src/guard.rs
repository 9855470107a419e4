use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Proof that a fetch was started; see [`FetchGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Drops responses that arrive too late to matter.
///
/// Every fetch takes a [`Ticket`] before going to the network. When it
/// returns, its result is applied only if no newer fetch has been started
/// since and the view is still mounted. Unmounting invalidates every
/// outstanding ticket.
#[derive(Debug)]
pub struct FetchGuard {
    generation: AtomicU64,
    mounted: AtomicBool,
}

impl Default for FetchGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchGuard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            mounted: AtomicBool::new(true),
        }
    }

    /// Start a fetch, superseding any fetch still in flight.
    #[must_use]
    pub fn issue(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.is_mounted() && self.generation.load(Ordering::SeqCst) == ticket.0
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
