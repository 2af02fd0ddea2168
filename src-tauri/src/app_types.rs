use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether the process has already created its main window.
#[derive(Debug, Default)]
pub(crate) struct MainWindowState {
    claimed: AtomicBool,
}

impl MainWindowState {
    /// Claims the single window slot. Fails once a window has been claimed.
    pub(crate) fn try_claim(&self) -> Result<(), String> {
        self.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| "main window already exists for this process.".to_string())
    }

    /// Gives the slot back after a failed window build.
    pub(crate) fn release(&self) {
        self.claimed.store(false, Ordering::Release);
    }

    pub(crate) fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }
}
