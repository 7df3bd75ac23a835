//! Cooperative cancellation shared with the Ctrl+C handler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A flag the frame loop checks once per iteration.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal(Arc<AtomicBool>);

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Route Ctrl+C and termination requests (SIGINT, SIGTERM, SIGHUP) to
    /// this signal.
    ///
    /// # Errors
    /// Fails if a handler is already installed for the process.
    pub fn install_ctrlc_handler(&self) -> Result<(), ctrlc::Error> {
        let signal = self.clone();
        ctrlc::set_handler(move || {
            log::info!("Received termination signal, shutting down");
            signal.request();
        })
    }
}
