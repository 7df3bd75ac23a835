//! Alternate screen management with panic-safe cleanup.

use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};

/// Static flag to track if the alternate screen is active (for panic handler)
pub(crate) static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Guard that switches to the alternate screen with a hidden cursor, and
/// restores the normal screen and cursor when dropped.
///
/// Cleanup also runs from a panic hook, so a crash mid-frame leaves the
/// terminal usable.
pub struct ScreenGuard {
    _private: (),
}

impl ScreenGuard {
    /// Enter the alternate screen, hide the cursor and clear.
    ///
    /// # Errors
    /// Returns an error if the control sequences can't be written.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        let mut stdout = io::stdout();
        crossterm::execute!(
            stdout,
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        SCREEN_ACTIVE.store(true, Ordering::SeqCst);

        Ok(Self { _private: () })
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        SCREEN_ACTIVE.store(false, Ordering::SeqCst);
        // Best-effort cleanup, errors during drop are ignored
        let _ = restore(&mut io::stdout());
    }
}

fn restore(out: &mut impl Write) -> io::Result<()> {
    crossterm::execute!(out, Show, LeaveAlternateScreen)
}

/// Install a panic hook that restores the terminal before the panic
/// message is printed.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if SCREEN_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = restore(&mut io::stdout());
        }
        original_hook(panic_info);
    }));
}
