//! Terminal output: color profiles, the output seam, and screen cleanup.

mod guard;
mod output;
mod profile;

pub use guard::ScreenGuard;
pub use output::{CrosstermTerminal, TerminalOutput};
pub use profile::ColorProfile;
