//! The terminal output seam and its crossterm implementation.

use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use super::ColorProfile;

/// Where rendered frames go.
///
/// Rows and columns are zero-based. Writes may be buffered until
/// [`flush`](TerminalOutput::flush).
pub trait TerminalOutput {
    fn write(&mut self, text: &str) -> io::Result<()>;

    fn move_cursor_home(&mut self) -> io::Result<()>;

    /// Clear from the cursor to the end of the screen.
    fn clear_from_cursor(&mut self) -> io::Result<()>;

    /// Clear the whole screen and home the cursor.
    fn clear_screen(&mut self) -> io::Result<()>;

    fn move_cursor_to(&mut self, column: u16, row: u16) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;

    /// Size in (columns, rows), or `None` when there is no terminal.
    fn size(&self) -> Option<(u16, u16)>;

    fn color_profile(&self) -> ColorProfile;
}

/// Terminal output over any writer, using crossterm commands.
pub struct CrosstermTerminal<W: Write = Stdout> {
    out: W,
    profile: ColorProfile,
    is_tty: bool,
}

impl CrosstermTerminal<Stdout> {
    /// Stdout, with TTY-ness and color profile detected.
    pub fn stdout() -> Self {
        let is_tty = io::stdout().is_terminal();
        Self {
            out: io::stdout(),
            profile: ColorProfile::detect(),
            is_tty,
        }
    }
}

impl<W: Write> CrosstermTerminal<W> {
    /// Wrap an arbitrary writer. It is never treated as a TTY, so `size`
    /// returns `None`.
    pub fn new(out: W, profile: ColorProfile) -> Self {
        Self {
            out,
            profile,
            is_tty: false,
        }
    }

    /// Replace the detected color profile.
    pub fn with_profile(mut self, profile: ColorProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TerminalOutput for CrosstermTerminal<W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        crossterm::queue!(self.out, Print(text))
    }

    fn move_cursor_home(&mut self) -> io::Result<()> {
        crossterm::queue!(self.out, MoveTo(0, 0))
    }

    fn clear_from_cursor(&mut self) -> io::Result<()> {
        crossterm::queue!(self.out, Clear(ClearType::FromCursorDown))
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        crossterm::queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn move_cursor_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        crossterm::queue!(self.out, MoveTo(column, row))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn size(&self) -> Option<(u16, u16)> {
        if !self.is_tty {
            return None;
        }
        crossterm::terminal::size()
            .ok()
            .filter(|&(cols, rows)| cols > 0 && rows > 0)
    }

    fn color_profile(&self) -> ColorProfile {
        self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(f: impl FnOnce(&mut CrosstermTerminal<Vec<u8>>)) -> String {
        let mut term = CrosstermTerminal::new(Vec::new(), ColorProfile::Ascii);
        f(&mut term);
        term.flush().unwrap();
        String::from_utf8(term.into_inner()).unwrap()
    }

    #[test]
    fn test_home_then_clear() {
        let out = written(|t| {
            t.move_cursor_home().unwrap();
            t.clear_from_cursor().unwrap();
            t.write("ab\n").unwrap();
        });
        assert_eq!(out, "\x1b[1;1H\x1b[Jab\n");
    }

    #[test]
    fn test_clear_screen() {
        let out = written(|t| t.clear_screen().unwrap());
        assert_eq!(out, "\x1b[2J\x1b[1;1H");
    }

    #[test]
    fn test_move_cursor_is_one_based_on_the_wire() {
        let out = written(|t| t.move_cursor_to(0, 24).unwrap());
        assert_eq!(out, "\x1b[25;1H");
    }

    #[test]
    fn test_writer_has_no_size() {
        let term = CrosstermTerminal::new(Vec::new(), ColorProfile::Ansi);
        assert_eq!(term.size(), None);
        assert_eq!(term.color_profile(), ColorProfile::Ansi);
    }
}
