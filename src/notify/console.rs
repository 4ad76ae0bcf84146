use crate::error::{ChimeError, Result};
use crate::notify::Notifier;
use std::io::Write;

/// Prints each notification on its own line.
///
/// A leading newline moves off the in-place status line first.
pub struct ConsoleNotifier<W: Write = std::io::Stdout> {
    out: W,
}

impl ConsoleNotifier {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn notify(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "\n{text}")
            .and_then(|()| self.out.flush())
            .map_err(|e| ChimeError::Notify(format!("console write failed: {e}")))
    }
}
