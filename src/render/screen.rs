//! Terminal backend behind the `Screen` trait

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::Print,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

/// External display collaborator. Synchronous; errors at this boundary are
/// fatal to the run.
pub trait Screen {
    /// Enters raw, non-echoing input mode with a hidden cursor.
    fn init(&mut self) -> io::Result<()>;

    /// Grid size available for plotting, in (columns, rows).
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Writes a full frame to the display.
    fn present(&mut self, fb: &super::FrameBuffer) -> io::Result<()>;

    /// Restores the terminal. Must be idempotent: teardown also runs from
    /// the drop guard when the loop exits early.
    fn shutdown(&mut self) -> io::Result<()>;
}

/// Crossterm-backed screen on stdout.
pub struct TerminalScreen {
    stdout: Stdout,
    active: bool,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            active: false,
        }
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for TerminalScreen {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;
        self.active = true;
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn present(&mut self, fb: &super::FrameBuffer) -> io::Result<()> {
        for (row, cells) in fb.rows().enumerate() {
            let line: String = cells.iter().collect();
            queue!(self.stdout, cursor::MoveTo(0, row as u16), Print(line))?;
        }
        self.stdout.flush()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        // Last-resort restore when the loop unwinds without a clean exit.
        let _ = self.shutdown();
    }
}
