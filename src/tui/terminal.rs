use std::io;

use ratatui::DefaultTerminal;
use ratatui::layout::Size;

use crate::host::Compositor;

/// The terminal in TUI mode for as long as this value lives.
///
/// Uses `ratatui::init()` (alternate screen, raw mode, panic hook) on entry
/// and `ratatui::restore()` on drop, so the terminal is restored on every
/// exit path including errors.
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    pub fn enter() -> Self {
        Self {
            terminal: ratatui::init(),
        }
    }

    pub fn size(&self) -> io::Result<Size> {
        self.terminal.size()
    }

    pub fn draw(&mut self, compositor: &Compositor) -> io::Result<()> {
        self.terminal.draw(|frame| compositor.draw(frame))?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        ratatui::restore();
    }
}
