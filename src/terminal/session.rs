//! TerminalSession: Raw mode and alternate screen for the interactive UI.

use super::output::OutputBuffer;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout};

/// Configuration for the terminal session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
        }
    }
}

/// An active terminal session.
///
/// Entering switches to raw mode, the alternate screen and a hidden cursor;
/// dropping the session restores all three.
pub struct TerminalSession {
    config: SessionConfig,
    stdout: Stdout,
    width: u16,
    height: u16,
}

impl TerminalSession {
    /// Enter a session with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn enter(config: SessionConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, cursor::Hide)?;

        Ok(Self {
            config,
            stdout,
            width,
            height,
        })
    }

    /// Get the terminal width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the terminal height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Record a new terminal size.
    pub const fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Write a composed frame in one syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn present(&mut self, frame: &OutputBuffer) -> io::Result<()> {
        frame.flush_to(&mut self.stdout)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = execute!(self.stdout, cursor::Show);
        if self.config.alternate_screen {
            let _ = execute!(self.stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}
