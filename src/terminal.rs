use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::style::ResetColor;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::ExecutableCommand;
use log::warn;

/// Puts the terminal in raw, no-echo mode until dropped.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let shown = stdout
            .execute(ResetColor)
            .and_then(|out| out.execute(Show))
            .and_then(|out| out.flush());
        if let Err(e) = shown {
            warn!("unable to restore cursor: {e}");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("unable to restore cooked mode: {e}");
        }
    }
}
