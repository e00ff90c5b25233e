//! Terminal lifecycle for the workbench.
//!
//! A [`TerminalRestorer`] is created before anything touches the terminal and
//! shared with the panic hook (see `logging`) and the signal watcher. The
//! [`TerminalGuard`] switches the screen into UI mode and arms the restorer;
//! whoever calls `restore` first puts the terminal back, later calls are no-ops.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The screen switch the UI needs. `enter` may fail halfway; `leave` must
/// tolerate being called in any partial state.
pub trait ScreenMode: Send + Sync + 'static {
    fn enter(&self) -> io::Result<()>;
    fn leave(&self) -> io::Result<()>;
}

/// Raw mode, alternate screen, bracketed paste and a bar cursor for editing.
#[derive(Debug, Default)]
pub struct EditorScreen;

impl ScreenMode for EditorScreen {
    fn enter(&self) -> io::Result<()> {
        use crossterm::{cursor, event, execute, terminal};

        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            event::EnableBracketedPaste,
            cursor::SetCursorStyle::SteadyBar
        )
    }

    fn leave(&self) -> io::Result<()> {
        use crossterm::{cursor, event, execute, terminal};

        let raw = terminal::disable_raw_mode();
        let screen = execute!(
            io::stdout(),
            terminal::LeaveAlternateScreen,
            event::DisableBracketedPaste,
            cursor::SetCursorStyle::DefaultUserShape,
            cursor::Show
        );
        raw.and(screen)
    }
}

struct RestoreState {
    mode: Box<dyn ScreenMode>,
    active: AtomicBool,
}

#[derive(Clone)]
pub struct TerminalRestorer {
    state: Arc<RestoreState>,
}

impl Default for TerminalRestorer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRestorer {
    pub fn new() -> Self {
        Self::with_mode(EditorScreen)
    }

    pub fn with_mode(mode: impl ScreenMode) -> Self {
        Self {
            state: Arc::new(RestoreState {
                mode: Box::new(mode),
                active: AtomicBool::new(false),
            }),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.active.load(Ordering::SeqCst)
    }

    fn enter(&self) -> io::Result<()> {
        if let Err(e) = self.state.mode.enter() {
            let _ = self.state.mode.leave();
            return Err(e);
        }
        self.state.active.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Leaves UI mode once per `TerminalGuard::enter`.
    pub fn restore(&self) -> io::Result<()> {
        if !self.state.active.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        self.state.mode.leave()
    }
}

/// Holds the terminal in UI mode until dropped.
pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn enter(restorer: &TerminalRestorer) -> io::Result<Self> {
        restorer.enter()?;
        Ok(Self {
            restorer: restorer.clone(),
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restorer.restore() {
            tracing::warn!(error = %e, "terminal restore failed");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    #[cfg(unix)]
    fn from_raw(signal: i32) -> Option<Self> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};

        match signal {
            SIGINT => Some(Self::SigInt),
            SIGTERM => Some(Self::SigTerm),
            _ => None,
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Self::SigInt => 130,
            Self::SigTerm => 143,
        }
    }
}

/// How long the main loop has to stop the running command and exit on its own
/// after a signal.
#[cfg(unix)]
const SIGNAL_GRACE: std::time::Duration = std::time::Duration::from_secs(2);

/// Forwards SIGINT/SIGTERM to the main loop. If the loop has not exited after
/// the grace period, the terminal is restored and the process exits.
#[cfg(unix)]
pub fn install_termination_signals(
    restorer: TerminalRestorer,
    tx: std::sync::mpsc::Sender<TerminationSignal>,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    Ok(std::thread::spawn(move || {
        let Some(signal) = signals.forever().find_map(TerminationSignal::from_raw) else {
            return;
        };
        tracing::info!(?signal, "termination signal received");
        let _ = tx.send(signal);

        std::thread::sleep(SIGNAL_GRACE);
        let _ = restorer.restore();
        std::process::exit(signal.exit_code());
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
