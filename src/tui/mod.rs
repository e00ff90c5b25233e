//! Terminal frontend glue (crossterm + ratatui).
//!
//! Kept apart from `kernel` and `models` so the console core builds without
//! terminal crates.

pub mod crossterm;
pub mod terminal_guard;

#[cfg(unix)]
pub use terminal_guard::install_termination_signals;
pub use terminal_guard::{
    EditorScreen, ScreenMode, TerminalGuard, TerminalRestorer, TerminationSignal,
};
