//! blackparticle: a small terminal editor built around an asynchronous
//! command console.
//!
//! Module layout:
//! - core: commands and frontend-neutral input events
//! - models: workspace file tree and rope-backed text buffer
//! - kernel: state, actions, effects, the store, and the service ports/adapters
//!   (filesystem, settings, child processes, async runtime)
//! - tui / app: crossterm glue and the ratatui workbench (feature `tui`)

#[cfg(feature = "tui")]
pub mod app;
pub mod core;
pub mod kernel;
pub mod models;
#[cfg(feature = "tui")]
pub mod tui;
