//! Service ports: traits + data contracts.

pub mod file;
pub mod settings;

pub use file::{DirEntry, FileError, FileProvider, Result as FileResult};
pub use settings::{ConsoleSettings, EditorSettings, KeybindingRule, Settings};
