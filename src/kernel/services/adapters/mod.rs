//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod dirs;
pub mod file;
pub mod keybinding;
pub mod process;
pub mod runtime;
pub mod settings;

pub use dirs::{ensure_log_dir, get_cache_dir, get_log_dir};
pub use file::LocalFileProvider;
pub use keybinding::{parse_keybinding, KeybindingContext, KeybindingService};
pub use process::{run_command, spawn_merged, EncodingError, OutputDecoder, ProcessError};
pub use runtime::{message_channel, AppMessage, AsyncRuntime, MESSAGE_CHANNEL_CAPACITY};
pub use settings::{
    ensure_settings_file, get_settings_path, load_settings, load_settings_from, SettingsError,
};
