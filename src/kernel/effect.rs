use std::path::PathBuf;

use crate::kernel::console::{CommandId, CommandRequest};

/// Side effects requested by the store and executed off the presentation thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadFile(PathBuf),
    WriteFile {
        path: PathBuf,
        content: String,
        version: u64,
    },
    LoadWorkspace(PathBuf),
    SpawnCommand {
        request: CommandRequest,
        cwd: PathBuf,
    },
    CancelCommand(CommandId),
}
