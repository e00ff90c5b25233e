use std::path::PathBuf;

use crate::core::Command;
use crate::kernel::console::{CommandId, CommandOutcome};
use crate::models::FileTree;

#[derive(Debug, Clone)]
pub enum Action {
    RunCommand(Command),
    OpenPath(PathBuf),
    OpenNewPath(PathBuf),
    Tick,
    ConsoleInsert(char),
    ConsoleBackspace,
    ConsoleSubmit,
    ConsoleSubmitLine(String),
    ConsoleOutput {
        id: CommandId,
        line: String,
    },
    ConsoleFinished {
        id: CommandId,
        outcome: CommandOutcome,
    },
    PathPromptInsert(char),
    PathPromptBackspace,
    PathPromptSubmit,
    PathPromptCancel,
    ExplorerSetViewHeight {
        height: usize,
    },
    ExplorerMoveSelection {
        delta: isize,
    },
    ExplorerActivate,
    ExplorerCollapse,
    WorkspaceLoaded {
        tree: FileTree,
    },
    WorkspaceLoadError {
        root: PathBuf,
        error: String,
    },
    FileLoaded {
        path: PathBuf,
        content: String,
    },
    FileLoadError {
        path: PathBuf,
        error: String,
    },
    FileSaved {
        path: PathBuf,
        version: u64,
    },
    FileSaveError {
        path: PathBuf,
        error: String,
    },
}
