use crate::kernel::console::{CommandId, CommandOutcome};
use crate::kernel::Action;
use crate::models::FileTree;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AppMessage {
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
    FileError {
        path: PathBuf,
        error: String,
    },
    FileSaved {
        path: PathBuf,
        success: bool,
        error: Option<String>,
        version: u64,
    },
    CommandOutput {
        id: CommandId,
        line: String,
    },
    CommandFinished {
        id: CommandId,
        outcome: CommandOutcome,
    },
}

impl From<AppMessage> for Action {
    fn from(msg: AppMessage) -> Self {
        match msg {
            AppMessage::WorkspaceLoaded { tree } => Action::WorkspaceLoaded { tree },
            AppMessage::WorkspaceLoadError { root, error } => {
                Action::WorkspaceLoadError { root, error }
            }
            AppMessage::FileLoaded { path, content } => Action::FileLoaded { path, content },
            AppMessage::FileError { path, error } => Action::FileLoadError { path, error },
            AppMessage::FileSaved {
                path,
                success: true,
                version,
                ..
            } => Action::FileSaved { path, version },
            AppMessage::FileSaved { path, error, .. } => Action::FileSaveError {
                path,
                error: error.unwrap_or_else(|| "write failed".to_string()),
            },
            AppMessage::CommandOutput { id, line } => Action::ConsoleOutput { id, line },
            AppMessage::CommandFinished { id, outcome } => Action::ConsoleFinished { id, outcome },
        }
    }
}
