use std::path::{Path, PathBuf};

use crate::kernel::console::{ConsoleState, Prompt};
use crate::kernel::services::ports::{EditorSettings, Settings};
use crate::kernel::session::EditorSession;
use crate::models::{FileTree, FileTreeRow};

use super::effect::Effect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    Explorer,
    #[default]
    Editor,
    Console,
}

impl FocusTarget {
    pub fn next(self) -> Self {
        match self {
            FocusTarget::Explorer => FocusTarget::Editor,
            FocusTarget::Editor => FocusTarget::Console,
            FocusTarget::Console => FocusTarget::Explorer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPromptKind {
    SaveAs,
    OpenWorkspace,
}

impl PathPromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PathPromptKind::SaveAs => "Save as: ",
            PathPromptKind::OpenWorkspace => "Open folder: ",
        }
    }
}

/// Single-line path input shown in place of the status line.
#[derive(Debug, Clone)]
pub struct PathPrompt {
    kind: PathPromptKind,
    input: Prompt,
}

impl PathPrompt {
    pub fn new(kind: PathPromptKind, initial: impl Into<String>) -> Self {
        let mut input = Prompt::new(kind.label());
        input.set_text(initial);
        Self { kind, input }
    }

    pub fn kind(&self) -> PathPromptKind {
        self.kind
    }

    pub fn input(&self) -> &Prompt {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut Prompt {
        &mut self.input
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: FocusTarget,
    /// One-line notice shown in the status bar (file errors, queue notices).
    pub notice: Option<String>,
    /// While set, keys edit this prompt instead of the focused pane.
    pub path_prompt: Option<PathPrompt>,
    pub should_quit: bool,
}

#[derive(Debug, Clone)]
pub struct ExplorerState {
    tree: FileTree,
    rows: Vec<FileTreeRow>,
    selected_row: usize,
    scroll_offset: usize,
    view_height: usize,
}

impl ExplorerState {
    pub fn new(tree: FileTree) -> Self {
        let rows = tree.flatten_for_view();
        Self {
            tree,
            rows,
            selected_row: 0,
            scroll_offset: 0,
            view_height: 20,
        }
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn rows(&self) -> &[FileTreeRow] {
        &self.rows
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn replace_tree(&mut self, tree: FileTree) {
        self.tree = tree;
        self.rows = self.tree.flatten_for_view();
        self.selected_row = self.selected_row.min(self.rows.len().saturating_sub(1));
        self.clamp_scroll();
    }

    pub fn set_view_height(&mut self, height: usize) -> bool {
        let height = height.max(1);
        if self.view_height == height {
            return false;
        }
        self.view_height = height;
        self.clamp_scroll();
        true
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let max = self.rows.len() - 1;
        let next = self.selected_row.saturating_add_signed(delta).min(max);
        if next == self.selected_row {
            return false;
        }
        self.selected_row = next;
        self.clamp_scroll();
        true
    }

    /// Directories toggle; files are opened.
    pub fn activate_selected(&mut self) -> (bool, Vec<Effect>) {
        let Some(row) = self.rows.get(self.selected_row) else {
            return (false, Vec::new());
        };
        let id = row.id;
        if row.is_dir {
            let changed = self.tree.toggle_expand(id);
            if changed {
                self.rows = self.tree.flatten_for_view();
                self.clamp_scroll();
            }
            return (changed, Vec::new());
        }
        (false, vec![Effect::LoadFile(self.tree.full_path(id))])
    }

    pub fn collapse_selected(&mut self) -> bool {
        let Some(row) = self.rows.get(self.selected_row) else {
            return false;
        };
        if !self.tree.collapse(row.id) {
            return false;
        }
        self.rows = self.tree.flatten_for_view();
        self.clamp_scroll();
        true
    }

    fn clamp_scroll(&mut self) {
        if self.selected_row < self.scroll_offset {
            self.scroll_offset = self.selected_row;
        } else if self.selected_row >= self.scroll_offset + self.view_height {
            self.scroll_offset = self.selected_row + 1 - self.view_height;
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub workspace_root: PathBuf,
    pub explorer: ExplorerState,
    pub session: EditorSession,
    pub console: ConsoleState,
    pub editor_settings: EditorSettings,
    pub ui: UiState,
}

impl AppState {
    pub fn new(tree: FileTree, settings: &Settings) -> Self {
        Self {
            workspace_root: tree.absolute_root().to_path_buf(),
            explorer: ExplorerState::new(tree),
            session: EditorSession::default(),
            console: ConsoleState::new(
                settings.console.prompt.clone(),
                settings.console.max_transcript_lines,
            ),
            editor_settings: settings.editor.clone(),
            ui: UiState::default(),
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
