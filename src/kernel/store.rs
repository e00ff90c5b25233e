use crate::core::Command;

use super::{Action, AppState, Effect, FocusTarget, PathPromptKind};

mod console;
mod path_prompt;
mod session;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::RunCommand(cmd) => self.dispatch_command(cmd),
            Action::OpenPath(path) => DispatchResult {
                effects: vec![Effect::LoadFile(path)],
                state_changed: false,
            },
            Action::OpenNewPath(path) => {
                self.state.session.open_new(path);
                DispatchResult::changed(true)
            }
            Action::Tick => DispatchResult::unchanged(),
            action @ (Action::ConsoleInsert(_)
            | Action::ConsoleBackspace
            | Action::ConsoleSubmit
            | Action::ConsoleSubmitLine(_)
            | Action::ConsoleOutput { .. }
            | Action::ConsoleFinished { .. }) => self.reduce_console_action(action),
            action @ (Action::PathPromptInsert(_)
            | Action::PathPromptBackspace
            | Action::PathPromptSubmit
            | Action::PathPromptCancel) => self.reduce_path_prompt_action(action),
            Action::ExplorerSetViewHeight { height } => {
                DispatchResult::changed(self.state.explorer.set_view_height(height))
            }
            Action::ExplorerMoveSelection { delta } => {
                DispatchResult::changed(self.state.explorer.move_selection(delta))
            }
            Action::ExplorerActivate => {
                let (state_changed, effects) = self.state.explorer.activate_selected();
                DispatchResult {
                    effects,
                    state_changed,
                }
            }
            Action::ExplorerCollapse => {
                DispatchResult::changed(self.state.explorer.collapse_selected())
            }
            Action::WorkspaceLoaded { tree } => {
                tracing::info!(root = %tree.absolute_root().display(), "workspace loaded");
                self.state.workspace_root = tree.absolute_root().to_path_buf();
                self.state.explorer.replace_tree(tree);
                DispatchResult::changed(true)
            }
            Action::WorkspaceLoadError { root, error } => {
                tracing::error!(root = %root.display(), error = %error, "workspace load failed");
                self.state.ui.notice = Some(format!("Cannot read {}: {error}", root.display()));
                DispatchResult::changed(true)
            }
            action @ (Action::FileLoaded { .. }
            | Action::FileLoadError { .. }
            | Action::FileSaved { .. }
            | Action::FileSaveError { .. }) => self.reduce_file_action(action),
        }
    }

    fn dispatch_command(&mut self, command: Command) -> DispatchResult {
        if command.is_edit_command() || command.is_cursor_command() || command == Command::Save {
            return self.reduce_editor_command(command);
        }

        match command {
            Command::SaveAs => self.open_path_prompt(PathPromptKind::SaveAs),
            Command::OpenWorkspace => self.open_path_prompt(PathPromptKind::OpenWorkspace),
            Command::ReloadWorkspace => DispatchResult {
                effects: vec![Effect::LoadWorkspace(self.state.workspace_root.clone())],
                state_changed: false,
            },
            Command::ClearConsole => {
                let changed =
                    !self.state.console.transcript().is_empty() || !self.state.console.prompt().is_reset();
                self.state.console.clear();
                DispatchResult::changed(changed)
            }
            Command::CancelCommand => match self.state.console.request_cancel() {
                Some(id) => {
                    tracing::info!(command_id = id, "cancel requested");
                    DispatchResult {
                        effects: vec![Effect::CancelCommand(id)],
                        state_changed: false,
                    }
                }
                None => DispatchResult::unchanged(),
            },
            Command::FocusNext => self.set_focus(self.state.ui.focus.next()),
            Command::FocusExplorer => self.set_focus(FocusTarget::Explorer),
            Command::FocusEditor => self.set_focus(FocusTarget::Editor),
            Command::FocusConsole => self.set_focus(FocusTarget::Console),
            Command::Quit => {
                self.state.ui.should_quit = true;
                DispatchResult::changed(true)
            }
            _ => DispatchResult::unchanged(),
        }
    }

    fn set_focus(&mut self, focus: FocusTarget) -> DispatchResult {
        let prev = self.state.ui.focus;
        self.state.ui.focus = focus;
        DispatchResult::changed(prev != focus)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
