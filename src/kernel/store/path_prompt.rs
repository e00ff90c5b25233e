use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::kernel::{Action, Effect, PathPrompt, PathPromptKind};

use super::DispatchResult;

impl super::Store {
    pub(super) fn open_path_prompt(&mut self, kind: PathPromptKind) -> DispatchResult {
        let root = &self.state.workspace_root;
        let initial = match (kind, self.state.session.path()) {
            (PathPromptKind::SaveAs, Some(path)) => path.display().to_string(),
            (PathPromptKind::SaveAs, None) => format!("{}{MAIN_SEPARATOR}", root.display()),
            (PathPromptKind::OpenWorkspace, _) => root.display().to_string(),
        };
        self.state.ui.path_prompt = Some(PathPrompt::new(kind, initial));
        DispatchResult::changed(true)
    }

    pub(super) fn reduce_path_prompt_action(&mut self, action: Action) -> DispatchResult {
        let Some(prompt) = self.state.ui.path_prompt.as_mut() else {
            return DispatchResult::unchanged();
        };
        match action {
            Action::PathPromptInsert(ch) => {
                prompt.input_mut().insert(ch);
                DispatchResult::changed(true)
            }
            Action::PathPromptBackspace => DispatchResult::changed(prompt.input_mut().backspace()),
            Action::PathPromptCancel => {
                self.state.ui.path_prompt = None;
                DispatchResult::changed(true)
            }
            Action::PathPromptSubmit => self.submit_path_prompt(),
            _ => DispatchResult::unchanged(),
        }
    }

    fn submit_path_prompt(&mut self) -> DispatchResult {
        let Some(prompt) = self.state.ui.path_prompt.take() else {
            return DispatchResult::unchanged();
        };
        let Some(path) = resolve_input(&self.state.workspace_root, prompt.input().text()) else {
            return DispatchResult::changed(true);
        };

        match prompt.kind() {
            PathPromptKind::SaveAs => {
                tracing::info!(path = %path.display(), "save as");
                self.state.session.save_as(path);
                self.state.ui.notice = None;
                let mut result = self.save_session();
                result.state_changed = true;
                result
            }
            PathPromptKind::OpenWorkspace => {
                tracing::info!(root = %path.display(), "opening workspace");
                DispatchResult {
                    effects: vec![Effect::LoadWorkspace(path)],
                    state_changed: true,
                }
            }
        }
    }
}

/// Relative input is taken from the workspace root; blank input yields nothing.
fn resolve_input(root: &Path, text: &str) -> Option<PathBuf> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let path = PathBuf::from(text);
    Some(if path.is_relative() {
        root.join(path)
    } else {
        path
    })
}
