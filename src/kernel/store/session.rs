use crate::core::Command;
use crate::kernel::{Action, Effect, PathPromptKind};
use crate::models::TextBuffer;

use super::DispatchResult;

impl super::Store {
    pub(super) fn reduce_editor_command(&mut self, command: Command) -> DispatchResult {
        if command == Command::Save {
            return self.save_session();
        }

        let session = &mut self.state.session;
        let changed = match command {
            Command::CursorLeft => session.move_cursor(TextBuffer::move_left),
            Command::CursorRight => session.move_cursor(TextBuffer::move_right),
            Command::CursorUp => session.move_cursor(TextBuffer::move_up),
            Command::CursorDown => session.move_cursor(TextBuffer::move_down),
            Command::CursorLineStart => session.move_cursor(TextBuffer::move_line_start),
            Command::CursorLineEnd => session.move_cursor(TextBuffer::move_line_end),
            Command::InsertChar(ch) => session.edit(|b| {
                b.insert_char(ch);
                true
            }),
            Command::InsertNewline => session.edit(|b| {
                b.insert_newline();
                true
            }),
            Command::InsertTab => {
                let tab = " ".repeat(usize::from(self.state.editor_settings.tab_size.max(1)));
                session.edit(|b| {
                    b.insert_str(&tab);
                    true
                })
            }
            Command::DeleteBackward => session.edit(TextBuffer::delete_backward),
            Command::DeleteForward => session.edit(TextBuffer::delete_forward),
            _ => false,
        };
        DispatchResult::changed(changed)
    }

    /// An untitled buffer asks for a path first.
    pub(super) fn save_session(&mut self) -> DispatchResult {
        let session = &self.state.session;
        let Some(path) = session.path() else {
            return self.open_path_prompt(PathPromptKind::SaveAs);
        };

        DispatchResult {
            effects: vec![Effect::WriteFile {
                path: path.to_path_buf(),
                content: session.buffer().text(),
                version: session.version(),
            }],
            state_changed: false,
        }
    }

    pub(super) fn reduce_file_action(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::FileLoaded { path, content } => {
                tracing::info!(path = %path.display(), "file opened");
                self.state.session.open(path, &content);
                self.state.ui.notice = None;
                DispatchResult::changed(true)
            }
            Action::FileLoadError { path, error } => {
                tracing::error!(path = %path.display(), error = %error, "open failed");
                self.state.ui.notice = Some(format!("Cannot open {}: {error}", path.display()));
                DispatchResult::changed(true)
            }
            Action::FileSaved { path, version } => {
                tracing::info!(path = %path.display(), "file saved");
                DispatchResult::changed(self.state.session.mark_saved(&path, version))
            }
            Action::FileSaveError { path, error } => {
                tracing::error!(path = %path.display(), error = %error, "save failed");
                self.state.ui.notice = Some(format!("Cannot save {}: {error}", path.display()));
                DispatchResult::changed(true)
            }
            _ => DispatchResult::unchanged(),
        }
    }
}
