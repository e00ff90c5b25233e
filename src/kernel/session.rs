//! The single open file: buffer, path, saved status and syntax style.

use std::path::{Path, PathBuf};

use crate::kernel::language::SyntaxStyle;
use crate::models::TextBuffer;

pub const OUTPUT_ENCODING: &str = "UTF-8";

#[derive(Debug, Clone)]
pub struct EditorSession {
    path: Option<PathBuf>,
    buffer: TextBuffer,
    syntax: SyntaxStyle,
    saved: bool,
    version: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self {
            path: None,
            buffer: TextBuffer::new(),
            syntax: SyntaxStyle::None,
            saved: false,
            version: 0,
        }
    }
}

impl EditorSession {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn syntax(&self) -> SyntaxStyle {
        self.syntax
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().to_string())
    }

    /// Replaces the buffer with freshly loaded content.
    pub fn open(&mut self, path: PathBuf, content: &str) {
        self.syntax = SyntaxStyle::from_path(&path);
        self.buffer = TextBuffer::from_text(content);
        self.path = Some(path);
        self.version = self.version.wrapping_add(1);
        self.saved = true;
    }

    /// Targets a file that does not exist yet; the first save creates it.
    pub fn open_new(&mut self, path: PathBuf) {
        self.open(path, "");
        self.saved = false;
    }

    /// Points the session at another file and keeps the buffer; the next
    /// write creates or replaces that file.
    pub fn save_as(&mut self, path: PathBuf) {
        self.syntax = SyntaxStyle::from_path(&path);
        self.path = Some(path);
        self.saved = false;
    }

    /// Applies `edit` to the buffer and marks the session unsaved when it reports
    /// a change.
    pub fn edit(&mut self, edit: impl FnOnce(&mut TextBuffer) -> bool) -> bool {
        if !edit(&mut self.buffer) {
            return false;
        }
        self.version = self.version.wrapping_add(1);
        self.saved = false;
        true
    }

    pub fn move_cursor(&mut self, motion: impl FnOnce(&mut TextBuffer) -> bool) -> bool {
        motion(&mut self.buffer)
    }

    /// Records a completed write. Edits made while the write was in flight keep
    /// the session unsaved.
    pub fn mark_saved(&mut self, path: &Path, version: u64) -> bool {
        if self.path.as_deref() != Some(path) {
            return false;
        }
        self.saved = version == self.version;
        true
    }

    pub fn status_line(&self) -> String {
        let file_status = self
            .file_name()
            .unwrap_or_else(|| "File not saved".to_string());
        format!("Line: {} | {}", self.buffer.len_lines(), file_status)
    }

    pub fn file_info_line(&self) -> String {
        let name = self.file_name().unwrap_or_else(|| "None".to_string());
        let status = if self.path.is_some() && self.saved {
            "Saved"
        } else {
            "Unsaved"
        };
        format!(
            "Current File: {} | Status: {} | Syntax: {} | Encoding: {}",
            name,
            status,
            self.syntax.display_name(),
            OUTPUT_ENCODING
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/session.rs"]
mod tests;
