use serde::{Deserialize, Serialize};

use crate::kernel::console::{DEFAULT_MAX_TRANSCRIPT_LINES, DEFAULT_PROMPT};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub keybindings: Vec<KeybindingRule>,
    #[serde(default)]
    pub console: ConsoleSettings,
    #[serde(default)]
    pub editor: EditorSettings,
}

/// User override applied on top of the built-in keymap. An empty `command`
/// unbinds the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingRule {
    pub key: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    pub prompt: String,
    /// `encoding_rs` label used to decode command output; `None` selects the
    /// platform's native console encoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// `0` keeps every line.
    pub max_transcript_lines: usize,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            encoding: None,
            max_transcript_lines: DEFAULT_MAX_TRANSCRIPT_LINES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub tab_size: u8,
    pub show_line_numbers: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tab_size: 4,
            show_line_numbers: true,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
