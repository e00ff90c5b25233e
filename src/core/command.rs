//! Semantic commands, independent of the keys that trigger them.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // cursor
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorLineStart,
    CursorLineEnd,

    // editing
    InsertChar(char),
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,

    // files / workspace
    Save,
    SaveAs,
    OpenWorkspace,
    ReloadWorkspace,

    // console
    ClearConsole,
    CancelCommand,

    // view
    FocusNext,
    FocusExplorer,
    FocusEditor,
    FocusConsole,

    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CursorLeft => "cursorLeft",
            Command::CursorRight => "cursorRight",
            Command::CursorUp => "cursorUp",
            Command::CursorDown => "cursorDown",
            Command::CursorLineStart => "cursorLineStart",
            Command::CursorLineEnd => "cursorLineEnd",
            Command::InsertChar(_) => "insertChar",
            Command::InsertNewline => "insertNewline",
            Command::InsertTab => "insertTab",
            Command::DeleteBackward => "deleteBackward",
            Command::DeleteForward => "deleteForward",
            Command::Save => "save",
            Command::SaveAs => "saveAs",
            Command::OpenWorkspace => "openWorkspace",
            Command::ReloadWorkspace => "reloadWorkspace",
            Command::ClearConsole => "clearConsole",
            Command::CancelCommand => "cancelCommand",
            Command::FocusNext => "focusNext",
            Command::FocusExplorer => "focusExplorer",
            Command::FocusEditor => "focusEditor",
            Command::FocusConsole => "focusConsole",
            Command::Quit => "quit",
        }
    }

    /// Parses a command name; `insertChar` has no name form.
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name {
            "cursorLeft" => Command::CursorLeft,
            "cursorRight" => Command::CursorRight,
            "cursorUp" => Command::CursorUp,
            "cursorDown" => Command::CursorDown,
            "cursorLineStart" => Command::CursorLineStart,
            "cursorLineEnd" => Command::CursorLineEnd,
            "insertNewline" => Command::InsertNewline,
            "insertTab" => Command::InsertTab,
            "deleteBackward" => Command::DeleteBackward,
            "deleteForward" => Command::DeleteForward,
            "save" => Command::Save,
            "saveAs" => Command::SaveAs,
            "openWorkspace" => Command::OpenWorkspace,
            "reloadWorkspace" => Command::ReloadWorkspace,
            "clearConsole" => Command::ClearConsole,
            "cancelCommand" => Command::CancelCommand,
            "focusNext" => Command::FocusNext,
            "focusExplorer" => Command::FocusExplorer,
            "focusEditor" => Command::FocusEditor,
            "focusConsole" => Command::FocusConsole,
            "quit" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    pub fn is_edit_command(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::InsertNewline
                | Command::InsertTab
                | Command::DeleteBackward
                | Command::DeleteForward
        )
    }

    pub fn is_cursor_command(&self) -> bool {
        matches!(
            self,
            Command::CursorLeft
                | Command::CursorRight
                | Command::CursorUp
                | Command::CursorDown
                | Command::CursorLineStart
                | Command::CursorLineEnd
        )
    }
}
