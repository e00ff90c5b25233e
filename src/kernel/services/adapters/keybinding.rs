//! Key → command resolution, per focus context.

use crate::core::event::{Key, KeyCode, KeyModifiers};
use crate::core::Command;
use crate::kernel::services::ports::KeybindingRule;
use crate::kernel::FocusTarget;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingContext {
    Global,
    Editor,
    Explorer,
    Console,
}

impl KeybindingContext {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "global" => Some(Self::Global),
            "editor" => Some(Self::Editor),
            "explorer" | "sidebar" | "sidebar.explorer" => Some(Self::Explorer),
            "console" | "terminal" | "panel" => Some(Self::Console),
            _ => None,
        }
    }

    pub fn for_focus(focus: FocusTarget) -> Self {
        match focus {
            FocusTarget::Explorer => Self::Explorer,
            FocusTarget::Editor => Self::Editor,
            FocusTarget::Console => Self::Console,
        }
    }
}

pub struct KeybindingService {
    global: FxHashMap<Key, Command>,
    editor: FxHashMap<Key, Command>,
    explorer: FxHashMap<Key, Command>,
    console: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self {
            global: default_global_keybindings(),
            editor: default_editor_keybindings(),
            explorer: default_explorer_keybindings(),
            console: default_console_keybindings(),
        }
    }

    /// Context bindings win over global ones.
    pub fn resolve(&self, context: KeybindingContext, key: &Key) -> Option<&Command> {
        match context {
            KeybindingContext::Global => self.global.get(key),
            _ => self.map(context).get(key).or_else(|| self.global.get(key)),
        }
    }

    pub fn bind(&mut self, context: KeybindingContext, key: Key, command: Command) {
        self.map_mut(context).insert(key, command);
    }

    pub fn unbind(&mut self, context: KeybindingContext, key: &Key) -> Option<Command> {
        self.map_mut(context).remove(key)
    }

    /// Rules with an unparsable key, context or command are skipped with a
    /// warning.
    pub fn apply_rules(&mut self, rules: &[KeybindingRule]) {
        for rule in rules {
            let Some(key) = parse_keybinding(&rule.key) else {
                tracing::warn!(key = %rule.key, "ignoring keybinding with invalid key");
                continue;
            };
            let context = match rule.context.as_deref() {
                None => KeybindingContext::Global,
                Some(raw) => match KeybindingContext::parse(raw) {
                    Some(context) => context,
                    None => {
                        tracing::warn!(context = %raw, "ignoring keybinding with unknown context");
                        continue;
                    }
                },
            };
            if rule.command.trim().is_empty() {
                let _ = self.unbind(context, &key);
                continue;
            }
            match Command::from_name(rule.command.trim()) {
                Some(command) => self.bind(context, key, command),
                None => {
                    tracing::warn!(command = %rule.command, "ignoring keybinding with unknown command")
                }
            }
        }
    }

    fn map(&self, context: KeybindingContext) -> &FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &self.global,
            KeybindingContext::Editor => &self.editor,
            KeybindingContext::Explorer => &self.explorer,
            KeybindingContext::Console => &self.console,
        }
    }

    fn map_mut(&mut self, context: KeybindingContext) -> &mut FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &mut self.global,
            KeybindingContext::Editor => &mut self.editor,
            KeybindingContext::Explorer => &mut self.explorer,
            KeybindingContext::Console => &mut self.console,
        }
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `"ctrl+shift+s"`, `"F5"`, `"alt+1"` and similar.
pub fn parse_keybinding(value: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut key_part: Option<&str> = None;
    for part in value.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" | "option" => modifiers |= KeyModifiers::ALT,
            "super" | "meta" | "cmd" | "command" => modifiers |= KeyModifiers::SUPER,
            _ => key_part = Some(part),
        }
    }
    let mut code = parse_key_code(key_part?)?;
    if let KeyCode::Char(ch) = code {
        if ch.is_ascii_uppercase() {
            code = KeyCode::Char(ch.to_ascii_lowercase());
            modifiers |= KeyModifiers::SHIFT;
        }
    }
    Some(Key::new(code, modifiers))
}

fn parse_key_code(value: &str) -> Option<KeyCode> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    let v_lc = v.to_ascii_lowercase();
    let code = match v_lc.as_str() {
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        _ if v_lc.len() > 1 && v_lc.starts_with('f') => {
            let n = v_lc.strip_prefix('f')?.parse::<u8>().ok()?;
            KeyCode::F(n)
        }
        _ => {
            let mut chars = v.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(code)
}

fn default_global_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();

    bindings.insert(Key::ctrl(KeyCode::Char('q')), Command::Quit);
    bindings.insert(Key::ctrl(KeyCode::Char('s')), Command::Save);
    bindings.insert(
        Key::new(KeyCode::Char('s'), KeyModifiers::CONTROL | KeyModifiers::SHIFT),
        Command::SaveAs,
    );
    bindings.insert(Key::simple(KeyCode::F(12)), Command::SaveAs);
    bindings.insert(Key::ctrl(KeyCode::Char('o')), Command::OpenWorkspace);
    bindings.insert(Key::ctrl(KeyCode::Char('l')), Command::ClearConsole);
    bindings.insert(Key::simple(KeyCode::F(5)), Command::ReloadWorkspace);
    bindings.insert(Key::simple(KeyCode::Tab), Command::FocusNext);
    bindings.insert(Key::simple(KeyCode::BackTab), Command::FocusNext);
    bindings.insert(Key::shift(KeyCode::BackTab), Command::FocusNext);
    bindings.insert(
        Key::new(KeyCode::Char('1'), KeyModifiers::ALT),
        Command::FocusExplorer,
    );
    bindings.insert(
        Key::new(KeyCode::Char('2'), KeyModifiers::ALT),
        Command::FocusEditor,
    );
    bindings.insert(
        Key::new(KeyCode::Char('3'), KeyModifiers::ALT),
        Command::FocusConsole,
    );

    bindings
}

fn default_editor_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();

    bindings.insert(Key::simple(KeyCode::Left), Command::CursorLeft);
    bindings.insert(Key::simple(KeyCode::Right), Command::CursorRight);
    bindings.insert(Key::simple(KeyCode::Up), Command::CursorUp);
    bindings.insert(Key::simple(KeyCode::Down), Command::CursorDown);
    bindings.insert(Key::simple(KeyCode::Home), Command::CursorLineStart);
    bindings.insert(Key::simple(KeyCode::End), Command::CursorLineEnd);
    bindings.insert(Key::simple(KeyCode::Enter), Command::InsertNewline);
    bindings.insert(Key::simple(KeyCode::Tab), Command::InsertTab);
    bindings.insert(Key::simple(KeyCode::Backspace), Command::DeleteBackward);
    bindings.insert(Key::simple(KeyCode::Delete), Command::DeleteForward);

    bindings
}

fn default_explorer_keybindings() -> FxHashMap<Key, Command> {
    FxHashMap::default()
}

fn default_console_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();

    bindings.insert(Key::ctrl(KeyCode::Char('c')), Command::CancelCommand);

    bindings
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
