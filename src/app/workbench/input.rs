use super::Workbench;
use crate::core::event::{InputEvent, Key, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crate::core::Command;
use crate::kernel::services::adapters::KeybindingContext;
use crate::kernel::{Action as KernelAction, FocusTarget};

pub(super) fn handle_input(workbench: &mut Workbench, event: &InputEvent) -> bool {
    match event {
        InputEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(workbench, key),
        InputEvent::Key(_) => false,
        InputEvent::Paste(text) => handle_paste(workbench, text),
        InputEvent::Resize(..) => true,
        InputEvent::FocusGained | InputEvent::FocusLost => false,
    }
}

fn handle_key(workbench: &mut Workbench, event: &KeyEvent) -> bool {
    if workbench.state().ui.path_prompt.is_some() {
        return handle_path_prompt_key(workbench, event);
    }

    let focus = workbench.focus();
    let key = Key::from(event);
    if let Some(command) = workbench
        .keybindings
        .resolve(KeybindingContext::for_focus(focus), &key)
        .cloned()
    {
        return workbench.dispatch_kernel(KernelAction::RunCommand(command));
    }

    match focus {
        FocusTarget::Console => handle_console_key(workbench, event),
        FocusTarget::Editor => match typed_char(event) {
            Some(ch) => workbench.dispatch_kernel(KernelAction::RunCommand(Command::InsertChar(ch))),
            None => false,
        },
        FocusTarget::Explorer => handle_explorer_key(workbench, event),
    }
}

/// The path prompt owns the keyboard; only the global quit binding gets through.
fn handle_path_prompt_key(workbench: &mut Workbench, event: &KeyEvent) -> bool {
    let action = match event.code {
        KeyCode::Enter => KernelAction::PathPromptSubmit,
        KeyCode::Esc => KernelAction::PathPromptCancel,
        KeyCode::Backspace => KernelAction::PathPromptBackspace,
        _ => match typed_char(event) {
            Some(ch) => KernelAction::PathPromptInsert(ch),
            None => {
                let quit = matches!(
                    workbench
                        .keybindings
                        .resolve(KeybindingContext::Global, &Key::from(event)),
                    Some(Command::Quit)
                );
                return quit && workbench.dispatch_kernel(KernelAction::RunCommand(Command::Quit));
            }
        },
    };
    workbench.dispatch_kernel(action)
}

fn handle_console_key(workbench: &mut Workbench, event: &KeyEvent) -> bool {
    let action = match event.code {
        KeyCode::Enter => KernelAction::ConsoleSubmit,
        KeyCode::Backspace => KernelAction::ConsoleBackspace,
        _ => match typed_char(event) {
            Some(ch) => KernelAction::ConsoleInsert(ch),
            None => return false,
        },
    };
    workbench.dispatch_kernel(action)
}

fn handle_explorer_key(workbench: &mut Workbench, event: &KeyEvent) -> bool {
    let page = workbench
        .last_explorer_view_height
        .map(|h| h.max(1) as isize)
        .unwrap_or(10);
    let action = match event.code {
        KeyCode::Up => KernelAction::ExplorerMoveSelection { delta: -1 },
        KeyCode::Down => KernelAction::ExplorerMoveSelection { delta: 1 },
        KeyCode::PageUp => KernelAction::ExplorerMoveSelection { delta: -page },
        KeyCode::PageDown => KernelAction::ExplorerMoveSelection { delta: page },
        KeyCode::Enter | KeyCode::Right => KernelAction::ExplorerActivate,
        KeyCode::Left => KernelAction::ExplorerCollapse,
        _ => return false,
    };
    workbench.dispatch_kernel(action)
}

fn handle_paste(workbench: &mut Workbench, text: &str) -> bool {
    let mut changed = false;
    if workbench.state().ui.path_prompt.is_some() {
        for ch in text.chars().filter(|c| !c.is_control()) {
            changed |= workbench.dispatch_kernel(KernelAction::PathPromptInsert(ch));
        }
        return changed;
    }
    match workbench.focus() {
        FocusTarget::Console => {
            // Each pasted line is submitted as its own command.
            let mut lines = text.split('\n').peekable();
            while let Some(line) = lines.next() {
                for ch in line.chars().filter(|c| !c.is_control()) {
                    changed |= workbench.dispatch_kernel(KernelAction::ConsoleInsert(ch));
                }
                if lines.peek().is_some() {
                    changed |= workbench.dispatch_kernel(KernelAction::ConsoleSubmit);
                }
            }
        }
        FocusTarget::Editor => {
            for ch in text.chars() {
                let command = match ch {
                    '\n' => Command::InsertNewline,
                    '\r' => continue,
                    ch => Command::InsertChar(ch),
                };
                changed |= workbench.dispatch_kernel(KernelAction::RunCommand(command));
            }
        }
        FocusTarget::Explorer => {}
    }
    changed
}

fn typed_char(event: &KeyEvent) -> Option<char> {
    let KeyCode::Char(ch) = event.code else {
        return None;
    };
    if event.modifiers.contains(KeyModifiers::CONTROL) || event.modifiers.contains(KeyModifiers::ALT)
    {
        return None;
    }
    Some(ch)
}
