use super::*;
use crate::kernel::console::CommandOutcome;
use crate::kernel::PathPromptKind;
use crate::kernel::services::ports::Settings;
use crate::models::{FileTree, NodeKind};
use std::ffi::OsString;
use std::path::PathBuf;

fn new_store() -> Store {
    let mut tree = FileTree::new(OsString::from("w"), PathBuf::from("/w"));
    let root = tree.root();
    tree.insert_child(root, OsString::from("a.py"), NodeKind::File);
    Store::new(AppState::new(tree, &Settings::default()))
}

fn submit(store: &mut Store, line: &str) -> DispatchResult {
    store.dispatch(Action::ConsoleSubmitLine(line.to_string()))
}

fn spawned_id(result: &DispatchResult) -> u64 {
    match result.effects.as_slice() {
        [Effect::SpawnCommand { request, cwd }] => {
            assert_eq!(cwd, &PathBuf::from("/w"));
            request.id
        }
        other => panic!("expected one spawn effect, got {other:?}"),
    }
}

#[test]
fn test_open_path_emits_load_effect() {
    let mut store = new_store();
    let result = store.dispatch(Action::OpenPath(PathBuf::from("/w/a.py")));
    assert!(!result.state_changed);
    assert_eq!(result.effects, vec![Effect::LoadFile(PathBuf::from("/w/a.py"))]);
}

#[test]
fn test_file_loaded_replaces_session() {
    let mut store = new_store();
    store.state.ui.notice = Some("old".to_string());
    let result = store.dispatch(Action::FileLoaded {
        path: PathBuf::from("/w/a.py"),
        content: "print(1)\n".to_string(),
    });

    assert!(result.state_changed);
    let session = &store.state().session;
    assert!(session.is_saved());
    assert_eq!(session.buffer().text(), "print(1)\n");
    assert!(store.state().ui.notice.is_none());
}

#[test]
fn test_file_load_error_sets_notice() {
    let mut store = new_store();
    store.dispatch(Action::FileLoadError {
        path: PathBuf::from("/w/missing"),
        error: "not found".to_string(),
    });
    assert_eq!(
        store.state().ui.notice.as_deref(),
        Some("Cannot open /w/missing: not found")
    );
}

#[test]
fn test_edit_commands_mark_unsaved() {
    let mut store = new_store();
    store.dispatch(Action::OpenNewPath(PathBuf::from("/w/new.txt")));

    assert!(store.dispatch(Action::RunCommand(Command::InsertChar('a'))).state_changed);
    assert!(store.dispatch(Action::RunCommand(Command::InsertTab)).state_changed);
    assert!(store.dispatch(Action::RunCommand(Command::InsertNewline)).state_changed);
    assert_eq!(store.state().session.buffer().text(), "a    \n");
    assert!(!store.state().session.is_saved());

    assert!(!store.dispatch(Action::RunCommand(Command::CursorDown)).state_changed);
    assert!(store.dispatch(Action::RunCommand(Command::CursorUp)).state_changed);
}

fn type_path(store: &mut Store, text: &str) {
    for ch in text.chars() {
        store.dispatch(Action::PathPromptInsert(ch));
    }
}

fn clear_path_prompt(store: &mut Store) {
    while store.dispatch(Action::PathPromptBackspace).state_changed {}
}

#[test]
fn test_save_without_path_opens_save_as_prompt() {
    let mut store = new_store();
    let result = store.dispatch(Action::RunCommand(Command::Save));
    assert!(result.effects.is_empty());
    assert!(result.state_changed);

    let prompt = store.state().ui.path_prompt.as_ref().unwrap();
    assert_eq!(prompt.kind(), PathPromptKind::SaveAs);
    assert_eq!(
        prompt.input().text(),
        format!("/w{}", std::path::MAIN_SEPARATOR)
    );
}

#[test]
fn test_save_as_writes_untitled_buffer_to_relative_path() {
    let mut store = new_store();
    store.dispatch(Action::RunCommand(Command::InsertChar('x')));
    store.dispatch(Action::RunCommand(Command::SaveAs));
    clear_path_prompt(&mut store);
    type_path(&mut store, "notes/b.go");

    let result = store.dispatch(Action::PathPromptSubmit);
    let expected = PathBuf::from("/w").join("notes/b.go");
    let version = match result.effects.as_slice() {
        [Effect::WriteFile {
            path,
            content,
            version,
        }] => {
            assert_eq!(path, &expected);
            assert_eq!(content, "x");
            *version
        }
        other => panic!("expected one write effect, got {other:?}"),
    };
    assert!(store.state().ui.path_prompt.is_none());
    assert_eq!(store.state().session.path(), Some(expected.as_path()));
    assert!(!store.state().session.is_saved());
    assert!(store
        .state()
        .session
        .file_info_line()
        .contains("Syntax: Go"));

    store.dispatch(Action::FileSaved {
        path: expected,
        version,
    });
    assert!(store.state().session.is_saved());
}

#[test]
fn test_save_as_prefills_current_path_and_accepts_absolute_input() {
    let mut store = new_store();
    store.dispatch(Action::FileLoaded {
        path: PathBuf::from("/w/a.py"),
        content: "print()".to_string(),
    });
    store.dispatch(Action::RunCommand(Command::SaveAs));
    assert_eq!(
        store.state().ui.path_prompt.as_ref().unwrap().input().text(),
        "/w/a.py"
    );

    clear_path_prompt(&mut store);
    type_path(&mut store, "/elsewhere/copy.py");
    let result = store.dispatch(Action::PathPromptSubmit);
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::WriteFile { path, content, .. }]
            if path == &PathBuf::from("/elsewhere/copy.py") && content == "print()"
    ));
}

#[test]
fn test_open_workspace_prompt_emits_load_workspace() {
    let mut store = new_store();
    store.dispatch(Action::RunCommand(Command::OpenWorkspace));
    let prompt = store.state().ui.path_prompt.as_ref().unwrap();
    assert_eq!(prompt.kind(), PathPromptKind::OpenWorkspace);
    assert_eq!(prompt.input().text(), "/w");

    clear_path_prompt(&mut store);
    type_path(&mut store, "/other");
    let result = store.dispatch(Action::PathPromptSubmit);
    assert_eq!(
        result.effects,
        vec![Effect::LoadWorkspace(PathBuf::from("/other"))]
    );
    assert!(store.state().ui.path_prompt.is_none());
}

#[test]
fn test_path_prompt_cancel_and_blank_submit_do_nothing() {
    let mut store = new_store();
    store.dispatch(Action::RunCommand(Command::OpenWorkspace));
    let result = store.dispatch(Action::PathPromptCancel);
    assert!(result.effects.is_empty());
    assert!(store.state().ui.path_prompt.is_none());

    store.dispatch(Action::RunCommand(Command::SaveAs));
    clear_path_prompt(&mut store);
    type_path(&mut store, "   ");
    let result = store.dispatch(Action::PathPromptSubmit);
    assert!(result.effects.is_empty());
    assert!(store.state().ui.path_prompt.is_none());
    assert!(store.state().session.path().is_none());
}

#[test]
fn test_path_prompt_actions_ignored_when_closed() {
    let mut store = new_store();
    let result = store.dispatch(Action::PathPromptInsert('x'));
    assert!(!result.state_changed);
    let result = store.dispatch(Action::PathPromptSubmit);
    assert!(result.effects.is_empty());
}

#[test]
fn test_save_round_trip() {
    let mut store = new_store();
    let path = PathBuf::from("/w/a.py");
    store.dispatch(Action::FileLoaded {
        path: path.clone(),
        content: String::new(),
    });
    store.dispatch(Action::RunCommand(Command::InsertChar('x')));

    let result = store.dispatch(Action::RunCommand(Command::Save));
    let version = match result.effects.as_slice() {
        [Effect::WriteFile {
            path: p,
            content,
            version,
        }] => {
            assert_eq!(p, &path);
            assert_eq!(content, "x");
            *version
        }
        other => panic!("unexpected effects {other:?}"),
    };

    assert!(store.dispatch(Action::FileSaved { path, version }).state_changed);
    assert!(store.state().session.is_saved());
}

#[test]
fn test_save_error_keeps_unsaved() {
    let mut store = new_store();
    store.dispatch(Action::OpenNewPath(PathBuf::from("/ro/a.txt")));
    store.dispatch(Action::FileSaveError {
        path: PathBuf::from("/ro/a.txt"),
        error: "denied".to_string(),
    });
    assert!(!store.state().session.is_saved());
    assert_eq!(
        store.state().ui.notice.as_deref(),
        Some("Cannot save /ro/a.txt: denied")
    );
}

#[test]
fn test_console_typing_and_submit() {
    let mut store = new_store();
    for ch in "ls".chars() {
        store.dispatch(Action::ConsoleInsert(ch));
    }
    assert_eq!(store.state().console.prompt().display(), ">>> ls");
    assert!(store.dispatch(Action::ConsoleBackspace).state_changed);

    let result = store.dispatch(Action::ConsoleSubmit);
    assert!(result.state_changed);
    spawned_id(&result);
    assert!(store.state().console.prompt().is_reset());
}

#[test]
fn test_blank_submit_has_no_effect() {
    let mut store = new_store();
    let result = store.dispatch(Action::ConsoleSubmit);
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn test_queued_command_starts_after_finish() {
    let mut store = new_store();
    let first = spawned_id(&submit(&mut store, "echo A"));

    let queued = submit(&mut store, "echo B");
    assert!(queued.effects.is_empty());
    assert_eq!(
        store.state().ui.notice.as_deref(),
        Some("Command queued (1 pending)")
    );

    let output = store.dispatch(Action::ConsoleOutput {
        id: first,
        line: "A".to_string(),
    });
    assert!(output.state_changed);

    let finished = store.dispatch(Action::ConsoleFinished {
        id: first,
        outcome: CommandOutcome::Exited { code: Some(0) },
    });
    let second = spawned_id(&finished);
    assert_ne!(first, second);
    assert_eq!(
        store.state().console.transcript().to_vec(),
        vec!["» echo A".to_string(), "A".to_string(), "» echo B".to_string()]
    );
}

#[test]
fn test_stale_finish_is_ignored() {
    let mut store = new_store();
    let id = spawned_id(&submit(&mut store, "true"));
    let result = store.dispatch(Action::ConsoleFinished {
        id: id + 7,
        outcome: CommandOutcome::Cancelled,
    });
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn test_cancel_command() {
    let mut store = new_store();
    assert!(store
        .dispatch(Action::RunCommand(Command::CancelCommand))
        .effects
        .is_empty());

    let id = spawned_id(&submit(&mut store, "sleep 5"));
    let result = store.dispatch(Action::RunCommand(Command::CancelCommand));
    assert_eq!(result.effects, vec![Effect::CancelCommand(id)]);

    let again = store.dispatch(Action::RunCommand(Command::CancelCommand));
    assert!(again.effects.is_empty());
}

#[test]
fn test_clear_console() {
    let mut store = new_store();
    assert!(!store.dispatch(Action::RunCommand(Command::ClearConsole)).state_changed);

    store.dispatch(Action::ConsoleInsert('x'));
    assert!(store.dispatch(Action::RunCommand(Command::ClearConsole)).state_changed);
    assert!(store.state().console.prompt().is_reset());

    assert!(submit(&mut store, "cls").state_changed);
    assert!(store.state().console.transcript().is_empty());
}

#[test]
fn test_focus_commands() {
    let mut store = new_store();
    assert!(store.dispatch(Action::RunCommand(Command::FocusNext)).state_changed);
    assert_eq!(store.state().ui.focus, FocusTarget::Console);
    assert!(!store.dispatch(Action::RunCommand(Command::FocusConsole)).state_changed);
    store.dispatch(Action::RunCommand(Command::FocusExplorer));
    assert_eq!(store.state().ui.focus, FocusTarget::Explorer);
}

#[test]
fn test_quit_sets_flag() {
    let mut store = new_store();
    store.dispatch(Action::RunCommand(Command::Quit));
    assert!(store.state().ui.should_quit);
}

#[test]
fn test_reload_workspace_effect() {
    let mut store = new_store();
    let result = store.dispatch(Action::RunCommand(Command::ReloadWorkspace));
    assert_eq!(result.effects, vec![Effect::LoadWorkspace(PathBuf::from("/w"))]);
}

#[test]
fn test_workspace_loaded_replaces_tree() {
    let mut store = new_store();
    let tree = FileTree::new(OsString::from("other"), PathBuf::from("/other"));
    store.dispatch(Action::WorkspaceLoaded { tree });
    assert_eq!(store.state().workspace_root(), std::path::Path::new("/other"));
    assert!(store.state().explorer.rows().is_empty());
}

#[test]
fn test_explorer_activate_file() {
    let mut store = new_store();
    let result = store.dispatch(Action::ExplorerActivate);
    assert_eq!(result.effects, vec![Effect::LoadFile(PathBuf::from("/w/a.py"))]);
}
