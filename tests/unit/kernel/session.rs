use super::*;
use std::path::{Path, PathBuf};

fn insert(session: &mut EditorSession, ch: char) -> bool {
    session.edit(|b| {
        b.insert_char(ch);
        true
    })
}

#[test]
fn test_default_session_is_untitled() {
    let session = EditorSession::default();
    assert!(session.path().is_none());
    assert!(!session.is_saved());
    assert_eq!(session.status_line(), "Line: 1 | File not saved");
    assert_eq!(
        session.file_info_line(),
        "Current File: None | Status: Unsaved | Syntax: Plain Text | Encoding: UTF-8"
    );
}

#[test]
fn test_open_sets_saved_and_syntax() {
    let mut session = EditorSession::default();
    session.open(PathBuf::from("/w/src/main.py"), "a\nb\nc");

    assert!(session.is_saved());
    assert_eq!(session.syntax(), SyntaxStyle::Python);
    assert_eq!(session.file_name().as_deref(), Some("main.py"));
    assert_eq!(session.status_line(), "Line: 3 | main.py");
    assert_eq!(
        session.file_info_line(),
        "Current File: main.py | Status: Saved | Syntax: Python | Encoding: UTF-8"
    );
}

#[test]
fn test_open_new_is_unsaved_and_empty() {
    let mut session = EditorSession::default();
    session.open_new(PathBuf::from("/w/new.go"));

    assert!(!session.is_saved());
    assert!(session.buffer().is_empty());
    assert_eq!(session.syntax(), SyntaxStyle::Go);
}

#[test]
fn test_save_as_keeps_buffer_and_retargets() {
    let mut session = EditorSession::default();
    session.open(PathBuf::from("/w/notes.txt"), "body");
    let version = session.version();

    session.save_as(PathBuf::from("/w/notes.lua"));
    assert_eq!(session.buffer().text(), "body");
    assert!(!session.is_saved());
    assert_eq!(session.syntax(), SyntaxStyle::Lua);
    assert_eq!(session.file_name().as_deref(), Some("notes.lua"));

    assert!(!session.mark_saved(Path::new("/w/notes.txt"), version));
    assert!(session.mark_saved(Path::new("/w/notes.lua"), version));
    assert!(session.is_saved());
}

#[test]
fn test_edit_marks_unsaved_and_bumps_version() {
    let mut session = EditorSession::default();
    session.open(PathBuf::from("/w/a.txt"), "");
    let before = session.version();

    assert!(insert(&mut session, 'x'));
    assert!(!session.is_saved());
    assert_eq!(session.version(), before + 1);

    assert!(!session.edit(|_| false));
    assert_eq!(session.version(), before + 1);
}

#[test]
fn test_cursor_motion_keeps_saved_status() {
    let mut session = EditorSession::default();
    session.open(PathBuf::from("/w/a.txt"), "ab");
    assert!(session.move_cursor(TextBuffer::move_right));
    assert!(session.is_saved());
}

#[test]
fn test_mark_saved_requires_matching_version() {
    let path = PathBuf::from("/w/a.txt");
    let mut session = EditorSession::default();
    session.open(path.clone(), "");
    insert(&mut session, 'a');
    let written = session.version();

    insert(&mut session, 'b');
    assert!(session.mark_saved(&path, written));
    assert!(!session.is_saved());

    assert!(session.mark_saved(&path, session.version()));
    assert!(session.is_saved());
}

#[test]
fn test_mark_saved_ignores_other_paths() {
    let mut session = EditorSession::default();
    session.open(PathBuf::from("/w/a.txt"), "");
    insert(&mut session, 'a');

    assert!(!session.mark_saved(Path::new("/w/b.txt"), session.version()));
    assert!(!session.is_saved());
}
