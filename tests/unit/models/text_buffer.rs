use super::*;

#[test]
fn test_text_buffer_basic() {
    let mut buffer = TextBuffer::from_text("hello\nworld");

    assert_eq!(buffer.len_lines(), 2);
    assert_eq!(buffer.cursor(), (0, 0));

    buffer.set_cursor(1, 2);
    assert_eq!(buffer.cursor(), (1, 2));
}

#[test]
fn test_set_cursor_clamps() {
    let mut buffer = TextBuffer::from_text("ab\nc");
    buffer.set_cursor(9, 9);
    assert_eq!(buffer.cursor(), (1, 1));
    buffer.set_cursor(0, 9);
    assert_eq!(buffer.cursor(), (0, 2));
}

#[test]
fn test_pos_to_char() {
    let buffer = TextBuffer::from_text("hello\nworld");

    assert_eq!(buffer.pos_to_char((0, 0)), 0);
    assert_eq!(buffer.pos_to_char((1, 0)), 6);
    assert_eq!(buffer.pos_to_char((0, 99)), 5);
}

#[test]
fn test_empty_buffer_has_one_line() {
    let buffer = TextBuffer::new();
    assert!(buffer.is_empty());
    assert_eq!(buffer.len_lines(), 1);
    assert_eq!(buffer.line(0).as_deref(), Some(""));
    assert_eq!(buffer.line(1), None);
}

#[test]
fn test_line_strips_terminators() {
    let buffer = TextBuffer::from_text("one\r\ntwo\nthree");
    assert_eq!(buffer.line(0).as_deref(), Some("one"));
    assert_eq!(buffer.line(1).as_deref(), Some("two"));
    assert_eq!(buffer.line(2).as_deref(), Some("three"));
    assert_eq!(buffer.line_len_chars(0), 3);
}

#[test]
fn test_insert_and_newline_move_cursor() {
    let mut buffer = TextBuffer::new();
    buffer.insert_char('a');
    buffer.insert_newline();
    buffer.insert_str("bc");

    assert_eq!(buffer.text(), "a\nbc");
    assert_eq!(buffer.cursor(), (1, 2));
}

#[test]
fn test_insert_multibyte() {
    let mut buffer = TextBuffer::from_text("ab");
    buffer.set_cursor(0, 1);
    buffer.insert_str("日本");
    assert_eq!(buffer.text(), "a日本b");
    assert_eq!(buffer.cursor(), (0, 3));
}

#[test]
fn test_delete_backward_joins_lines() {
    let mut buffer = TextBuffer::from_text("ab\ncd");
    buffer.set_cursor(1, 0);

    assert!(buffer.delete_backward());
    assert_eq!(buffer.text(), "abcd");
    assert_eq!(buffer.cursor(), (0, 2));
}

#[test]
fn test_delete_backward_removes_crlf_as_unit() {
    let mut buffer = TextBuffer::from_text("ab\r\ncd");
    buffer.set_cursor(1, 0);

    assert!(buffer.delete_backward());
    assert_eq!(buffer.text(), "abcd");
}

#[test]
fn test_delete_at_edges_is_noop() {
    let mut buffer = TextBuffer::from_text("x");
    assert!(!buffer.delete_backward());
    buffer.set_cursor(0, 1);
    assert!(!buffer.delete_forward());
    assert_eq!(buffer.text(), "x");
}

#[test]
fn test_delete_forward() {
    let mut buffer = TextBuffer::from_text("a\r\nb");
    buffer.set_cursor(0, 1);

    assert!(buffer.delete_forward());
    assert_eq!(buffer.text(), "ab");
    assert_eq!(buffer.cursor(), (0, 1));
}

#[test]
fn test_horizontal_motion_wraps_lines() {
    let mut buffer = TextBuffer::from_text("ab\nc");
    buffer.set_cursor(0, 2);

    assert!(buffer.move_right());
    assert_eq!(buffer.cursor(), (1, 0));
    assert!(buffer.move_left());
    assert_eq!(buffer.cursor(), (0, 2));

    buffer.set_cursor(0, 0);
    assert!(!buffer.move_left());
    buffer.set_cursor(1, 1);
    assert!(!buffer.move_right());
}

#[test]
fn test_vertical_motion_clamps_column() {
    let mut buffer = TextBuffer::from_text("long line\nab\nlonger");
    buffer.set_cursor(0, 8);

    assert!(buffer.move_down());
    assert_eq!(buffer.cursor(), (1, 2));
    assert!(buffer.move_down());
    assert_eq!(buffer.cursor(), (2, 2));
    assert!(!buffer.move_down());
    assert!(buffer.move_up());
    assert!(buffer.move_up());
    assert!(!buffer.move_up());
}

#[test]
fn test_line_start_end() {
    let mut buffer = TextBuffer::from_text("hello");
    assert!(!buffer.move_line_start());
    assert!(buffer.move_line_end());
    assert_eq!(buffer.cursor(), (0, 5));
    assert!(!buffer.move_line_end());
}

#[test]
fn test_write_to() {
    let buffer = TextBuffer::from_text("a\nb\n");
    let mut out = Vec::new();
    buffer.write_to(&mut out).unwrap();
    assert_eq!(out, b"a\nb\n");
}
