//! Text buffer model.
//!
//! - rope-backed storage
//! - cursor as (row, column) in chars
//! - row/column ↔ char offset mapping

use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use std::io::{self, Write};

/// Borrows the slice as `&str` when it is contiguous, copies otherwise.
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: Rope,
    cursor: (usize, usize),
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: (0, 0),
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for chunk in self.rope.chunks() {
            writer.write_all(chunk.as_bytes())?;
        }
        Ok(())
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.min(self.len_lines().saturating_sub(1));
        let col = col.min(self.line_len_chars(row));
        self.cursor = (row, col);
    }

    /// Line content without its line terminator.
    pub fn line(&self, row: usize) -> Option<Cow<'_, str>> {
        if row >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(row);
        let len = line_len(line);
        Some(slice_to_cow(line.slice(..len)))
    }

    pub fn line_len_chars(&self, row: usize) -> usize {
        if row >= self.rope.len_lines() {
            return 0;
        }
        line_len(self.rope.line(row))
    }

    pub fn pos_to_char(&self, (row, col): (usize, usize)) -> usize {
        let row = row.min(self.len_lines().saturating_sub(1));
        self.rope.line_to_char(row) + col.min(self.line_len_chars(row))
    }

    fn cursor_char(&self) -> usize {
        self.pos_to_char(self.cursor)
    }

    fn set_cursor_char(&mut self, char_idx: usize) {
        let char_idx = char_idx.min(self.rope.len_chars());
        let row = self.rope.char_to_line(char_idx);
        let col = char_idx - self.rope.line_to_char(row);
        self.cursor = (row, col);
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.cursor_char();
        self.rope.insert_char(at, ch);
        self.set_cursor_char(at + 1);
    }

    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = self.cursor_char();
        self.rope.insert(at, text);
        self.set_cursor_char(at + text.chars().count());
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Returns false when there is nothing before the cursor.
    pub fn delete_backward(&mut self) -> bool {
        let at = self.cursor_char();
        if at == 0 {
            return false;
        }
        let start = if at >= 2
            && self.rope.char(at - 1) == '\n'
            && self.rope.char(at - 2) == '\r'
        {
            at - 2
        } else {
            at - 1
        };
        self.rope.remove(start..at);
        self.set_cursor_char(start);
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        let at = self.cursor_char();
        let len = self.rope.len_chars();
        if at >= len {
            return false;
        }
        let end = if self.rope.char(at) == '\r' && at + 1 < len && self.rope.char(at + 1) == '\n' {
            at + 2
        } else {
            at + 1
        };
        self.rope.remove(at..end);
        true
    }

    pub fn move_left(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col > 0 {
            self.cursor = (row, col - 1);
        } else if row > 0 {
            self.cursor = (row - 1, self.line_len_chars(row - 1));
        } else {
            return false;
        }
        true
    }

    pub fn move_right(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col < self.line_len_chars(row) {
            self.cursor = (row, col + 1);
        } else if row + 1 < self.len_lines() {
            self.cursor = (row + 1, 0);
        } else {
            return false;
        }
        true
    }

    pub fn move_up(&mut self) -> bool {
        let (row, col) = self.cursor;
        if row == 0 {
            return false;
        }
        self.cursor = (row - 1, col.min(self.line_len_chars(row - 1)));
        true
    }

    pub fn move_down(&mut self) -> bool {
        let (row, col) = self.cursor;
        if row + 1 >= self.len_lines() {
            return false;
        }
        self.cursor = (row + 1, col.min(self.line_len_chars(row + 1)));
        true
    }

    pub fn move_line_start(&mut self) -> bool {
        let changed = self.cursor.1 != 0;
        self.cursor.1 = 0;
        changed
    }

    pub fn move_line_end(&mut self) -> bool {
        let end = self.line_len_chars(self.cursor.0);
        let changed = self.cursor.1 != end;
        self.cursor.1 = end;
        changed
    }
}

fn line_len(line: RopeSlice<'_>) -> usize {
    let mut len = line.len_chars();
    if len > 0 && line.char(len - 1) == '\n' {
        len -= 1;
        if len > 0 && line.char(len - 1) == '\r' {
            len -= 1;
        }
    }
    len
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
