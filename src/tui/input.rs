// src/tui/input.rs
//! Text input state: a string, a cursor, and the editing operations the
//! key handler maps onto them. Used single-line for field edits and path
//! entry, multi-line for the job description.
//!
//! The cursor is a byte offset kept on a char boundary, so all editing is
//! unicode-safe without a grapheme dependency.

/// Editable text with a cursor.
#[derive(Debug, Clone)]
pub struct InputState {
    value: String,
    cursor: usize,
    multiline: bool,
}

impl InputState {
    pub fn single_line() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            multiline: false,
        }
    }

    pub fn multi_line() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            multiline: true,
        }
    }

    /// Prefill with a value, cursor at the end.
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor = self.value.len();
        self
    }

    /// Byte offset of the cursor inside `value()`, always on a char boundary.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn take_value(self) -> String {
        self.value
    }

    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    // ----- edits -----

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Bracketed paste: inserted wholesale at the cursor. Newlines are
    /// flattened to spaces in single-line inputs.
    pub fn insert_str(&mut self, text: &str) {
        let text = if self.multiline {
            text.replace('\r', "")
        } else {
            text.replace(['\r', '\n'], " ")
        };
        self.value.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    pub fn newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    // ----- cursor movement -----

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    /// Move up one line, keeping the column where possible.
    pub fn move_up(&mut self) {
        let col = self.column();
        let start = self.line_start(self.cursor);
        if start == 0 {
            return;
        }
        let prev_start = self.line_start(start - 1);
        self.cursor = self.clamp_to_line(prev_start, col);
    }

    /// Move down one line, keeping the column where possible.
    pub fn move_down(&mut self) {
        let col = self.column();
        let end = self.line_end(self.cursor);
        if end >= self.value.len() {
            return;
        }
        self.cursor = self.clamp_to_line(end + 1, col);
    }

    /// Cursor position as (line, column), both 0-based and counted in
    /// characters. Drives cursor rendering.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let line = self.value[..self.cursor].matches('\n').count();
        (line, self.column())
    }

    // ----- internals -----

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor].chars().next_back().map(|c| self.cursor - c.len_utf8())
    }

    fn line_start(&self, at: usize) -> usize {
        self.value[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, at: usize) -> usize {
        self.value[at..]
            .find('\n')
            .map(|i| at + i)
            .unwrap_or(self.value.len())
    }

    fn column(&self) -> usize {
        let start = self.line_start(self.cursor);
        self.value[start..self.cursor].chars().count()
    }

    /// Byte offset of character column `col` in the line starting at
    /// `line_start`, clamped to that line's end.
    fn clamp_to_line(&self, line_start: usize, col: usize) -> usize {
        let line_end = self.line_end(line_start);
        let mut offset = line_start;
        for (i, c) in self.value[line_start..line_end].chars().enumerate() {
            if i == col {
                return offset;
            }
            offset += c.len_utf8();
        }
        line_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut input = InputState::single_line();
        for c in "resume".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value(), "resume");

        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "resu");
    }

    #[test]
    fn test_insert_mid_string() {
        let mut input = InputState::single_line().with_value("rsum");
        input.move_left();
        input.move_left();
        input.move_left();
        input.insert_char('e');
        assert_eq!(input.value(), "resum");
        input.move_end();
        input.insert_char('e');
        assert_eq!(input.value(), "resume");
    }

    #[test]
    fn test_unicode_cursor_moves_whole_chars() {
        let mut input = InputState::single_line().with_value("ingénieur");
        for _ in 0..6 {
            input.move_left();
        }
        // Cursor now sits right after "ing"; removing once deletes 'g'.
        input.backspace();
        assert_eq!(input.value(), "inénieur");

        let mut input = InputState::single_line().with_value("été");
        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "é");
    }

    #[test]
    fn test_single_line_refuses_newline() {
        let mut input = InputState::single_line().with_value("one");
        input.newline();
        assert_eq!(input.value(), "one");

        input.insert_str("two\nthree");
        assert_eq!(input.value(), "onetwo three");
    }

    #[test]
    fn test_multiline_newline_and_columns() {
        let mut input = InputState::multi_line();
        input.insert_str("first line\nsecond");
        assert_eq!(input.cursor_line_col(), (1, 6));

        input.newline();
        input.insert_char('x');
        assert_eq!(input.cursor_line_col(), (2, 1));
        assert_eq!(input.value(), "first line\nsecond\nx");
    }

    #[test]
    fn test_move_up_down_keeps_column_when_possible() {
        let mut input = InputState::multi_line();
        input.insert_str("long first line\nab\nanother long line");
        // Cursor at the end of line 2.
        assert_eq!(input.cursor_line_col(), (2, 17));

        input.move_up();
        // Line "ab" is shorter: clamped to its end.
        assert_eq!(input.cursor_line_col(), (1, 2));

        input.move_up();
        assert_eq!(input.cursor_line_col(), (0, 2));

        input.move_down();
        input.move_down();
        assert_eq!(input.cursor_line_col(), (2, 2));
    }

    #[test]
    fn test_home_end_are_line_scoped() {
        let mut input = InputState::multi_line();
        input.insert_str("abc\ndefgh");
        input.move_home();
        assert_eq!(input.cursor_line_col(), (1, 0));
        input.move_end();
        assert_eq!(input.cursor_line_col(), (1, 5));
    }

    #[test]
    fn test_paste_strips_carriage_returns() {
        let mut input = InputState::multi_line();
        input.insert_str("line one\r\nline two");
        assert_eq!(input.value(), "line one\nline two");
    }

    #[test]
    fn test_char_count_counts_chars_not_bytes() {
        let input = InputState::multi_line().with_value(&"é".repeat(50));
        assert_eq!(input.char_count(), 50);
        assert_eq!(input.value().len(), 100);
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = InputState::single_line().with_value("abc");
        input.move_home();
        input.delete();
        assert_eq!(input.value(), "bc");
        input.move_end();
        input.delete();
        assert_eq!(input.value(), "bc");
    }
}
