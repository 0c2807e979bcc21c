use ropey::Rope;

/// Caret position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, counted in characters.
    pub col: usize,
    /// Column to aim for on vertical moves.
    col_memory: usize,
}

impl Cursor {
    pub const fn new() -> Self {
        Self::at(0, 0)
    }

    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The document buffer: the only copy of the README text.
///
/// Lines are separated by `'\n'` alone. A `'\r'` before the break is part of
/// the stored text but is hidden from line content and never reachable by
/// the caret, so CRLF files survive an edit session byte for byte.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    dirty: bool,
}

impl EditorBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            dirty: false,
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Replace the whole document and put the caret at the start.
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::new();
        self.dirty = false;
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the text was edited since it was loaded or exported.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its line break.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let content_len = self.line_len(line_idx);
        Some(self.rope.line(line_idx).slice(..content_len).to_string())
    }

    /// Length of a line in characters, without its line break.
    pub fn line_len(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(line_idx);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && line.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.cursor_char_idx();
        self.rope.insert_char(idx, ch);
        if ch == '\n' {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        } else {
            self.cursor.set_col(self.cursor.col + 1);
        }
        self.dirty = true;
    }

    /// Insert text at the caret and leave the caret after it.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let idx = self.cursor_char_idx();
        self.rope.insert(idx, s);

        let end = self.rope.char_to_line(idx + s.chars().count()).min(self.line_count() - 1);
        let col = idx + s.chars().count() - self.rope.line_to_char(end);
        self.cursor.line = end;
        self.cursor.set_col(col);
        self.dirty = true;
    }

    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Backspace. Returns `false` at the start of the document.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }

        let idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            let prev = self.cursor.line - 1;
            let prev_len = self.line_len(prev);
            let break_start = self.rope.line_to_char(prev) + prev_len;
            self.rope.remove(break_start..idx);
            self.cursor.line = prev;
            self.cursor.set_col(prev_len);
        } else {
            self.rope.remove(idx - 1..idx);
            self.cursor.set_col(self.cursor.col - 1);
        }
        self.dirty = true;
        true
    }

    /// Delete key. Returns `false` at the end of the document.
    pub fn delete_forward(&mut self) -> bool {
        let line_len = self.line_len(self.cursor.line);
        let last_line = self.cursor.line + 1 >= self.line_count();

        if self.cursor.col >= line_len && last_line {
            return false;
        }

        let idx = self.cursor_char_idx();
        if self.cursor.col >= line_len {
            let next_start = self.rope.line_to_char(self.cursor.line + 1);
            self.rope.remove(idx..next_start);
        } else {
            self.rope.remove(idx..=idx);
        }
        self.dirty = true;
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_vertical(-1),
            Direction::Down => self.move_vertical(1),
        }
    }

    /// Move up or down by `delta` lines, keeping the remembered column.
    pub fn move_lines(&mut self, delta: isize) {
        self.move_vertical(delta);
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        self.cursor.set_col(self.line_len(self.cursor.line));
    }

    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let chars: Vec<char> = self.line_chars(self.cursor.line);
        let mut col = self.cursor.col.min(chars.len());
        while col > 0 && !is_word_char(chars[col - 1]) {
            col -= 1;
        }
        while col > 0 && is_word_char(chars[col - 1]) {
            col -= 1;
        }
        self.cursor.set_col(col);
    }

    pub fn move_word_right(&mut self) {
        let chars: Vec<char> = self.line_chars(self.cursor.line);

        if self.cursor.col >= chars.len() {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let mut col = self.cursor.col;
        while col < chars.len() && is_word_char(chars[col]) {
            col += 1;
        }
        while col < chars.len() && !is_word_char(chars[col]) {
            col += 1;
        }
        self.cursor.set_col(col);
    }

    /// Move to a position, clamped to the document.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        self.cursor.set_col(col.min(self.line_len(self.cursor.line)));
    }

    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    fn line_chars(&self, line_idx: usize) -> Vec<char> {
        let len = self.line_len(line_idx);
        self.rope.line(line_idx).chars().take(len).collect()
    }

    fn cursor_char_idx(&self) -> usize {
        let line = self.cursor.line.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line) + self.cursor.col.min(self.line_len(line))
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.set_col(self.cursor.col - 1);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.line) {
            self.cursor.set_col(self.cursor.col + 1);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let max_line = self.line_count().saturating_sub(1);
        let target = self.cursor.line.saturating_add_signed(delta).min(max_line);
        if target == self.cursor.line {
            return;
        }
        self.cursor.line = target;
        self.cursor.col = self.cursor.col_memory.min(self.line_len(target));
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let buf = EditorBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(1), Some(String::new()));
        assert_eq!(buf.line_at(2), None);
    }

    #[test]
    fn test_line_count_matches_newline_split() {
        for text in ["", "a", "a\n", "a\r\nb", "\n\n\n", "x\ry"] {
            let buf = EditorBuffer::from_text(text);
            assert_eq!(buf.line_count(), text.split('\n').count(), "{text:?}");
        }
    }

    #[test]
    fn test_crlf_hidden_from_line_content() {
        let buf = EditorBuffer::from_text("ab\r\ncd");
        assert_eq!(buf.line_at(0), Some("ab".to_string()));
        assert_eq!(buf.line_len(0), 2);
        assert_eq!(buf.text(), "ab\r\ncd");
    }

    #[test]
    fn test_line_len_counts_chars() {
        let buf = EditorBuffer::from_text("héllo 🚀\nhi");
        assert_eq!(buf.line_len(0), 7);
        assert_eq!(buf.line_len(1), 2);
    }

    #[test]
    fn test_replace_all_resets_caret_and_dirty() {
        let mut buf = EditorBuffer::from_text("old");
        buf.move_end();
        buf.insert_char('!');
        buf.replace_all("# New\nbody");
        assert_eq!(buf.text(), "# New\nbody");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_insert_marks_dirty_and_mark_clean_resets() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.insert_char('!');
        assert!(buf.is_dirty());
        buf.mark_clean();
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_insert_char_in_middle() {
        let mut buf = EditorBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right);
        buf.insert_char('e');
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_after_multibyte_char() {
        let mut buf = EditorBuffer::from_text("é");
        buf.move_end();
        buf.insert_char('x');
        assert_eq!(buf.text(), "éx");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_str_single_line() {
        let mut buf = EditorBuffer::from_text("hd");
        buf.move_cursor(Direction::Right);
        buf.insert_str("ello worl");
        assert_eq!(buf.line_at(0), Some("hello world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 10));
    }

    #[test]
    fn test_insert_str_multiline_moves_caret_to_end() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_cursor(Direction::Right);
        buf.insert_str("\n| x |\n| é |");
        assert_eq!(buf.text(), "a\n| x |\n| é |b");
        assert_eq!(buf.cursor(), Cursor::at(2, 5));
    }

    #[test]
    fn test_insert_str_ending_in_newline() {
        let mut buf = EditorBuffer::from_text("");
        buf.insert_str("```\n");
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_insert_str_empty_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.insert_str("");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(0, 2);
        buf.split_line();
        assert_eq!(buf.text(), "he\nllo");
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut buf = EditorBuffer::from_text("a🚀b");
        buf.move_to(0, 2);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_delete_back_joins_crlf_lines() {
        let mut buf = EditorBuffer::from_text("ab\r\ncd");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\r\ncd\nef");
        buf.move_end();
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "abcd\nef");
        buf.move_end();
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "abcdef");
    }

    #[test]
    fn test_horizontal_moves_wrap_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_vertical_moves_remember_column() {
        let mut buf = EditorBuffer::from_text("long line\nab\nanother line");
        buf.move_to(0, 7);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 7);
    }

    #[test]
    fn test_vertical_move_through_multibyte_line() {
        let mut buf = EditorBuffer::from_text("abc\naé\nxyz");
        buf.move_to(0, 3);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), Cursor { line: 1, col: 2, col_memory: 3 });
        buf.move_cursor(Direction::Left);
        buf.insert_char('!');
        assert_eq!(buf.line_at(1), Some("a!é".to_string()));
    }

    #[test]
    fn test_move_lines_clamps() {
        let mut buf = EditorBuffer::from_text("a\nb\nc\nd");
        buf.move_lines(10);
        assert_eq!(buf.cursor().line, 3);
        buf.move_lines(-2);
        assert_eq!(buf.cursor().line, 1);
        buf.move_lines(-10);
        assert_eq!(buf.cursor().line, 0);
    }

    #[test]
    fn test_word_moves() {
        let mut buf = EditorBuffer::from_text("hello big_world!");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 6);
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 16);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 6);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_word_moves_wrap_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_end();
        buf.move_word_right();
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
        buf.move_word_left();
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(9, 9);
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
    }

    #[test]
    fn test_buffer_start_and_end() {
        let mut buf = EditorBuffer::from_text("ab\ncde");
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 3));
        buf.move_to_start();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_typing_roundtrip_restores_text() {
        let mut buf = EditorBuffer::from_text("# Title\r\n");
        buf.move_end();
        for ch in " 🚀".chars() {
            buf.insert_char(ch);
        }
        buf.delete_back();
        buf.delete_back();
        assert_eq!(buf.text(), "# Title\r\n");
    }
}
