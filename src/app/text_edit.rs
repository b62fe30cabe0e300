use unicode_width::UnicodeWidthChar;

/// 한 줄 입력 필드 (커서는 바이트 위치)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 외부에서 값이 바뀐 경우 (커서는 끝으로)
    pub fn set(&mut self, value: &str) {
        if self.value != value {
            self.value = value.to_string();
            self.cursor = self.value.len();
        }
    }

    /// 커서 앞까지의 표시 너비
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor]
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let prev = self.prev_char_start(self.cursor);
        self.value.remove(prev);
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.prev_char_start(self.cursor);
    }

    pub fn right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }

        self.cursor = self.value[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.value.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// 이전 단어 삭제 (Ctrl+W)
    pub fn delete_prev_word(&mut self) {
        let original = self.cursor;
        let mut pos = original;

        // 커서 왼쪽의 구분자부터 건너뛴 뒤 단어 시작까지
        while pos > 0 && self.char_before(pos).is_some_and(is_word_delimiter) {
            pos = self.prev_char_start(pos);
        }
        while pos > 0 && !self.char_before(pos).is_some_and(is_word_delimiter) {
            pos = self.prev_char_start(pos);
        }

        self.value.replace_range(pos..original, "");
        self.cursor = pos;
    }

    fn char_before(&self, pos: usize) -> Option<char> {
        self.value[..pos].chars().next_back()
    }

    fn prev_char_start(&self, pos: usize) -> usize {
        self.value[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

fn is_word_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '/' | '\\' | '_' | '-' | '.' | '@' | ':')
}

#[cfg(test)]
mod tests {
    use super::TextField;

    #[test]
    fn test_insert_backspace_delete_utf8_cursor_boundary() {
        let mut field = TextField::new("\u{AC00}\u{B098}");
        field.left();

        field.insert_char('\u{B2E4}');
        assert_eq!(field.value(), "\u{AC00}\u{B2E4}\u{B098}");
        assert_eq!(field.cursor(), "\u{AC00}\u{B2E4}".len());
        assert_eq!(field.cursor_column(), 4);

        field.backspace();
        assert_eq!(field.value(), "\u{AC00}\u{B098}");

        field.home();
        field.delete();
        assert_eq!(field.value(), "\u{B098}");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn test_left_right_home_end() {
        let mut field = TextField::new("a\u{AC00}b");
        field.left();
        assert_eq!(field.cursor(), "a\u{AC00}".len());
        field.left();
        field.left();
        field.left();
        assert_eq!(field.cursor(), 0);
        field.right();
        assert_eq!(field.cursor(), 1);
        field.end();
        assert_eq!(field.cursor(), field.value().len());
    }

    #[test]
    fn test_delete_prev_word_stops_at_placeholder_separator() {
        let mut field = TextField::new("@PROJECT@_@SHOT@");
        field.delete_prev_word();
        assert_eq!(field.value(), "@PROJECT@_@");
        assert_eq!(field.cursor(), field.value().len());
    }

    #[test]
    fn test_set_moves_cursor_only_on_change() {
        let mut field = TextField::new("abc");
        field.home();
        field.set("abc");
        assert_eq!(field.cursor(), 0);
        field.set("abcd");
        assert_eq!(field.cursor(), 4);
    }
}
