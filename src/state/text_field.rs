/// Single-line text buffer with a caret, edited one keystroke at a time.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextEdit {
    Insert(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

impl TextField {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn apply(&mut self, edit: TextEdit) {
        match edit {
            TextEdit::Insert(s) => {
                let s: String = s.chars().filter(|c| !c.is_control()).collect();
                self.text.insert_str(self.cursor, &s);
                self.cursor += s.len();
            }
            TextEdit::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.text.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                }
            }
            TextEdit::Delete => {
                if let Some(next) = self.next_boundary() {
                    self.text.replace_range(self.cursor..next, "");
                }
            }
            TextEdit::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            TextEdit::Right => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
            }
            TextEdit::Home => self.cursor = 0,
            TextEdit::End => self.cursor = self.text.len(),
        }
    }

    /// Text with a `|` caret drawn at the cursor.
    pub fn with_caret(&self) -> String {
        let mut display = self.text.clone();
        display.insert(self.cursor, '|');
        display
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> TextField {
        let mut field = TextField::default();
        field.apply(TextEdit::Insert(s.to_string()));
        field
    }

    #[test]
    fn insert_moves_cursor() {
        let field = typed("meme");
        assert_eq!(field.with_caret(), "meme|");
    }

    #[test]
    fn edits_respect_multibyte_chars() {
        let mut field = typed("café🔥");
        field.apply(TextEdit::Backspace);
        assert_eq!(field.text(), "café");
        field.apply(TextEdit::Left);
        field.apply(TextEdit::Backspace);
        assert_eq!(field.text(), "caé");
        field.apply(TextEdit::Delete);
        assert_eq!(field.with_caret(), "ca|");
    }

    #[test]
    fn insert_in_the_middle() {
        let mut field = typed("bug");
        field.apply(TextEdit::Home);
        field.apply(TextEdit::Insert("a ".to_string()));
        assert_eq!(field.text(), "a bug");
        field.apply(TextEdit::End);
        field.apply(TextEdit::Insert("s".to_string()));
        assert_eq!(field.with_caret(), "a bugs|");
    }

    #[test]
    fn boundaries_are_no_ops() {
        let mut field = TextField::default();
        field.apply(TextEdit::Backspace);
        field.apply(TextEdit::Delete);
        field.apply(TextEdit::Left);
        field.apply(TextEdit::Right);
        assert_eq!(field, TextField::default());
    }

    #[test]
    fn control_characters_are_dropped() {
        let field = typed("a\nb\t");
        assert_eq!(field.text(), "ab");
    }
}
