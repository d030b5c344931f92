//! Input Fields
//!
//! Readline-style single-line editing used by the expression, range, and
//! raw-console inputs. Cursor positions are char indices; byte offsets are
//! derived on demand so multi-byte input edits stay in bounds.

use unicode_width::UnicodeWidthStr;

/// A single-line editable text field.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    buffer: String,
    /// Cursor as a char index into `buffer`.
    cursor: usize,
}

impl InputField {
    /// Create an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Whether the field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Cursor position as a char index.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display column of the cursor (for rendering).
    #[must_use]
    pub fn cursor_column(&self) -> u16 {
        let byte = self.byte_at(self.cursor);
        self.buffer[..byte].width() as u16
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let byte = self.byte_at(self.cursor);
        self.buffer.insert(byte, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let byte = self.byte_at(self.cursor - 1);
            self.buffer.remove(byte);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            let byte = self.byte_at(self.cursor);
            self.buffer.remove(byte);
        }
    }

    /// Move the cursor one char left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one char right.
    pub fn move_right(&mut self) {
        let len = self.buffer.chars().count();
        if self.cursor < len {
            self.cursor += 1;
        }
    }

    /// Jump to the start of the line.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Jump past the end of the line.
    pub fn move_end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }

    /// Clear the field.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn byte_at(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn field_with(text: &str) -> InputField {
        let mut field = InputField::new();
        for c in text.chars() {
            field.insert(c);
        }
        field
    }

    #[test]
    fn inserts_at_cursor() {
        let mut field = field_with("xy");
        field.move_left();
        field.insert('+');
        assert_eq!(field.text(), "x+y");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut field = field_with("x+y");
        field.move_left();
        field.backspace();
        assert_eq!(field.text(), "xy");
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn delete_removes_at_cursor() {
        let mut field = field_with("x+y");
        field.move_home();
        field.delete();
        assert_eq!(field.text(), "+y");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn backspace_at_start_is_inert() {
        let mut field = field_with("x");
        field.move_home();
        field.backspace();
        assert_eq!(field.text(), "x");
    }

    #[test]
    fn multibyte_edits_stay_in_bounds() {
        let mut field = field_with("θ+x");
        field.move_home();
        field.delete();
        assert_eq!(field.text(), "+x");
        field.move_end();
        field.insert('²');
        assert_eq!(field.text(), "+x²");
    }

    #[test]
    fn clear_resets_cursor() {
        let mut field = field_with("x*y");
        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.cursor(), 0);
    }
}
