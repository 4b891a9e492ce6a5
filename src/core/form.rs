//! # Forms
//!
//! Single-line text fields with a byte-offset cursor, grouped into a form
//! with one focused field. Every screen that takes typed input (login,
//! register, the book form, the profile editor) holds one of these.

/// Editing input routed to whichever form currently has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormInput {
    Char(char),
    /// Bracketed paste. Newlines are dropped since fields are single-line.
    Paste(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    NextField,
    PrevField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    /// Cursor position as byte offset in `value` (0..=value.len())
    pub cursor: usize,
    /// Render as bullets (passwords).
    pub masked: bool,
}

impl Field {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            cursor: 0,
            masked: false,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::new(label)
        }
    }

    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Text as it should appear on screen.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Display text before the cursor, used to place the terminal cursor.
    pub fn display_before_cursor(&self) -> String {
        let before = &self.value[..self.cursor];
        if self.masked {
            "•".repeat(before.chars().count())
        } else {
            before.to_string()
        }
    }

    fn apply(&mut self, input: &FormInput) {
        match input {
            FormInput::Char(c) => {
                if *c == '\n' || *c == '\r' {
                    return;
                }
                self.value.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
            }
            FormInput::Paste(text) => {
                let clean: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                self.value.insert_str(self.cursor, &clean);
                self.cursor += clean.len();
            }
            FormInput::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.value, self.cursor);
                    self.value.drain(prev..self.cursor);
                    self.cursor = prev;
                }
            }
            FormInput::Delete => {
                if self.cursor < self.value.len() {
                    let next = next_char_boundary(&self.value, self.cursor);
                    self.value.drain(self.cursor..next);
                }
            }
            FormInput::Left => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.value, self.cursor);
                }
            }
            FormInput::Right => {
                if self.cursor < self.value.len() {
                    self.cursor = next_char_boundary(&self.value, self.cursor);
                }
            }
            FormInput::Home => self.cursor = 0,
            FormInput::End => self.cursor = self.value.len(),
            FormInput::NextField | FormInput::PrevField => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.set(value);
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focus = 0;
    }

    pub fn apply(&mut self, input: &FormInput) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        match input {
            FormInput::NextField => self.focus = (self.focus + 1) % len,
            FormInput::PrevField => self.focus = (self.focus + len - 1) % len,
            other => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.apply(other);
                }
            }
        }
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
