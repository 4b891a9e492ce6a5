//! # TextField Component
//!
//! One bordered, single-line input box titled with the field label. The
//! focused field gets a highlighted border and owns the terminal cursor.
//! Text longer than the box scrolls horizontally to keep the cursor visible.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::form::Field;
use crate::tui::component::Component;

pub struct TextField<'a> {
    pub field: &'a Field,
    pub focused: bool,
}

impl<'a> TextField<'a> {
    /// Border plus one line of text.
    pub const HEIGHT: u16 = 3;

    pub fn new(field: &'a Field, focused: bool) -> Self {
        Self { field, focused }
    }
}

/// Slice of `text` that fits in `width` columns with the cursor (at column
/// `cursor_col`) on screen. Returns the visible text and the cursor column
/// relative to it.
fn visible_window(text: &str, cursor_col: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    // Leave one column for the cursor after the last character.
    let scroll = cursor_col.saturating_sub(width - 1);

    let mut skipped = 0;
    let mut used = 0;
    let mut visible = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if skipped < scroll {
            skipped += w;
            continue;
        }
        if used + w > width {
            break;
        }
        used += w;
        visible.push(c);
    }
    (visible, cursor_col - skipped.min(cursor_col))
}

impl Component for TextField<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focused {
            Color::Magenta
        } else {
            Color::DarkGray
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", self.field.label));

        let inner_width = area.width.saturating_sub(2) as usize;
        let cursor_col = self.field.display_before_cursor().width();
        let (visible, cursor_offset) =
            visible_window(&self.field.display(), cursor_col, inner_width);

        let paragraph = Paragraph::new(visible)
            .style(Style::default().fg(Color::White))
            .block(block);
        frame.render_widget(paragraph, area);

        if self.focused && area.height >= Self::HEIGHT {
            frame.set_cursor_position((area.x + 1 + cursor_offset as u16, area.y + 1));
        }
    }
}
