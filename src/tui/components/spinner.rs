//! Braille loading spinner with a caption.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Spinner<'a> {
    pub frame_index: usize,
    pub caption: &'a str,
}

impl<'a> Spinner<'a> {
    pub fn new(frame_index: usize, caption: &'a str) -> Self {
        Self {
            frame_index,
            caption,
        }
    }

    pub fn glyph(frame_index: usize) -> &'static str {
        FRAMES[frame_index % FRAMES.len()]
    }
}

impl Component for Spinner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(Self::glyph(self.frame_index), Style::default().fg(Color::Magenta)),
            Span::raw(" "),
            Span::styled(self.caption, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line).centered(), area);
    }
}
