//! # Dialog Component
//!
//! Blocking alert drawn over everything else. Only Enter or Esc gets past it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::core::state::Dialog;
use crate::tui::component::Component;
use crate::tui::components::centered_fixed;

const WIDTH: u16 = 50;

pub struct DialogView<'a> {
    pub dialog: &'a Dialog,
}

impl<'a> DialogView<'a> {
    pub fn new(dialog: &'a Dialog) -> Self {
        Self { dialog }
    }
}

impl Component for DialogView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // borders (2) + padding (2)
        let text_width = WIDTH.min(area.width).saturating_sub(4).max(1) as usize;
        let lines: Vec<Line> = textwrap::wrap(&self.dialog.message, text_width)
            .into_iter()
            .map(|l| Line::from(l.into_owned()))
            .collect();
        // message + gap + button + borders
        let height = lines.len() as u16 + 4;
        let overlay = centered_fixed(WIDTH, height, area);

        frame.render_widget(Clear, overlay);
        let title = match &self.dialog.title {
            Some(title) => format!(" {title} "),
            None => " Notice ".to_string(),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(title)
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [body, _, button] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);
        frame.render_widget(Paragraph::new(lines), body);
        frame.render_widget(
            Paragraph::new("[ OK ]")
                .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
                .centered(),
            button,
        );
    }
}
