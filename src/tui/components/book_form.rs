//! # BookFormView Component
//!
//! Add/edit overlay on the Books tab: four fields and the submit button.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::core::state::{BookForm, SaveMode};
use crate::tui::component::Component;
use crate::tui::components::{TextField, centered_fixed};

const WIDTH: u16 = 56;

pub struct BookFormView<'a> {
    pub form: &'a BookForm,
    pub saving: bool,
}

impl<'a> BookFormView<'a> {
    pub fn new(form: &'a BookForm, saving: bool) -> Self {
        Self { form, saving }
    }

    fn button_label(&self) -> &'static str {
        if self.saving {
            "Saving..."
        } else {
            self.form.submit_label()
        }
    }
}

impl Component for BookFormView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let fields = &self.form.form.fields;
        // fields + gap + button + borders
        let height = fields.len() as u16 * TextField::HEIGHT + 4;
        let overlay = centered_fixed(WIDTH, height, area);
        frame.render_widget(Clear, overlay);

        let title = match self.form.mode() {
            SaveMode::Create => " New Book ",
            SaveMode::Update => " Edit Book ",
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(title)
            .title_bottom(Line::from(" Esc Close ").right_aligned())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let mut constraints: Vec<Constraint> = fields
            .iter()
            .map(|_| Constraint::Length(TextField::HEIGHT))
            .collect();
        constraints.extend([Constraint::Length(1), Constraint::Length(1)]);
        let rows = Layout::vertical(constraints).split(inner);

        for (i, field) in fields.iter().enumerate() {
            TextField::new(field, i == self.form.form.focus).render(frame, rows[i]);
        }
        frame.render_widget(
            Paragraph::new(format!("[ {} ]", self.button_label()))
                .style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )
                .centered(),
            rows[fields.len() + 1],
        );
    }
}
