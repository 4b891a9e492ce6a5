//! # AuthScreen Component
//!
//! Login and Register share one layout: a small book emblem, the screen
//! heading, the form fields, the submit button and a hint line.
//!
//! ```text
//!            ___
//!          |BOOK|
//!           BOOK APP
//!   ╭ Username ──────────────╮
//!   │ ann                    │
//!   ╰────────────────────────╯
//!   ╭ Password ──────────────╮
//!   │ ••••                   │
//!   ╰────────────────────────╯
//!            [ Login ]
//!   Don't have an account? Register  (Ctrl+R)
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::core::form::Form;
use crate::core::state::{LoginState, RegisterState, Status};
use crate::tui::component::Component;
use crate::tui::components::{TextField, centered_fixed};

const EMBLEM: [&str; 3] = [" _______ ", "|  ___  |", "|_|BOOK|_|"];
const MAX_WIDTH: u16 = 48;

pub struct AuthScreen<'a> {
    pub heading: &'static str,
    pub form: &'a Form,
    pub submit_label: &'static str,
    pub busy: bool,
    pub hint: &'static str,
}

impl<'a> AuthScreen<'a> {
    pub fn login(state: &'a LoginState) -> Self {
        Self {
            heading: "BOOK APP",
            form: &state.form,
            submit_label: state.submit_label(),
            busy: state.status == Status::Loading,
            hint: "Don't have an account? Register  (Ctrl+R)",
        }
    }

    pub fn register(state: &'a RegisterState) -> Self {
        Self {
            heading: "Create Account",
            form: &state.form,
            submit_label: state.submit_label(),
            busy: state.status == Status::Loading,
            hint: "Already registered? Esc to go back",
        }
    }

    fn content_height(&self) -> u16 {
        let fields = self.form.fields.len() as u16 * TextField::HEIGHT;
        // emblem + heading + gap + fields + gap + button + hint
        EMBLEM.len() as u16 + 2 + fields + 3
    }
}

impl Component for AuthScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let column = centered_fixed(MAX_WIDTH, self.content_height(), area);

        let mut constraints = vec![
            Constraint::Length(EMBLEM.len() as u16),
            Constraint::Length(1),
            Constraint::Length(1),
        ];
        constraints.extend(self.form.fields.iter().map(|_| Constraint::Length(TextField::HEIGHT)));
        constraints.extend([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)]);
        let rows = Layout::vertical(constraints).split(column);

        let emblem: Vec<Line> = EMBLEM
            .iter()
            .map(|l| Line::styled(*l, Style::default().fg(Color::Magenta)))
            .collect();
        frame.render_widget(Paragraph::new(emblem).centered(), rows[0]);
        frame.render_widget(
            Paragraph::new(self.heading)
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .centered(),
            rows[1],
        );

        for (i, field) in self.form.fields.iter().enumerate() {
            let focused = !self.busy && i == self.form.focus;
            TextField::new(field, focused).render(frame, rows[3 + i]);
        }

        let after = 3 + self.form.fields.len();
        let button_style = if self.busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(Line::styled(format!("[ {} ]", self.submit_label), button_style))
                .centered(),
            rows[after + 1],
        );
        frame.render_widget(
            Paragraph::new(self.hint)
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
            rows[after + 2],
        );
    }
}
