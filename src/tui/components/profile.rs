//! # ProfileView Component
//!
//! The Profile tab: username and email, a settings dropdown in the top-right
//! corner, and the edit overlay.
//!
//! ```text
//!                                           ╭ Settings ──────╮
//!  Username                                 │ ▸ Edit Profile │
//!  ann                                      │   Logout       │
//!                                           ╰────────────────╯
//!  Email
//!  ann@example.com
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::core::state::{ProfileState, SETTINGS_ITEMS, Status};
use crate::tui::component::Component;
use crate::tui::components::{Spinner, TextField, centered_fixed};

const MENU_WIDTH: u16 = 20;
const EDITOR_WIDTH: u16 = 48;

pub struct ProfileView<'a> {
    pub state: &'a ProfileState,
    pub spinner_frame: usize,
}

impl<'a> ProfileView<'a> {
    pub fn new(state: &'a ProfileState, spinner_frame: usize) -> Self {
        Self {
            state,
            spinner_frame,
        }
    }

    fn render_details(&self, frame: &mut Frame, area: Rect) {
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let Some(user) = &self.state.user else {
            let [row] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(area);
            frame.render_widget(
                Paragraph::new("No user data available.").style(label).centered(),
                row,
            );
            return;
        };

        let lines = vec![
            Line::styled("Username", label),
            Line::styled(user.username.clone(), value),
            Line::default(),
            Line::styled("Email", label),
            Line::styled(user.email.clone(), value),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_menu(&self, frame: &mut Frame, area: Rect) {
        let height = SETTINGS_ITEMS.len() as u16 + 2;
        let menu = Rect {
            x: area.right().saturating_sub(MENU_WIDTH).max(area.x),
            y: area.y,
            width: MENU_WIDTH.min(area.width),
            height: height.min(area.height),
        };
        frame.render_widget(Clear, menu);

        let lines: Vec<Line> = SETTINGS_ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == self.state.settings_index {
                    Line::from(vec![
                        Span::styled("▸ ", Style::default().fg(Color::Magenta)),
                        Span::styled(
                            *item,
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(*item, Style::default().fg(Color::Gray)),
                    ])
                }
            })
            .collect();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Settings ");
        frame.render_widget(Paragraph::new(lines).block(block), menu);
    }

    fn render_editor(&self, frame: &mut Frame, area: Rect) {
        let fields = &self.state.editor.fields;
        // fields + gap + buttons + borders
        let height = fields.len() as u16 * TextField::HEIGHT + 4;
        let overlay = centered_fixed(EDITOR_WIDTH, height, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Edit Profile ")
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
            TextField::new(field, i == self.state.editor.focus).render(frame, rows[i]);
        }
        let buttons = Line::from(vec![
            Span::styled(
                "[ Save ]",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("[ Close ]", Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(buttons).centered(), rows[fields.len() + 1]);
    }
}

impl Component for ProfileView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Profile ")
            .padding(Padding::new(2, 2, 1, 0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.state.status == Status::Loading {
            let [row] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(inner);
            Spinner::new(self.spinner_frame, "Loading profile...").render(frame, row);
            return;
        }

        self.render_details(frame, inner);
        if self.state.settings_open {
            self.render_menu(frame, inner);
        }
        if self.state.editing {
            self.render_editor(frame, area);
        }
    }
}
