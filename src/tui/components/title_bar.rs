//! # TitleBar Component
//!
//! Top status bar: app name, the tab strip (inside the tab shell) or the
//! current auth screen, and the status message on the right.
//!
//! Stateless: all data arrives as props, so it is trivial to test.
//!
//! ```text
//!  BookTrack │ Home  Books  Profile                      12 books
//!  BookTrack │ Login                                     Welcome to Booktrack!
//! ```

use crate::core::navigation::{Route, Tab};
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub struct TitleBar<'a> {
    pub route: Route,
    pub tab: Tab,
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(route: Route, tab: Tab, status_message: &'a str) -> Self {
        Self {
            route,
            tab,
            status_message,
        }
    }

    fn location_spans(&self) -> Vec<Span<'static>> {
        let active = Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD);
        let inactive = Style::default().fg(Color::Gray);

        match self.route {
            Route::Login => vec![Span::styled(" Login ", active)],
            Route::Register => vec![Span::styled(" Register ", active)],
            Route::MainTabs => Tab::ALL
                .iter()
                .map(|tab| {
                    let style = if *tab == self.tab { active } else { inactive };
                    Span::styled(format!(" {} ", tab.label()), style)
                })
                .collect(),
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let status_width = (self.status_message.chars().count() as u16 + 1).min(area.width / 2);
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(status_width)]).areas(area);

        let mut spans = vec![
            Span::styled(
                " BookTrack ",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::styled("│", Style::default().fg(Color::DarkGray)),
        ];
        spans.extend(self.location_spans());
        frame.render_widget(Paragraph::new(Line::from(spans)), left);

        let status = Paragraph::new(self.status_message)
            .style(Style::default().fg(Color::DarkGray))
            .right_aligned();
        frame.render_widget(status, right);
    }
}
