//! # Home Component
//!
//! Static landing tab shown right after login.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const ART: [&str; 6] = [
    "      ______ ______      ",
    "    _/      Y      \\_    ",
    "   // ~~ ~~ | ~~ ~  \\\\   ",
    "  // ~ ~ ~~ | ~~~ ~~ \\\\  ",
    " //________.|.________\\\\ ",
    "`----------`-'----------'",
];

pub struct HomeScreen;

impl Component for HomeScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::styled(
                "BOOK APP",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Line::default(),
        ];
        lines.extend(ART.iter().map(|l| Line::styled(*l, Style::default().fg(Color::White))));
        lines.push(Line::default());
        lines.push(Line::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ));

        let [content] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).centered(), content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_home_shows_header_and_version() {
        let mut terminal = Terminal::new(TestBackend::new(40, 14)).unwrap();
        terminal.draw(|f| HomeScreen.render(f, f.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("BOOK APP"));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }
}
