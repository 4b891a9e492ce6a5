//! # BookList Component
//!
//! The Books tab: one entry per record with title, author and genre on the
//! first line and the wrapped description below.
//!
//! ```text
//! ╭ Books (2) ─────────────────────────────────────╮
//! │▌ Dune  Frank Herbert  [Sci-Fi]                 │
//! │▌   Desert planet politics.                     │
//! │  Emma  Jane Austen  [Classic]                  │
//! │    Matchmaking gone wrong.                     │
//! ╰────────────────────────────────────────────────╯
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph};

use crate::api::Book;
use crate::core::state::{BookListState, Status};
use crate::tui::component::Component;
use crate::tui::components::Spinner;

/// Description indent under the title line.
const INDENT: &str = "  ";

pub struct BookList<'a> {
    pub state: &'a BookListState,
    pub spinner_frame: usize,
}

impl<'a> BookList<'a> {
    pub fn new(state: &'a BookListState, spinner_frame: usize) -> Self {
        Self {
            state,
            spinner_frame,
        }
    }

    fn item(book: &Book, width: usize) -> ListItem<'static> {
        let mut lines = vec![Line::from(vec![
            Span::styled(
                book.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(book.author.clone(), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(format!("[{}]", book.genre), Style::default().fg(Color::Magenta)),
        ])];

        let text_width = width.saturating_sub(INDENT.len()).max(1);
        lines.extend(textwrap::wrap(&book.description, text_width).into_iter().map(|l| {
            Line::styled(format!("{INDENT}{l}"), Style::default().fg(Color::DarkGray))
        }));
        ListItem::new(lines)
    }

    fn placeholder(&self) -> Option<&'static str> {
        if !self.state.books.is_empty() {
            return None;
        }
        Some(match self.state.list_status {
            Status::Loading => "Loading books...",
            Status::Error => "Could not load books. Press r to try again.",
            Status::Idle | Status::Success => "No books yet. Press a to add one.",
        })
    }
}

impl Component for BookList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Books ({}) ", self.state.books.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(text) = self.placeholder() {
            let [row] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(inner);
            if self.state.list_status == Status::Loading {
                Spinner::new(self.spinner_frame, text).render(frame, row);
            } else {
                frame.render_widget(
                    Paragraph::new(text)
                        .style(Style::default().fg(Color::DarkGray))
                        .centered(),
                    row,
                );
            }
            return;
        }

        // highlight symbol takes two columns
        let width = inner.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .state
            .books
            .iter()
            .map(|book| Self::item(book, width))
            .collect();
        let list = List::new(items)
            .highlight_symbol("▌ ")
            .highlight_style(Style::default().bg(Color::Rgb(40, 40, 48)));

        let mut list_state = ListState::default().with_selected(Some(self.state.selected));
        frame.render_stateful_widget(list, inner, &mut list_state);
    }
}
