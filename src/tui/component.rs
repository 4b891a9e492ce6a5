use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components follow the React pattern:
/// - They receive data via props (struct fields, usually borrowed from `App`).
/// - They render to a `Frame` within a given `Rect`.
///
/// `render` takes `&mut self` so a component can keep presentation state
/// (e.g. list scroll position) between frames.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
