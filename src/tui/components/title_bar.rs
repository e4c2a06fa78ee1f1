//! # TitleBar Component
//!
//! Top status bar: which catalog we're browsing, how far into the stack we
//! are, and the latest status message.
//!
//! Stateless: receives everything as props and renders a single line.
//!
//! ## Conditional Formatting
//!
//! 1. **Browsing**: `"Swipedeck #cute | 3/10 | 2 liked · 7 left"`
//! 2. **No position** (loading, failed): `"Swipedeck #cute | Loading cats..."`
//! 3. **Default**: `"Swipedeck #cute"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Catalog tag being browsed (e.g. "cute")
    pub tag: String,
    /// `(1-based position, total)` while cards are on screen
    pub position: Option<(usize, usize)>,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(tag: String, position: Option<(usize, usize)>, status_message: String) -> Self {
        Self {
            tag,
            position,
            status_message,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("Swipedeck #{}", self.tag);
        if let Some((current, total)) = self.position {
            text.push_str(&format!(" | {}/{}", current, total));
        }
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
