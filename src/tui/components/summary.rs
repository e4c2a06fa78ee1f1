//! # Summary Component
//!
//! End-of-session screen: the liked items in a scrollable grid, with the
//! tally and how long the session took.
//!
//! Borrows the scroll position from `TuiState`; everything else is props.

use std::time::Duration;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::catalog::Item;
use crate::core::deck::SessionSummary;
use crate::tui::component::Component;
use crate::tui::components::card_stack::truncate_str;

const CELL_WIDTH: u16 = 26;
const CELL_HEIGHT: u16 = 4;

/// "42s" or "3m 07s".
fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

/// One liked item in the grid.
struct LikedCell<'a> {
    item: &'a Item,
}

impl Widget for LikedCell<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let url_width = area.width.saturating_sub(2) as usize;
        Paragraph::new(Line::styled(
            truncate_str(&self.item.resource_url, url_width),
            Color::Cyan,
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green))
                .title(format!(" ♥ {} ", self.item.short_id())),
        )
        .render(area, buf);
    }
}

pub struct Summary<'a> {
    summary: &'a SessionSummary,
    scroll: &'a mut ScrollViewState,
}

impl<'a> Summary<'a> {
    pub fn new(summary: &'a SessionSummary, scroll: &'a mut ScrollViewState) -> Self {
        Self { summary, scroll }
    }

    fn header(&self) -> Vec<Line<'static>> {
        let s = self.summary;
        vec![
            Line::from(vec![
                Span::styled("All done! ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("You liked {} of {}", s.liked_count(), s.total),
                    Style::default().fg(Color::Green),
                ),
            ])
            .centered(),
            Line::styled(
                format!(
                    "{} disliked · took {}",
                    s.disliked_count,
                    format_elapsed(s.elapsed)
                ),
                Color::DarkGray,
            )
            .centered(),
        ]
    }

    fn render_grid(&mut self, frame: &mut Frame, area: Rect) {
        if self.summary.liked.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled("No likes this time.", Color::DarkGray).centered()),
                area,
            );
            return;
        }

        // One column is reserved for the scrollbar.
        let content_width = area.width.saturating_sub(1).max(1);
        let columns = (content_width / CELL_WIDTH).max(1) as usize;
        let cell_width = content_width / columns as u16;
        // The scroll view is addressed in u16 rows; cells past that are not drawn.
        let max_rows = (u16::MAX / CELL_HEIGHT) as usize;
        let shown = self.summary.liked.len().min(max_rows * columns);
        let rows = shown.div_ceil(columns) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, rows * CELL_HEIGHT))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (i, item) in self.summary.liked[..shown].iter().enumerate() {
            let col = (i % columns) as u16;
            let row = (i / columns) as u16;
            let cell = Rect::new(col * cell_width, row * CELL_HEIGHT, cell_width, CELL_HEIGHT);
            scroll_view.render_widget(LikedCell { item }, cell);
        }

        frame.render_stateful_widget(scroll_view, area, self.scroll);
    }
}

impl Component for Summary<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, grid_area, hint_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(self.header()), header_area);
        self.render_grid(frame, grid_area);
        frame.render_widget(
            Line::styled("Press r for a new batch · ↑/↓ to scroll", Color::DarkGray).centered(),
            hint_area,
        );
    }
}
