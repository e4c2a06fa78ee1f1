//! # CardStack Component
//!
//! The top card and the receded card behind it.
//!
//! Stateless: the pose of the top card arrives as a `CardVisual` (from the
//! live drag or a running animation) and is mapped onto cells. Horizontal
//! offsets are in pixels and get divided by the configured pixels-per-column.
//!
//! ```text
//!   ╭─ a1b2c3d4 ─────────────╮
//!   │LIKE                    │
//!   │         /\_/\          │
//!   │        ( o.o )         │
//!   │         > ^ <          │
//!   │                        │
//!   │ https://cataas.com/... │
//!   │ ● image ready (41 KB)  │
//!   ╰────────────────── +4° ─╯
//!    ╰── up next: 9f8e7d6c ─╯
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::catalog::{CacheStatus, Item};
use crate::core::deck::CardVisual;
use crate::core::gesture::ROTATION_MAX_DEGREES;
use crate::tui::component::Component;

pub const CARD_WIDTH: u16 = 44;
pub const CARD_HEIGHT: u16 = 14;

const CAT_ART: [&str; 3] = [" /\\_/\\ ", "( o.o )", " > ^ < "];

/// Resting position of the top card inside `area`. One row is left free
/// underneath for the edge of the next card.
pub fn card_area(area: Rect) -> Rect {
    let width = CARD_WIDTH.min(area.width);
    let height = CARD_HEIGHT.min(area.height.saturating_sub(1));
    let x = area.x + (area.width - width) / 2;
    let y = area.y + area.height.saturating_sub(height + 1) / 2;
    Rect::new(x, y, width, height)
}

/// `rect` moved `dx` columns and clipped to `bounds`; `None` once it has
/// left `bounds` entirely.
fn shift_clipped(rect: Rect, dx: i32, bounds: Rect) -> Option<Rect> {
    let left = (rect.x as i32 + dx).max(bounds.x as i32);
    let right = (rect.x as i32 + dx + rect.width as i32).min(bounds.right() as i32);
    if left >= right {
        return None;
    }
    Some(Rect::new(left as u16, rect.y, (right - left) as u16, rect.height))
}

/// Cuts `s` to `max_width` display columns, marking the cut with an ellipsis.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

/// Terminal stand-in for overlay opacity: dim, bold, then solid.
fn stamp_style(color: Color, opacity: f32) -> Option<Style> {
    if opacity <= 0.0 {
        return None;
    }
    let style = Style::default().fg(color);
    Some(if opacity < 0.5 {
        style.add_modifier(Modifier::DIM)
    } else if opacity < 1.0 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
    })
}

fn cache_line(status: CacheStatus) -> Line<'static> {
    match status {
        CacheStatus::Unknown => Line::styled("◌ image not requested", Color::DarkGray),
        CacheStatus::Pending => Line::styled("◌ loading image…", Color::Yellow),
        CacheStatus::Ready(bytes) => Line::styled(
            format!("● image ready ({:.0} KB)", bytes as f64 / 1024.0),
            Color::Green,
        ),
        CacheStatus::Failed => Line::styled("✕ image unavailable", Color::Red),
    }
}

pub struct CardStack<'a> {
    pub top: &'a Item,
    pub next: Option<&'a Item>,
    pub visual: CardVisual,
    pub cache_status: CacheStatus,
    pub pixels_per_column: f32,
}

impl<'a> CardStack<'a> {
    pub fn new(
        top: &'a Item,
        next: Option<&'a Item>,
        visual: CardVisual,
        cache_status: CacheStatus,
        pixels_per_column: f32,
    ) -> Self {
        Self {
            top,
            next,
            visual,
            cache_status,
            pixels_per_column,
        }
    }

    fn offset_columns(&self) -> i32 {
        if self.pixels_per_column <= 0.0 {
            return 0;
        }
        (self.visual.offset_x / self.pixels_per_column).round() as i32
    }

    fn border_color(&self) -> Color {
        if self.visual.like_opacity > 0.0 {
            Color::Green
        } else if self.visual.dislike_opacity > 0.0 {
            Color::Red
        } else {
            Color::White
        }
    }

    fn render_next(&self, frame: &mut Frame, card: Rect, bounds: Rect) {
        let Some(next) = self.next else {
            return;
        };
        // Smaller and lower than the top card, so only its bottom edge shows.
        let behind = Rect::new(
            card.x + 1,
            card.y + 1,
            card.width.saturating_sub(2),
            card.height,
        )
        .intersection(bounds);
        if behind.is_empty() {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(
                Line::from(format!(" up next: {} ", next.short_id()))
                    .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
                    .centered(),
            );
        frame.render_widget(block, behind);
    }

    fn render_top(&self, frame: &mut Frame, rect: Rect) {
        let style = Style::default().fg(self.border_color());
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(Line::from(format!(" {} ", self.top.short_id())).style(style))
            .padding(Padding::horizontal(1));

        // A live drag is bounded; animated poses may overshoot on the way out.
        let tilt = if self.visual.transition.is_none() {
            self.visual
                .rotation_degrees
                .clamp(-ROTATION_MAX_DEGREES, ROTATION_MAX_DEGREES)
        } else {
            self.visual.rotation_degrees
        };
        if tilt.abs() >= 0.5 {
            block = block.title_bottom(Line::from(format!(" {:+.0}° ", tilt)).right_aligned());
        }

        let inner_width = rect.width.saturating_sub(4) as usize;

        let stamp = if let Some(s) = stamp_style(Color::Green, self.visual.like_opacity) {
            Line::from(Span::styled("LIKE", s)).alignment(Alignment::Left)
        } else if let Some(s) = stamp_style(Color::Red, self.visual.dislike_opacity) {
            Line::from(Span::styled("NOPE", s)).alignment(Alignment::Right)
        } else {
            Line::default()
        };

        let mut lines = vec![stamp];
        lines.extend(CAT_ART.iter().map(|row| Line::from(*row).centered()));
        lines.push(Line::default());
        lines.push(Line::styled(
            truncate_str(&self.top.resource_url, inner_width),
            Color::Cyan,
        ));
        lines.push(cache_line(self.cache_status));

        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(lines).block(block), rect);
    }
}

impl Component for CardStack<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let card = card_area(area);
        if card.is_empty() {
            return;
        }
        self.render_next(frame, card, area);
        if let Some(rect) = shift_clipped(card, self.offset_columns(), area) {
            self.render_top(frame, rect);
        }
    }
}
