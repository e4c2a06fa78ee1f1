//! # ControlBar Component
//!
//! The three buttons under the card: Nope, Restart and Like.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ControlBarState` lives in `TuiState` and remembers where each button
//!   was drawn last frame, for mouse hit-testing
//! - `ControlBar` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::core::action::Action;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const BUTTON_WIDTH: u16 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Dislike,
    Restart,
    Like,
}

impl Control {
    const ALL: [Control; 3] = [Control::Dislike, Control::Restart, Control::Like];

    fn label(self) -> &'static str {
        match self {
            Control::Dislike => "← Nope",
            Control::Restart => "↻ Restart",
            Control::Like => "Like →",
        }
    }

    fn color(self) -> Color {
        match self {
            Control::Dislike => Color::Red,
            Control::Restart => Color::Yellow,
            Control::Like => Color::Green,
        }
    }

    pub fn action(self) -> Action {
        match self {
            Control::Dislike => Action::Dislike,
            Control::Restart => Action::Restart,
            Control::Like => Action::Like,
        }
    }
}

#[derive(Debug, Default)]
pub struct ControlBarState {
    hit_boxes: Vec<(Rect, Control)>,
}

impl ControlBarState {
    pub fn new() -> Self {
        Self::default()
    }

    fn hit(&self, column: u16, row: u16) -> Option<Control> {
        self.hit_boxes
            .iter()
            .find(|(rect, _)| rect.contains(Position::new(column, row)))
            .map(|(_, control)| *control)
    }
}

impl EventHandler for ControlBarState {
    type Event = Control;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Control> {
        match event {
            TuiEvent::Like => Some(Control::Like),
            TuiEvent::Dislike => Some(Control::Dislike),
            TuiEvent::Restart => Some(Control::Restart),
            TuiEvent::PointerDown(column, row) => self.hit(*column, *row),
            _ => None,
        }
    }
}

pub struct ControlBar<'a> {
    state: &'a mut ControlBarState,
    /// Whether Like/Nope would be accepted right now. Restart always is.
    decisions_enabled: bool,
}

impl<'a> ControlBar<'a> {
    pub fn new(state: &'a mut ControlBarState, decisions_enabled: bool) -> Self {
        Self {
            state,
            decisions_enabled,
        }
    }
}

impl Component for ControlBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let slots = Layout::horizontal([Constraint::Length(BUTTON_WIDTH); 3])
            .flex(Flex::Center)
            .spacing(2)
            .split(area);

        self.state.hit_boxes.clear();
        for (control, slot) in Control::ALL.into_iter().zip(slots.iter()) {
            let enabled = control == Control::Restart || self.decisions_enabled;
            let style = if enabled {
                Style::default().fg(control.color()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let button = Paragraph::new(Line::from(control.label()).centered())
                .style(style)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(style),
                );
            frame.render_widget(button, *slot);
            self.state.hit_boxes.push((*slot, control));
        }
    }
}
