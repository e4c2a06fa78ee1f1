//! # StatusView Component
//!
//! Fills the card area while there is no card to show: a spinner during a
//! fetch, or the fetch error with a way out.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub enum StatusView<'a> {
    Loading { spinner_frame: usize },
    Failed { message: &'a str },
}

impl StatusView<'_> {
    fn lines(&self) -> (Vec<Line<'_>>, Color) {
        match self {
            StatusView::Loading { spinner_frame } => {
                let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
                (
                    vec![Line::from(format!("{} Fetching cats...", spinner)).centered()],
                    Color::Yellow,
                )
            }
            StatusView::Failed { message } => (
                vec![
                    Line::styled(
                        "Couldn't load any cats.",
                        Style::default().add_modifier(Modifier::BOLD),
                    )
                    .centered(),
                    Line::default(),
                    Line::from(*message).centered(),
                    Line::default(),
                    Line::styled("Press r or click Restart to try again.", Color::DarkGray)
                        .centered(),
                ],
                Color::Red,
            ),
        }
    }
}

impl Component for StatusView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (lines, color) = self.lines();
        let height = lines.len() as u16 + 2;
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, boxed, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(50),
            Constraint::Fill(1),
        ])
        .areas(middle);

        let paragraph = Paragraph::new(lines)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(paragraph, boxed);
    }
}
