use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::deck::{CardVisual, DeckPhase};
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    CardStack, ControlBar, StatusView, Summary, TitleBar, card_area,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: Instant, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [title_area, main_area, controls_area] = layout.areas(frame.area());

    TitleBar::new(tui.tag.clone(), position(app), app.status_message.clone())
        .render(frame, title_area);

    tui.card_area = Rect::default();
    match app.deck.phase() {
        DeckPhase::Loading => StatusView::Loading { spinner_frame }.render(frame, main_area),
        DeckPhase::Failed(message) => StatusView::Failed { message }.render(frame, main_area),
        DeckPhase::Empty => {
            if let Some(summary) = app.deck.summary() {
                Summary::new(&summary, &mut tui.summary_scroll).render(frame, main_area);
            }
        }
        DeckPhase::Idle | DeckPhase::Dragging | DeckPhase::Committing(_) | DeckPhase::Resetting => {
            if let Some(top) = app.deck.current_item() {
                let viewport_px = main_area.width as f32 * tui.pixels_per_column;
                let visual = card_visual(app, tui, now, viewport_px);
                CardStack::new(
                    top,
                    app.deck.lookahead_item(),
                    visual,
                    tui.cache.status(&top.resource_url),
                    tui.pixels_per_column,
                )
                .render(frame, main_area);
                tui.card_area = card_area(main_area);
            }
        }
    }

    ControlBar::new(&mut tui.controls, app.deck.accepts_input()).render(frame, controls_area);
}

/// `(1-based index, total)` while a card is on screen.
fn position(app: &App) -> Option<(usize, usize)> {
    match app.deck.phase() {
        DeckPhase::Loading | DeckPhase::Failed(_) | DeckPhase::Empty => None,
        _ => {
            let session = app.deck.session();
            (session.current_index < session.items.len())
                .then(|| (session.current_index + 1, session.items.len()))
        }
    }
}

/// Which card a motion belongs to: a motion started on one card must not
/// play on the card that replaces it.
pub fn card_owner(app: &App) -> (u64, usize) {
    (app.deck.generation(), app.deck.session().current_index)
}

/// Pose of the top card: the live drag wins, then any running motion that
/// still belongs to this card, then rest.
pub fn card_visual(app: &App, tui: &TuiState, now: Instant, viewport_px: f32) -> CardVisual {
    if let Some(visual) = app.deck.drag_visual() {
        return visual;
    }
    if let Some(motion) = &tui.motion
        && motion.owner() == card_owner(app)
        && !motion.is_finished(now)
    {
        return motion.visual(now, viewport_px);
    }
    CardVisual::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ResourceCache;
    use crate::core::action::{Action, Effect, update};
    use crate::core::deck::SwipeDecision;
    use crate::core::gesture::{InputSample, PointerPhase};
    use crate::test_support::{items, test_app};
    use crate::tui::animation::CardMotion;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn tui_state() -> TuiState {
        TuiState::new("cute".to_string(), 8.0, ResourceCache::new())
    }

    fn loaded_app(n: usize) -> App {
        let mut app = test_app();
        let Effect::FetchBatch(token) = update(&mut app, Action::StartFetch) else {
            panic!("expected a fetch");
        };
        update(&mut app, Action::BatchLoaded { token, items: items(n) });
        app
    }

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| draw_ui(f, app, tui, Instant::now(), 0))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_loading() {
        let mut app = test_app();
        update(&mut app, Action::StartFetch);
        let mut tui = tui_state();
        let text = draw(&app, &mut tui);
        assert!(text.contains("Fetching cats..."));
        assert!(text.contains("Loading cats..."));
        assert_eq!(tui.card_area, Rect::default());
    }

    #[test]
    fn test_draw_failed() {
        let mut app = test_app();
        let Effect::FetchBatch(token) = update(&mut app, Action::StartFetch) else {
            panic!("expected a fetch");
        };
        update(
            &mut app,
            Action::FetchFailed {
                token,
                message: "catalog error (HTTP 503): down".into(),
            },
        );
        let text = draw(&app, &mut tui_state());
        assert!(text.contains("HTTP 503"));
        assert!(text.contains("Restart"));
    }

    #[test]
    fn test_draw_cards_records_hit_area() {
        let app = loaded_app(3);
        let mut tui = tui_state();
        let text = draw(&app, &mut tui);
        assert!(text.contains("Swipedeck #cute | 1/3"));
        assert!(text.contains("item-0"));
        assert!(text.contains("up next: item-1"));
        assert!(!tui.card_area.is_empty());
    }

    #[test]
    fn test_draw_summary() {
        let mut app = loaded_app(1);
        let Effect::ScheduleAdvance(pending) = update(&mut app, Action::Like) else {
            panic!("expected an advance");
        };
        update(&mut app, Action::AdvanceDue { generation: pending.generation });
        let text = draw(&app, &mut tui_state());
        assert!(text.contains("You liked 1 of 1"));
    }

    #[test]
    fn test_drag_pose_wins_over_motion() {
        let mut app = loaded_app(2);
        let mut tui = tui_state();
        let now = Instant::now();
        tui.motion = Some(CardMotion::spring_back(50.0, card_owner(&app), now));
        update(&mut app, Action::Input(InputSample::pointer(PointerPhase::Down, 0.0)));
        update(&mut app, Action::Input(InputSample::pointer(PointerPhase::Move, -30.0)));
        assert_eq!(card_visual(&app, &tui, now, 640.0).offset_x, -30.0);
    }

    #[test]
    fn test_exit_motion_does_not_follow_next_card() {
        let mut app = loaded_app(3);
        let mut tui = tui_state();
        let now = Instant::now();
        let Effect::ScheduleAdvance(pending) = update(&mut app, Action::Dislike) else {
            panic!("expected an advance");
        };
        tui.motion = Some(CardMotion::exit(SwipeDecision::Dislike, None, card_owner(&app), now));
        let later = now + Duration::from_millis(200);
        assert!(card_visual(&app, &tui, later, 640.0).offset_x < 0.0);

        update(&mut app, Action::AdvanceDue { generation: pending.generation });
        assert_eq!(card_visual(&app, &tui, later, 640.0), CardVisual::default());
    }
}
