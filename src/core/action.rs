//! # Actions
//!
//! Everything that can happen in Swipedeck becomes an `Action`.
//! User drags a card? That's a stream of `Action::Input(sample)`.
//! A batch arrives? That's `Action::BatchLoaded { token, items }`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the adapter should carry out (spawn a fetch, schedule an advance,
//! warm some images). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Buttons, keys and gestures all funnel into the same `commit` path on the
//! deck, so the session bookkeeping can't diverge between them.

use log::{debug, info};

use crate::catalog::Item;
use crate::core::deck::{
    DeckPhase, DragOutcome, FetchToken, InputOutcome, PendingAdvance, SwipeDecision,
};
use crate::core::gesture::InputSample;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// First load on startup.
    StartFetch,
    BatchLoaded { token: FetchToken, items: Vec<Item> },
    FetchFailed { token: FetchToken, message: String },
    /// Raw pointer or touch sample aimed at the top card.
    Input(InputSample),
    Like,
    Dislike,
    /// Throw the session away and fetch a new batch.
    Restart,
    /// The exit animation of a commit has run its course.
    AdvanceDue { generation: u64 },
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchBatch(FetchToken),
    ScheduleAdvance(PendingAdvance),
    /// Animate the top card back to neutral from `from_delta`.
    SpringBack { from_delta: f32 },
    Preload(Vec<Item>),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::StartFetch => {
            app.status_message = String::from("Loading cats...");
            Effect::FetchBatch(app.deck.begin_fetch())
        }
        Action::Restart => {
            info!("Restart requested");
            app.status_message = String::from("Fetching a fresh batch...");
            Effect::FetchBatch(app.deck.begin_fetch())
        }
        Action::BatchLoaded { token, items } => {
            if !app.deck.accept_batch(token, items) {
                return Effect::None;
            }
            app.status_message = match app.deck.session().items.len() {
                0 => String::from("Nothing to swipe"),
                n => format!("{} cards", n),
            };
            preload(app)
        }
        Action::FetchFailed { token, message } => {
            if app.deck.fail_fetch(token, message) {
                app.status_message = String::from("Press r to try again");
            }
            Effect::None
        }
        Action::Input(sample) => match app.deck.handle_input(&sample) {
            InputOutcome::Released(DragOutcome::Committed(pending)) => committed(app, pending),
            InputOutcome::Released(DragOutcome::Reset { from_delta, .. }) => {
                Effect::SpringBack { from_delta }
            }
            _ => Effect::None,
        },
        Action::Like => decide(app, SwipeDecision::Like),
        Action::Dislike => decide(app, SwipeDecision::Dislike),
        Action::AdvanceDue { generation } => {
            if !app.deck.advance(generation) {
                return Effect::None;
            }
            if app.deck.phase() == &DeckPhase::Empty {
                app.status_message = format!("Done! {} liked", app.deck.session().liked.len());
                return Effect::None;
            }
            preload(app)
        }
        Action::Quit => Effect::Quit,
    }
}

fn decide(app: &mut App, decision: SwipeDecision) -> Effect {
    match app.deck.commit(decision) {
        Some(pending) => committed(app, pending),
        None => {
            debug!("{:?} ignored in phase {:?}", decision, app.deck.phase());
            Effect::None
        }
    }
}

fn committed(app: &mut App, pending: PendingAdvance) -> Effect {
    let s = app.deck.session();
    app.status_message = format!(
        "{} liked · {} left",
        s.liked.len(),
        s.items.len().saturating_sub(s.decided())
    );
    Effect::ScheduleAdvance(pending)
}

fn preload(app: &App) -> Effect {
    let window = app.deck.preload_window();
    if window.is_empty() {
        Effect::None
    } else {
        Effect::Preload(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gesture::PointerPhase;
    use crate::test_support::{items, test_app};

    fn pointer(phase: PointerPhase, x: f32) -> Action {
        Action::Input(InputSample::pointer(phase, x))
    }

    fn loaded_app(n: usize) -> App {
        let mut app = test_app();
        let Effect::FetchBatch(token) = update(&mut app, Action::StartFetch) else {
            panic!("expected a fetch");
        };
        update(&mut app, Action::BatchLoaded { token, items: items(n) });
        app
    }

    fn scheduled(effect: Effect) -> PendingAdvance {
        match effect {
            Effect::ScheduleAdvance(pending) => pending,
            other => panic!("expected ScheduleAdvance, got {:?}", other),
        }
    }

    #[test]
    fn test_start_fetch_enters_loading() {
        let mut app = test_app();
        let effect = update(&mut app, Action::StartFetch);
        assert!(matches!(effect, Effect::FetchBatch(_)));
        assert_eq!(app.deck.phase(), &DeckPhase::Loading);
    }

    #[test]
    fn test_batch_loaded_preloads_window() {
        let mut app = test_app();
        let Effect::FetchBatch(token) = update(&mut app, Action::StartFetch) else {
            panic!("expected a fetch");
        };
        let effect = update(&mut app, Action::BatchLoaded { token, items: items(10) });
        let Effect::Preload(window) = effect else {
            panic!("expected preload, got {:?}", effect);
        };
        let ids: Vec<_> = window.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["item-2", "item-3", "item-4"]);
        assert_eq!(app.status_message, "10 cards");
    }

    #[test]
    fn test_small_batch_has_nothing_to_preload() {
        let mut app = test_app();
        let Effect::FetchBatch(token) = update(&mut app, Action::StartFetch) else {
            panic!("expected a fetch");
        };
        let effect = update(&mut app, Action::BatchLoaded { token, items: items(2) });
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_gesture_commit_schedules_advance() {
        let mut app = loaded_app(3);
        update(&mut app, pointer(PointerPhase::Down, 100.0));
        update(&mut app, pointer(PointerPhase::Move, 260.0));
        let pending = scheduled(update(&mut app, pointer(PointerPhase::Up, 260.0)));
        assert_eq!(pending.delay, app.deck.settings().animation);
        assert_eq!(app.deck.session().liked.len(), 1);
        assert_eq!(app.deck.session().current_index, 0);

        update(&mut app, Action::AdvanceDue { generation: pending.generation });
        assert_eq!(app.deck.session().current_index, 1);
    }

    #[test]
    fn test_short_drag_springs_back() {
        let mut app = loaded_app(3);
        update(&mut app, pointer(PointerPhase::Down, 100.0));
        update(&mut app, pointer(PointerPhase::Move, 60.0));
        let effect = update(&mut app, pointer(PointerPhase::Up, 60.0));
        assert_eq!(effect, Effect::SpringBack { from_delta: -40.0 });
        assert_eq!(app.deck.session().decided(), 0);
    }

    #[test]
    fn test_buttons_share_commit_path() {
        let mut app = loaded_app(2);
        let pending = scheduled(update(&mut app, Action::Dislike));
        // Rapid second press while the card is still leaving.
        assert_eq!(update(&mut app, Action::Like), Effect::None);
        update(&mut app, Action::AdvanceDue { generation: pending.generation });

        let pending = scheduled(update(&mut app, Action::Like));
        update(&mut app, Action::AdvanceDue { generation: pending.generation });

        let s = app.deck.session();
        assert_eq!(s.disliked.len(), 1);
        assert_eq!(s.liked.len(), 1);
        assert_eq!(app.deck.phase(), &DeckPhase::Empty);
        assert_eq!(app.status_message, "Done! 1 liked");
    }

    #[test]
    fn test_restart_with_pending_advance() {
        let mut app = loaded_app(3);
        let stale = scheduled(update(&mut app, Action::Like));

        let Effect::FetchBatch(token) = update(&mut app, Action::Restart) else {
            panic!("expected a fetch");
        };
        update(&mut app, Action::BatchLoaded { token, items: items(3) });

        let effect = update(&mut app, Action::AdvanceDue { generation: stale.generation });
        assert_eq!(effect, Effect::None);
        let s = app.deck.session();
        assert_eq!(s.current_index, 0);
        assert!(s.liked.is_empty());
        assert!(s.disliked.is_empty());
    }

    #[test]
    fn test_stale_continuation_during_loading_is_ignored() {
        let mut app = loaded_app(3);
        let stale = scheduled(update(&mut app, Action::Like));
        update(&mut app, Action::Restart);
        update(&mut app, Action::AdvanceDue { generation: stale.generation });
        assert_eq!(app.deck.phase(), &DeckPhase::Loading);
    }

    #[test]
    fn test_late_response_after_restart_is_dropped() {
        let mut app = test_app();
        let Effect::FetchBatch(old) = update(&mut app, Action::StartFetch) else {
            panic!("expected a fetch");
        };
        let Effect::FetchBatch(new) = update(&mut app, Action::Restart) else {
            panic!("expected a fetch");
        };
        assert_eq!(
            update(&mut app, Action::BatchLoaded { token: old, items: items(7) }),
            Effect::None
        );
        update(&mut app, Action::BatchLoaded { token: new, items: items(1) });
        assert_eq!(app.deck.session().items.len(), 1);
    }

    #[test]
    fn test_fetch_failure_sets_retry_hint() {
        let mut app = test_app();
        let Effect::FetchBatch(token) = update(&mut app, Action::StartFetch) else {
            panic!("expected a fetch");
        };
        update(
            &mut app,
            Action::FetchFailed {
                token,
                message: "network error: timed out".into(),
            },
        );
        assert!(matches!(app.deck.phase(), DeckPhase::Failed(_)));
        assert_eq!(app.status_message, "Press r to try again");
    }

    #[test]
    fn test_empty_batch_reports_nothing_to_swipe() {
        let mut app = loaded_app(0);
        assert_eq!(app.deck.phase(), &DeckPhase::Empty);
        assert_eq!(app.status_message, "Nothing to swipe");
        assert_eq!(update(&mut app, Action::Like), Effect::None);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
