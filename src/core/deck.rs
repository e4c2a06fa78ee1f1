//! # Card Stack Controller
//!
//! Owns the browsing session and decides what a finished drag means.
//!
//! ```text
//!            begin_fetch            accept_batch
//!   ┌──────────┐ ─────────→ Loading ─────────→ Idle ←────────────────┐
//!   │  Failed  │ ←───────── (fail_fetch)        │ drag_begin          │
//!   └──────────┘                                ▼                     │ advance
//!                         Resetting ←──── Dragging ────→ Committing ──┘
//!                       (|Δ| ≤ threshold)    (|Δ| > threshold)   │
//!                                                               ▼
//!                                                    Empty (all decided)
//! ```
//!
//! A commit records the decision immediately. Only the index bump waits
//! for the exit animation, through a [`PendingAdvance`] that carries the
//! session generation it was issued for. Replacing the session bumps the
//! generation, so a continuation from an old session can't touch a new one.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::catalog::Item;
use crate::core::gesture::{
    GestureSignal, GestureTracker, InputSource, PointerPhase, PointerSample, SWIPE_THRESHOLD,
    decision_opacity, rotation_degrees,
};

pub const DEFAULT_ANIMATION: Duration = Duration::from_millis(300);
pub const RESET_TRANSITION: Duration = Duration::from_millis(300);
pub const DEFAULT_PRELOAD_START: usize = 2;
pub const DEFAULT_PRELOAD_END: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DeckSettings {
    pub threshold: f32,
    /// Delay between a commit and the index advancing.
    pub animation: Duration,
    /// Preload window, relative to the current index: `[start, end)`.
    pub preload_start: usize,
    pub preload_end: usize,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            threshold: SWIPE_THRESHOLD,
            animation: DEFAULT_ANIMATION,
            preload_start: DEFAULT_PRELOAD_START,
            preload_end: DEFAULT_PRELOAD_END,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    Like,
    Dislike,
}

impl SwipeDecision {
    /// Positive drags like, everything else dislikes.
    pub fn from_delta(delta: f32) -> Self {
        if delta > 0.0 {
            SwipeDecision::Like
        } else {
            SwipeDecision::Dislike
        }
    }

    /// +1 for right, -1 for left.
    pub fn direction(self) -> f32 {
        match self {
            SwipeDecision::Like => 1.0,
            SwipeDecision::Dislike => -1.0,
        }
    }
}

// ============================================================================
// Session
// ============================================================================

#[derive(Debug, Clone)]
pub struct Session {
    pub items: Vec<Item>,
    pub current_index: usize,
    pub liked: Vec<Item>,
    pub disliked: Vec<Item>,
    /// Every decision in encounter order; `history[i]` applies to `items[i]`.
    pub history: Vec<SwipeDecision>,
    pub started_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Session {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            current_index: 0,
            liked: Vec::new(),
            disliked: Vec::new(),
            history: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.items.get(self.current_index)
    }

    pub fn lookahead_item(&self) -> Option<&Item> {
        self.items.get(self.current_index + 1)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.items.len()
    }

    pub fn decided(&self) -> usize {
        self.liked.len() + self.disliked.len()
    }

    /// Classifies the item at the next undecided position. Does not move
    /// `current_index`.
    fn record(&mut self, decision: SwipeDecision) -> Option<Item> {
        let item = self.items.get(self.history.len())?.clone();
        match decision {
            SwipeDecision::Like => self.liked.push(item.clone()),
            SwipeDecision::Dislike => self.disliked.push(item.clone()),
        }
        self.history.push(decision);
        Some(item)
    }

    /// Liked and disliked, merged back in encounter order, form a prefix of `items`.
    pub fn decisions_form_prefix(&self) -> bool {
        if self.decided() != self.history.len() || self.history.len() > self.items.len() {
            return false;
        }
        let mut liked = self.liked.iter();
        let mut disliked = self.disliked.iter();
        self.history
            .iter()
            .zip(&self.items)
            .all(|(decision, item)| {
                let next = match decision {
                    SwipeDecision::Like => liked.next(),
                    SwipeDecision::Dislike => disliked.next(),
                };
                next == Some(item)
            })
    }
}

// ============================================================================
// Controller Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DeckPhase {
    Loading,
    Failed(String),
    Idle,
    Dragging,
    Committing(SwipeDecision),
    Resetting,
    Empty,
}

/// Sequence number of a batch request. Only the newest one may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(pub u64);

/// The deferred half of a commit: advance the index after `delay`, but only
/// if the session is still `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub generation: u64,
    pub delay: Duration,
}

/// How the top card should look right now.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardVisual {
    pub offset_x: f32,
    pub rotation_degrees: f32,
    pub like_opacity: f32,
    pub dislike_opacity: f32,
    /// `None` = follow the pointer with no easing.
    pub transition: Option<Duration>,
}

impl CardVisual {
    pub fn dragged(delta: f32, threshold: f32) -> Self {
        let opacity = decision_opacity(delta, threshold);
        Self {
            offset_x: delta,
            rotation_degrees: rotation_degrees(delta),
            like_opacity: opacity.like,
            dislike_opacity: opacity.dislike,
            transition: None,
        }
    }

    pub fn neutral() -> Self {
        Self {
            transition: Some(RESET_TRANSITION),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    Committed(PendingAdvance),
    /// Released under the threshold; carries the neutral visual and the
    /// delta the card springs back from.
    Reset { visual: CardVisual, from_delta: f32 },
    /// Past the threshold but the deck couldn't take a commit.
    Rejected,
    NotDragging,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    Began,
    Moved {
        visual: CardVisual,
        /// Ask the input source to swallow its default scroll/selection.
        suppress_default: bool,
    },
    Released(DragOutcome),
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub liked: Vec<Item>,
    pub disliked_count: usize,
    pub total: usize,
    pub elapsed: Duration,
}

impl SessionSummary {
    pub fn liked_count(&self) -> usize {
        self.liked.len()
    }
}

// ============================================================================
// Controller
// ============================================================================

#[derive(Debug)]
pub struct DeckController {
    settings: DeckSettings,
    session: Session,
    phase: DeckPhase,
    tracker: GestureTracker,
    /// Bumped whenever the session is replaced.
    generation: u64,
    fetch_seq: u64,
    /// A commit is waiting for its advance.
    advance_pending: bool,
}

impl Default for DeckController {
    fn default() -> Self {
        Self::new(DeckSettings::default())
    }
}

impl DeckController {
    pub fn new(settings: DeckSettings) -> Self {
        Self {
            settings,
            session: Session::default(),
            phase: DeckPhase::Loading,
            tracker: GestureTracker::new(),
            generation: 0,
            fetch_seq: 0,
            advance_pending: false,
        }
    }

    pub fn settings(&self) -> &DeckSettings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> &DeckPhase {
        &self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn advance_pending(&self) -> bool {
        self.advance_pending
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.session.current_item()
    }

    pub fn lookahead_item(&self) -> Option<&Item> {
        self.session.lookahead_item()
    }

    /// Whether a drag or a decision would be taken right now.
    pub fn accepts_input(&self) -> bool {
        !self.advance_pending
            && matches!(
                self.phase,
                DeckPhase::Idle | DeckPhase::Dragging | DeckPhase::Resetting
            )
    }

    // ------------------------------------------------------------------------
    // Fetch boundary
    // ------------------------------------------------------------------------

    /// Enters `Loading` and issues the token the response must carry.
    /// Invalidates any pending advance from the session being replaced.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.fetch_seq += 1;
        self.generation += 1;
        self.advance_pending = false;
        self.tracker.cancel();
        self.phase = DeckPhase::Loading;
        info!(
            "Fetch #{} started (generation {})",
            self.fetch_seq, self.generation
        );
        FetchToken(self.fetch_seq)
    }

    fn is_current_fetch(&self, token: FetchToken) -> bool {
        token.0 == self.fetch_seq && self.phase == DeckPhase::Loading
    }

    pub fn accept_batch(&mut self, token: FetchToken, items: Vec<Item>) -> bool {
        if !self.is_current_fetch(token) {
            warn!(
                "Discarding stale batch #{} ({} items); newest is #{}",
                token.0,
                items.len(),
                self.fetch_seq
            );
            return false;
        }
        self.load_session(items);
        true
    }

    pub fn fail_fetch(&mut self, token: FetchToken, message: String) -> bool {
        if !self.is_current_fetch(token) {
            warn!("Discarding stale fetch failure #{}: {}", token.0, message);
            return false;
        }
        warn!("Fetch #{} failed: {}", token.0, message);
        self.phase = DeckPhase::Failed(message);
        true
    }

    /// Starts a fresh session. An empty batch goes straight to `Empty`.
    pub fn load_session(&mut self, items: Vec<Item>) {
        self.generation += 1;
        self.advance_pending = false;
        self.tracker.cancel();
        self.session = Session::new(items);
        self.phase = if self.session.is_exhausted() {
            DeckPhase::Empty
        } else {
            DeckPhase::Idle
        };
        info!(
            "Session loaded: {} items (generation {})",
            self.session.items.len(),
            self.generation
        );
    }

    // ------------------------------------------------------------------------
    // Dragging
    // ------------------------------------------------------------------------

    /// Feeds one raw pointer or touch sample to the top card's tracker.
    /// Presses are only taken while the deck accepts input; moves and
    /// releases only while dragging.
    pub fn handle_input(&mut self, sample: &impl InputSource) -> InputOutcome {
        let allowed = match sample.phase() {
            PointerPhase::Down => self.accepts_input() && self.current_item().is_some(),
            PointerPhase::Move | PointerPhase::Up => self.phase == DeckPhase::Dragging,
        };
        if !allowed {
            return InputOutcome::Ignored;
        }
        match self.tracker.feed(sample) {
            GestureSignal::Began => {
                self.phase = DeckPhase::Dragging;
                InputOutcome::Began
            }
            GestureSignal::Moved(m) => InputOutcome::Moved {
                visual: CardVisual::dragged(m.delta, self.settings.threshold),
                suppress_default: m.suppress_default,
            },
            GestureSignal::Ended(delta) => InputOutcome::Released(self.on_drag_end(delta)),
            GestureSignal::Ignored => InputOutcome::Ignored,
        }
    }

    pub fn drag_begin(&mut self, client_x: f32) -> bool {
        let press = PointerSample {
            phase: PointerPhase::Down,
            x: client_x,
        };
        matches!(self.handle_input(&press), InputOutcome::Began)
    }

    pub fn drag_move(&mut self, client_x: f32) -> Option<CardVisual> {
        let motion = PointerSample {
            phase: PointerPhase::Move,
            x: client_x,
        };
        match self.handle_input(&motion) {
            InputOutcome::Moved { visual, .. } => Some(visual),
            _ => None,
        }
    }

    pub fn drag_end(&mut self) -> DragOutcome {
        if self.phase != DeckPhase::Dragging {
            return DragOutcome::NotDragging;
        }
        match self.tracker.end() {
            Some(delta) => self.on_drag_end(delta),
            None => DragOutcome::NotDragging,
        }
    }

    /// Live visual for the top card while dragging.
    pub fn drag_visual(&self) -> Option<CardVisual> {
        (self.phase == DeckPhase::Dragging)
            .then(|| CardVisual::dragged(self.tracker.delta(), self.settings.threshold))
    }

    pub fn on_drag_end(&mut self, delta: f32) -> DragOutcome {
        if delta.abs() > self.settings.threshold {
            return match self.commit(SwipeDecision::from_delta(delta)) {
                Some(pending) => DragOutcome::Committed(pending),
                None => DragOutcome::Rejected,
            };
        }
        debug!("Drag released at {:.1}px, springing back", delta);
        if matches!(self.phase, DeckPhase::Idle | DeckPhase::Dragging) {
            self.phase = DeckPhase::Resetting;
        }
        DragOutcome::Reset {
            visual: self.reset(),
            from_delta: delta,
        }
    }

    /// Neutral pose for the top card.
    pub fn reset(&self) -> CardVisual {
        CardVisual::neutral()
    }

    // ------------------------------------------------------------------------
    // Commit / advance
    // ------------------------------------------------------------------------

    /// Records `decision` for the current item right away and returns the
    /// advance to schedule. `None` while a previous advance is still pending
    /// or when there is no interactive card.
    pub fn commit(&mut self, decision: SwipeDecision) -> Option<PendingAdvance> {
        if !self.accepts_input() {
            debug!(
                "Commit {:?} rejected in phase {:?} (pending={})",
                decision, self.phase, self.advance_pending
            );
            return None;
        }
        self.tracker.cancel();
        let item = self.session.record(decision)?;
        info!(
            "Committed {:?} for {} ({}/{})",
            decision,
            item.id,
            self.session.current_index + 1,
            self.session.items.len()
        );
        self.advance_pending = true;
        self.phase = DeckPhase::Committing(decision);
        Some(PendingAdvance {
            generation: self.generation,
            delay: self.settings.animation,
        })
    }

    /// The continuation of a commit. Ignored if the session it belongs to
    /// has been replaced or nothing is pending.
    pub fn advance(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                "Ignoring advance for generation {} (current {})",
                generation, self.generation
            );
            return false;
        }
        if !self.advance_pending {
            debug!("Ignoring advance with nothing pending");
            return false;
        }
        self.advance_pending = false;
        self.session.current_index += 1;
        debug_assert!(self.invariants_hold());
        self.phase = if self.session.is_exhausted() {
            info!(
                "Session finished: {} liked, {} disliked",
                self.session.liked.len(),
                self.session.disliked.len()
            );
            DeckPhase::Empty
        } else {
            DeckPhase::Idle
        };
        true
    }

    // ------------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------------

    /// Items worth warming now: `[index + start, index + end)`, clipped.
    pub fn preload_window(&self) -> Vec<Item> {
        let len = self.session.items.len();
        let start = (self.session.current_index + self.settings.preload_start).min(len);
        let end = (self.session.current_index + self.settings.preload_end).min(len);
        if start >= end {
            return Vec::new();
        }
        self.session.items[start..end].to_vec()
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        if self.phase != DeckPhase::Empty {
            return None;
        }
        let elapsed = (Utc::now() - self.session.started_at)
            .to_std()
            .unwrap_or_default();
        Some(SessionSummary {
            liked: self.session.liked.clone(),
            disliked_count: self.session.disliked.len(),
            total: self.session.items.len(),
            elapsed,
        })
    }

    /// Every decided item is accounted for exactly once, in order.
    pub fn invariants_hold(&self) -> bool {
        let s = &self.session;
        let expected_index = if self.advance_pending {
            s.decided().saturating_sub(1)
        } else {
            s.decided()
        };
        s.current_index == expected_index && s.decisions_form_prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::items;

    fn loaded(n: usize) -> DeckController {
        let mut deck = DeckController::default();
        deck.load_session(items(n));
        deck
    }

    fn swipe(deck: &mut DeckController, delta: f32) -> DragOutcome {
        assert!(deck.drag_begin(500.0));
        deck.drag_move(500.0 + delta);
        deck.drag_end()
    }

    fn land(deck: &mut DeckController, outcome: DragOutcome) {
        match outcome {
            DragOutcome::Committed(pending) => assert!(deck.advance(pending.generation)),
            other => panic!("expected a commit, got {:?}", other),
        }
    }

    #[test]
    fn test_scenario_like_dislike_cancel_like() {
        let mut deck = loaded(3);
        let [a, b, c] = [0, 1, 2].map(|i| deck.session().items[i].clone());

        let outcome = swipe(&mut deck, 150.0);
        assert_eq!(deck.session().liked, vec![a.clone()]);
        assert_eq!(deck.session().current_index, 0, "index moves only after the delay");
        land(&mut deck, outcome);
        assert_eq!(deck.session().current_index, 1);

        let outcome = swipe(&mut deck, -120.0);
        land(&mut deck, outcome);
        assert_eq!(deck.session().disliked, vec![b]);
        assert_eq!(deck.session().current_index, 2);

        let outcome = swipe(&mut deck, 40.0);
        assert!(matches!(outcome, DragOutcome::Reset { from_delta, .. } if from_delta == 40.0));
        assert_eq!(deck.phase(), &DeckPhase::Resetting);
        assert_eq!(deck.session().current_index, 2);
        assert_eq!(deck.session().decided(), 2);

        let outcome = swipe(&mut deck, 200.0);
        land(&mut deck, outcome);
        assert_eq!(deck.session().liked, vec![a, c]);
        assert_eq!(deck.session().current_index, 3);
        assert_eq!(deck.phase(), &DeckPhase::Empty);

        let summary = deck.summary().unwrap();
        assert_eq!(summary.liked_count(), 2);
        assert_eq!(summary.disliked_count, 1);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn test_empty_batch_goes_straight_to_summary() {
        let mut deck = DeckController::default();
        let token = deck.begin_fetch();
        assert!(deck.accept_batch(token, Vec::new()));
        assert_eq!(deck.phase(), &DeckPhase::Empty);
        assert_eq!(deck.current_item(), None);
        assert!(!deck.drag_begin(10.0));
        assert_eq!(deck.commit(SwipeDecision::Like), None);
        assert_eq!(deck.summary().unwrap().liked_count(), 0);
    }

    #[test]
    fn test_release_at_threshold_does_not_commit() {
        let mut deck = loaded(2);
        let outcome = swipe(&mut deck, SWIPE_THRESHOLD);
        assert!(matches!(outcome, DragOutcome::Reset { .. }));
        let outcome = swipe(&mut deck, -SWIPE_THRESHOLD);
        assert!(matches!(outcome, DragOutcome::Reset { .. }));
        assert_eq!(deck.session().decided(), 0);
        assert!(deck.invariants_hold());
    }

    #[test]
    fn test_commit_rejected_while_advance_pending() {
        let mut deck = loaded(3);
        let pending = deck.commit(SwipeDecision::Like).unwrap();
        assert_eq!(deck.commit(SwipeDecision::Dislike), None);
        assert!(!deck.drag_begin(0.0));
        assert_eq!(deck.session().decided(), 1);

        assert!(deck.advance(pending.generation));
        assert!(deck.commit(SwipeDecision::Dislike).is_some());
        assert_eq!(deck.session().disliked, vec![deck.session().items[1].clone()]);
    }

    #[test]
    fn test_advance_only_once() {
        let mut deck = loaded(3);
        let pending = deck.commit(SwipeDecision::Like).unwrap();
        assert!(deck.advance(pending.generation));
        assert!(!deck.advance(pending.generation));
        assert_eq!(deck.session().current_index, 1);
    }

    #[test]
    fn test_restart_invalidates_pending_advance() {
        let mut deck = loaded(3);
        let stale = deck.commit(SwipeDecision::Like).unwrap();

        let token = deck.begin_fetch();
        assert!(deck.accept_batch(token, items(4)));
        assert!(!deck.advance(stale.generation));

        assert_eq!(deck.session().current_index, 0);
        assert!(deck.session().liked.is_empty());
        assert_eq!(deck.phase(), &DeckPhase::Idle);
        assert!(deck.commit(SwipeDecision::Dislike).is_some());
    }

    #[test]
    fn test_stale_batch_is_discarded() {
        let mut deck = DeckController::default();
        let first = deck.begin_fetch();
        let second = deck.begin_fetch();
        assert!(!deck.accept_batch(first, items(5)));
        assert_eq!(deck.phase(), &DeckPhase::Loading);
        assert!(!deck.fail_fetch(first, "late".into()));
        assert!(deck.accept_batch(second, items(2)));
        assert_eq!(deck.session().items.len(), 2);
        // Same token can't land twice.
        assert!(!deck.accept_batch(second, items(9)));
    }

    #[test]
    fn test_fetch_failure_is_terminal_until_restart() {
        let mut deck = DeckController::default();
        let token = deck.begin_fetch();
        assert!(deck.fail_fetch(token, "network error: refused".into()));
        assert_eq!(
            deck.phase(),
            &DeckPhase::Failed("network error: refused".into())
        );
        assert!(!deck.drag_begin(0.0));
        let retry = deck.begin_fetch();
        assert!(deck.accept_batch(retry, items(1)));
        assert_eq!(deck.phase(), &DeckPhase::Idle);
    }

    #[test]
    fn test_reset_is_idempotent_and_neutral() {
        let deck = loaded(1);
        let once = deck.reset();
        let twice = deck.reset();
        assert_eq!(once, twice);
        assert_eq!(once.offset_x, 0.0);
        assert_eq!(once.like_opacity, 0.0);
        assert_eq!(once.dislike_opacity, 0.0);
        assert_eq!(once.transition, Some(RESET_TRANSITION));
    }

    #[test]
    fn test_drag_visual_follows_pointer() {
        let mut deck = loaded(1);
        assert_eq!(deck.drag_visual(), None);
        deck.drag_begin(100.0);
        let visual = deck.drag_move(60.0).unwrap();
        assert_eq!(visual.offset_x, -40.0);
        assert!((visual.rotation_degrees + 4.0).abs() < 1e-6);
        assert!((visual.dislike_opacity - 0.5).abs() < 1e-6);
        assert_eq!(visual.like_opacity, 0.0);
        assert_eq!(deck.drag_visual(), Some(visual));
    }

    #[test]
    fn test_drag_can_restart_while_springing_back() {
        let mut deck = loaded(2);
        swipe(&mut deck, 30.0);
        assert_eq!(deck.phase(), &DeckPhase::Resetting);
        assert!(deck.drag_begin(0.0));
        assert_eq!(deck.phase(), &DeckPhase::Dragging);
    }

    #[test]
    fn test_button_commit_during_drag_drops_the_drag() {
        let mut deck = loaded(2);
        deck.drag_begin(0.0);
        deck.drag_move(50.0);
        let pending = deck.commit(SwipeDecision::Dislike).unwrap();
        assert_eq!(deck.drag_end(), DragOutcome::NotDragging);
        assert!(deck.advance(pending.generation));
        assert_eq!(deck.session().disliked.len(), 1);
    }

    #[test]
    fn test_preload_window_clips_to_range() {
        let mut deck = loaded(6);
        let ids = |deck: &DeckController| {
            deck.preload_window()
                .into_iter()
                .map(|item| item.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&deck), vec!["item-2", "item-3", "item-4"]);

        for _ in 0..3 {
            let pending = deck.commit(SwipeDecision::Like).unwrap();
            deck.advance(pending.generation);
        }
        assert_eq!(ids(&deck), vec!["item-5"]);

        let pending = deck.commit(SwipeDecision::Like).unwrap();
        deck.advance(pending.generation);
        assert!(ids(&deck).is_empty());
    }

    #[test]
    fn test_lookahead_item() {
        let mut deck = loaded(2);
        assert_eq!(deck.lookahead_item().unwrap().id, "item-1");
        let pending = deck.commit(SwipeDecision::Like).unwrap();
        deck.advance(pending.generation);
        assert_eq!(deck.current_item().unwrap().id, "item-1");
        assert_eq!(deck.lookahead_item(), None);
    }

    #[test]
    fn test_touch_swipe_commits_dislike() {
        use crate::core::gesture::TouchSample;

        let mut deck = loaded(2);
        let touch = |phase, touches: Vec<f32>| TouchSample { phase, touches };
        assert_eq!(
            deck.handle_input(&touch(PointerPhase::Down, vec![300.0])),
            InputOutcome::Began
        );
        let moved = deck.handle_input(&touch(PointerPhase::Move, vec![150.0]));
        assert!(matches!(
            moved,
            InputOutcome::Moved { suppress_default: true, visual } if visual.offset_x == -150.0
        ));
        let released = deck.handle_input(&touch(PointerPhase::Up, vec![]));
        assert!(matches!(released, InputOutcome::Released(DragOutcome::Committed(_))));
        assert_eq!(deck.session().disliked.len(), 1);
    }

    #[test]
    fn test_touch_release_with_second_finger_keeps_direction() {
        use crate::core::gesture::TouchSample;

        let mut deck = loaded(2);
        let touch = |phase, touches: Vec<f32>| TouchSample { phase, touches };
        deck.handle_input(&touch(PointerPhase::Down, vec![300.0, 900.0]));
        deck.handle_input(&touch(PointerPhase::Move, vec![150.0, 900.0]));
        let released = deck.handle_input(&touch(PointerPhase::Up, vec![900.0]));
        assert!(matches!(released, InputOutcome::Released(DragOutcome::Committed(_))));
        assert_eq!(deck.session().disliked.len(), 1);
        assert!(deck.session().liked.is_empty());
    }

    #[test]
    fn test_configured_threshold_drives_visual_and_commit() {
        let mut deck = DeckController::new(DeckSettings {
            threshold: 40.0,
            ..DeckSettings::default()
        });
        deck.load_session(items(2));
        deck.drag_begin(0.0);
        deck.drag_move(32.0);
        let visual = deck.drag_visual().unwrap();
        assert_eq!(visual.like_opacity, 1.0);
        assert!(matches!(deck.drag_end(), DragOutcome::Reset { .. }));

        let outcome = swipe(&mut deck, 45.0);
        assert!(matches!(outcome, DragOutcome::Committed(_)));
    }

    #[test]
    fn test_input_ignored_outside_interactive_phases() {
        let mut deck = DeckController::default();
        let press = PointerSample { phase: PointerPhase::Down, x: 0.0 };
        assert_eq!(deck.handle_input(&press), InputOutcome::Ignored, "still loading");

        deck.load_session(items(1));
        let stray = PointerSample { phase: PointerPhase::Move, x: 80.0 };
        assert_eq!(deck.handle_input(&stray), InputOutcome::Ignored);
        assert_eq!(deck.phase(), &DeckPhase::Idle);
    }

    #[test]
    fn test_accounting_holds_at_every_idle_state() {
        let mut deck = loaded(8);
        let deltas = [150.0, -30.0, -101.0, 99.0, 300.0, -250.0, 0.0, 120.0, 180.0, -190.0, 101.0, -400.0];
        for delta in deltas {
            if deck.phase() == &DeckPhase::Empty {
                break;
            }
            if let DragOutcome::Committed(pending) = swipe(&mut deck, delta) {
                assert!(deck.invariants_hold());
                deck.advance(pending.generation);
            }
            let s = deck.session();
            assert_eq!(s.decided() + (s.items.len() - s.current_index), s.items.len());
            assert!(deck.invariants_hold());
        }
        assert_eq!(deck.phase(), &DeckPhase::Empty);
    }
}
