//! # Gesture Tracker
//!
//! Turns a stream of pointer or touch samples into one horizontal drag delta,
//! plus the presentation hints derived from it (tilt and overlay opacity).
//!
//! ```text
//! PointerSample ─┐
//!                ├─ InputSource ─→ GestureTracker::feed ─→ GestureSignal
//! TouchSample ───┘                  (begin / move / end)
//! ```
//!
//! The tracker only measures. Whether a released drag becomes a like, a
//! dislike, or a spring-back is decided by the deck controller.

/// Release distance (in px) a drag must exceed to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 100.0;

/// Degrees of tilt per pixel of drag.
pub const ROTATION_PER_PX: f32 = 0.1;

/// Visual bound for the tilt. The raw value is not clamped; renderers clamp.
pub const ROTATION_MAX_DEGREES: f32 = 20.0;

/// Overlays reach full opacity at this fraction of the threshold.
const OPACITY_RAMP: f32 = 0.8;

// ============================================================================
// Input Port
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Anything that can be reduced to begin/move/end with a single x coordinate.
pub trait InputSource {
    fn phase(&self) -> PointerPhase;

    /// Horizontal position in px. `None` when the sample carries no position
    /// (e.g. a touch end with no remaining touches).
    fn client_x(&self) -> Option<f32>;

    /// Position to settle on at release. `None` keeps the last move.
    fn release_x(&self) -> Option<f32> {
        self.client_x()
    }
}

/// Mouse / pen sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub phase: PointerPhase,
    pub x: f32,
}

impl InputSource for PointerSample {
    fn phase(&self) -> PointerPhase {
        self.phase
    }

    fn client_x(&self) -> Option<f32> {
        Some(self.x)
    }
}

/// Touch sample. Only the first active touch is tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchSample {
    pub phase: PointerPhase,
    pub touches: Vec<f32>,
}

impl InputSource for TouchSample {
    fn phase(&self) -> PointerPhase {
        self.phase
    }

    fn client_x(&self) -> Option<f32> {
        self.touches.first().copied()
    }

    // A touch end lists the fingers still down, not the one lifted.
    fn release_x(&self) -> Option<f32> {
        None
    }
}

/// Either kind of sample, so adapters can hand the core one type.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSample {
    Pointer(PointerSample),
    Touch(TouchSample),
}

impl InputSample {
    pub fn pointer(phase: PointerPhase, x: f32) -> Self {
        InputSample::Pointer(PointerSample { phase, x })
    }
}

impl InputSource for InputSample {
    fn phase(&self) -> PointerPhase {
        match self {
            InputSample::Pointer(p) => p.phase(),
            InputSample::Touch(t) => t.phase(),
        }
    }

    fn client_x(&self) -> Option<f32> {
        match self {
            InputSample::Pointer(p) => p.client_x(),
            InputSample::Touch(t) => t.client_x(),
        }
    }

    fn release_x(&self) -> Option<f32> {
        match self {
            InputSample::Pointer(p) => p.release_x(),
            InputSample::Touch(t) => t.release_x(),
        }
    }
}

// ============================================================================
// Drag State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub active: bool,
    pub start_x: f32,
    pub current_x: f32,
}

impl DragState {
    pub fn delta(&self) -> f32 {
        self.current_x - self.start_x
    }
}

/// Result of a move while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMove {
    pub delta: f32,
    /// The input source should swallow its default scroll/selection handling.
    pub suppress_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSignal {
    Began,
    Moved(DragMove),
    Ended(f32),
    /// Sample arrived in a state where it means nothing (move before down, etc.).
    Ignored,
}

/// Like/dislike overlay opacities. At most one is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayOpacity {
    pub like: f32,
    pub dislike: f32,
}

// ============================================================================
// Tracker
// ============================================================================

/// Tracks one horizontal drag. Deciding what the delta means is left to the
/// caller, which owns the threshold.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    state: DragState,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Current delta, or 0 when idle.
    pub fn delta(&self) -> f32 {
        if self.state.active { self.state.delta() } else { 0.0 }
    }

    /// Starts a drag. A second begin during the same drag keeps the original start.
    pub fn begin(&mut self, client_x: f32) -> bool {
        if self.state.active {
            return false;
        }
        self.state = DragState {
            active: true,
            start_x: client_x,
            current_x: client_x,
        };
        true
    }

    pub fn move_to(&mut self, client_x: f32) -> Option<DragMove> {
        if !self.state.active {
            return None;
        }
        self.state.current_x = client_x;
        Some(DragMove {
            delta: self.state.delta(),
            suppress_default: true,
        })
    }

    /// Finishes the drag and hands back the final delta.
    pub fn end(&mut self) -> Option<f32> {
        if !self.state.active {
            return None;
        }
        let delta = self.state.delta();
        self.state = DragState::default();
        Some(delta)
    }

    /// Drops the drag without reporting a delta.
    pub fn cancel(&mut self) {
        self.state = DragState::default();
    }

    /// Routes a raw sample from any input source to begin/move/end.
    pub fn feed(&mut self, sample: &impl InputSource) -> GestureSignal {
        match sample.phase() {
            PointerPhase::Down => match sample.client_x() {
                Some(x) if self.begin(x) => GestureSignal::Began,
                _ => GestureSignal::Ignored,
            },
            PointerPhase::Move => sample
                .client_x()
                .and_then(|x| self.move_to(x))
                .map_or(GestureSignal::Ignored, GestureSignal::Moved),
            PointerPhase::Up => {
                if let Some(x) = sample.release_x() {
                    self.move_to(x);
                }
                self.end().map_or(GestureSignal::Ignored, GestureSignal::Ended)
            }
        }
    }
}

// ============================================================================
// Derived Values
// ============================================================================

pub fn rotation_degrees(delta: f32) -> f32 {
    delta * ROTATION_PER_PX
}

pub fn decision_opacity(delta: f32, threshold: f32) -> OverlayOpacity {
    let magnitude = (delta.abs() / (threshold * OPACITY_RAMP)).clamp(0.0, 1.0);
    if delta > 0.0 {
        OverlayOpacity {
            like: magnitude,
            dislike: 0.0,
        }
    } else if delta < 0.0 {
        OverlayOpacity {
            like: 0.0,
            dislike: magnitude,
        }
    } else {
        OverlayOpacity::default()
    }
}
