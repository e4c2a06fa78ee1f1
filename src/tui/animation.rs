//! Card motion between discrete states: the spring back after a short drag
//! and the fly-out after a commit. Purely visual; the deck never waits on it.

use std::time::{Duration, Instant};

use crate::core::deck::{CardVisual, RESET_TRANSITION, SwipeDecision};
use crate::core::gesture::rotation_degrees;

/// Length of the fly-out. The deck advances before this ends, so the next
/// card comes up while the old one is still leaving.
pub const EXIT_DURATION: Duration = Duration::from_millis(500);

/// Tilt reached at the end of a fly-out.
const EXIT_ROTATION_DEGREES: f32 = 30.0;

/// How far past the viewport a card travels, as a multiple of its width.
const EXIT_DISTANCE: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
enum MotionKind {
    SpringBack { from_delta: f32 },
    Exit { from: CardVisual, direction: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMotion {
    kind: MotionKind,
    started: Instant,
    /// `(generation, index)` of the card this motion belongs to.
    owner: (u64, usize),
}

impl CardMotion {
    pub fn spring_back(from_delta: f32, owner: (u64, usize), now: Instant) -> Self {
        Self {
            kind: MotionKind::SpringBack { from_delta },
            started: now,
            owner,
        }
    }

    /// Fly-out in the direction of `decision`, starting wherever the card was
    /// released (or from rest for button presses).
    pub fn exit(
        decision: SwipeDecision,
        from: Option<CardVisual>,
        owner: (u64, usize),
        now: Instant,
    ) -> Self {
        Self {
            kind: MotionKind::Exit {
                from: from.unwrap_or_default(),
                direction: decision.direction(),
            },
            started: now,
            owner,
        }
    }

    pub fn owner(&self) -> (u64, usize) {
        self.owner
    }

    fn duration(&self) -> Duration {
        match self.kind {
            MotionKind::SpringBack { .. } => RESET_TRANSITION,
            MotionKind::Exit { .. } => EXIT_DURATION,
        }
    }

    fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        (elapsed / self.duration().as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Pose at `now`. `viewport_px` is the width the card flies out of.
    pub fn visual(&self, now: Instant, viewport_px: f32) -> CardVisual {
        let t = ease(self.progress(now));
        match self.kind {
            MotionKind::SpringBack { from_delta } => {
                let offset_x = from_delta * (1.0 - t);
                CardVisual {
                    offset_x,
                    rotation_degrees: rotation_degrees(offset_x),
                    like_opacity: 0.0,
                    dislike_opacity: 0.0,
                    transition: Some(RESET_TRANSITION),
                }
            }
            MotionKind::Exit { from, direction } => {
                let end_x = direction * viewport_px * EXIT_DISTANCE;
                let end_rotation = direction * EXIT_ROTATION_DEGREES;
                CardVisual {
                    offset_x: lerp(from.offset_x, end_x, t),
                    rotation_degrees: lerp(from.rotation_degrees, end_rotation, t),
                    like_opacity: from.like_opacity,
                    dislike_opacity: from.dislike_opacity,
                    transition: Some(EXIT_DURATION),
                }
            }
        }
    }
}

/// Quadratic ease-out.
fn ease(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
