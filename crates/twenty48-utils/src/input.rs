//! Keyboard and touch input decoding into logical moves.

use crate::engine::Move;

/// Minimum swipe displacement, in device-independent pixels, along the
/// dominant axis.
pub const SWIPE_THRESHOLD_PX: f32 = 30.0;

/// Map a DOM-style key name (`ArrowLeft`, ...) to a move.
pub fn direction_from_key(key: &str) -> Option<Move> {
    match key {
        "ArrowLeft" => Some(Move::Left),
        "ArrowRight" => Some(Move::Right),
        "ArrowUp" => Some(Move::Up),
        "ArrowDown" => Some(Move::Down),
        _ => None,
    }
}

/// Decode a completed swipe from its displacement in screen coordinates
/// (positive `dy` points down).
///
/// The larger absolute component picks the axis; ties go vertical. The
/// displacement on that axis must exceed [`SWIPE_THRESHOLD_PX`].
pub fn swipe_direction(dx: f32, dy: f32) -> Option<Move> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.abs() > dy.abs() {
        if dx.abs() <= SWIPE_THRESHOLD_PX {
            None
        } else if dx > 0.0 {
            Some(Move::Right)
        } else {
            Some(Move::Left)
        }
    } else if dy.abs() <= SWIPE_THRESHOLD_PX {
        None
    } else if dy > 0.0 {
        Some(Move::Down)
    } else {
        Some(Move::Up)
    }
}

/// Tracks one touch gesture from start to end.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the touch started. A new start replaces any pending one.
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the gesture and decode it. Returns `None` without a prior
    /// [`begin`](Self::begin) or when the swipe is too short.
    pub fn end(&mut self, x: f32, y: f32) -> Option<Move> {
        let (sx, sy) = self.start.take()?;
        swipe_direction(x - sx, y - sy)
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}
