//! Rotation Controller
//!
//! A per-axis state machine driven by a fixed 10 ms tick. While a session is
//! active the controller accumulates degrees on the active axis; on release
//! the accumulated reading is folded into [`TransformState`] as radians.
//!
//! The per-axis degree accumulators persist across sessions: reactivating an
//! axis continues from its previous reading, exactly as the physical console
//! behaves.

use std::time::Duration;

use crate::transform::{Axis, RotationDirection, TransformState};

/// Interval between rotation ticks while a session is active.
pub const ROTATION_TICK: Duration = Duration::from_millis(10);

/// Degrees added per tick (signed by the session direction).
pub const TICK_STEP_DEGREES: f64 = 0.9;

/// Accumulators are wrapped back toward (-360, 360].
pub const WRAP_LIMIT_DEGREES: f64 = 360.0;

/// Rotation session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationState {
    /// No session active.
    Idle,
    /// One axis is accumulating.
    Rotating {
        /// The active axis.
        axis: Axis,
        /// The angular direction of the session.
        direction: RotationDirection,
    },
}

/// State machine that accumulates rotation degrees on timed ticks.
#[derive(Clone, Debug)]
pub struct RotationController {
    state: RotationState,
    /// Per-axis accumulated degrees, persistent across sessions.
    degrees: [f64; 3],
}

impl Default for RotationController {
    fn default() -> Self {
        Self {
            state: RotationState::Idle,
            degrees: [0.0; 3],
        }
    }
}

impl RotationController {
    /// Create an idle controller with zeroed accumulators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        matches!(self.state, RotationState::Rotating { .. })
    }

    /// The axis of the active session, if any.
    #[must_use]
    pub fn active_axis(&self) -> Option<Axis> {
        match self.state {
            RotationState::Rotating { axis, .. } => Some(axis),
            RotationState::Idle => None,
        }
    }

    /// Accumulated degrees for one axis.
    #[must_use]
    pub fn degrees(&self, axis: Axis) -> f64 {
        self.degrees[axis.index()]
    }

    /// Start a session. Returns `false` (and changes nothing) if a session
    /// is already active: a second press is rejected, not queued.
    pub fn activate(&mut self, axis: Axis, direction: RotationDirection) -> bool {
        if self.is_rotating() {
            return false;
        }
        self.state = RotationState::Rotating { axis, direction };
        true
    }

    /// End the active session, folding the active axis's accumulated degrees
    /// into the transform state as radians. Returns the folded axis, or
    /// `None` if no session was active.
    pub fn deactivate(&mut self, transform: &mut TransformState) -> Option<Axis> {
        match self.state {
            RotationState::Rotating { axis, .. } => {
                transform.set_angle(axis, self.degrees[axis.index()].to_radians());
                self.state = RotationState::Idle;
                Some(axis)
            }
            RotationState::Idle => None,
        }
    }

    /// One timer tick. Wraps at most one accumulator back toward
    /// (-360, 360], then steps the active axis. Returns the active axis and
    /// its new reading for display, or `None` when idle.
    ///
    /// The wrap check runs over all three accumulators in fixed X, Y, Z
    /// priority order regardless of which axis is active, and applies at
    /// most one correction per tick. This matches the shipped console; see
    /// DESIGN.md before changing it.
    pub fn tick(&mut self) -> Option<(Axis, f64)> {
        let RotationState::Rotating { axis, direction } = self.state else {
            return None;
        };

        let d = &mut self.degrees;
        if d[0] > WRAP_LIMIT_DEGREES {
            d[0] -= WRAP_LIMIT_DEGREES;
        } else if d[1] > WRAP_LIMIT_DEGREES {
            d[1] -= WRAP_LIMIT_DEGREES;
        } else if d[2] > WRAP_LIMIT_DEGREES {
            d[2] -= WRAP_LIMIT_DEGREES;
        } else if d[0] < -WRAP_LIMIT_DEGREES {
            d[0] += WRAP_LIMIT_DEGREES;
        } else if d[1] < -WRAP_LIMIT_DEGREES {
            d[1] += WRAP_LIMIT_DEGREES;
        } else if d[2] < -WRAP_LIMIT_DEGREES {
            d[2] += WRAP_LIMIT_DEGREES;
        }

        let reading = &mut self.degrees[axis.index()];
        *reading += TICK_STEP_DEGREES * direction.sign();
        Some((axis, *reading))
    }
}
