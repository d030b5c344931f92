//! Scale Controller
//!
//! Folds discrete gesture deltas into a pending scale value and merges it
//! into the cumulative scale on submit. The merge is additive, not
//! multiplicative — a deliberate property of the console's feel; do not
//! "fix" it to multiplicative scaling.

use crate::transform::TransformState;

/// Fraction of a gesture magnitude folded into the pending delta.
pub const GESTURE_STEP: f64 = 0.01;

/// Pending and cumulative scale state.
#[derive(Clone, Debug)]
pub struct ScaleController {
    /// Accumulated since the last submit.
    gesture_delta: f64,
    /// Persisted across submits.
    cumulative: f64,
}

impl Default for ScaleController {
    fn default() -> Self {
        Self {
            gesture_delta: 0.0,
            cumulative: 1.0,
        }
    }
}

impl ScaleController {
    /// Create a controller with no pending delta and unit cumulative scale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one gesture update into the pending delta and return the new
    /// pending value for display. Magnitudes above 1 grow the delta in
    /// proportion; magnitudes at or below 1 shrink it by the inverse.
    pub fn on_gesture(&mut self, magnitude: f64) -> f64 {
        if magnitude > 1.0 {
            self.gesture_delta += magnitude * GESTURE_STEP;
        } else {
            self.gesture_delta -= (1.0 / magnitude) * GESTURE_STEP;
        }
        self.gesture_delta
    }

    /// The delta accumulated since the last submit.
    #[must_use]
    pub fn pending(&self) -> f64 {
        self.gesture_delta
    }

    /// The value a submit issued right now would use.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.cumulative + self.gesture_delta
    }

    /// Merge the pending delta into the cumulative scale, publish the result
    /// to the transform state, and return it.
    pub fn commit(&mut self, transform: &mut TransformState) -> f64 {
        let current = self.cumulative + self.gesture_delta;
        self.cumulative = current;
        self.gesture_delta = 0.0;
        transform.scale_factor = current;
        current
    }
}
