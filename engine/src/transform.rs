//! Transform State
//!
//! The live rotation-angle and scale-factor values applied to the next
//! compiled expression, plus the plot mode. This is the single piece of
//! state every other engine component reads; it is written only by the
//! rotation and scale controllers and only from the event-loop task.

use serde::{Deserialize, Serialize};

/// A rotation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// Index into per-axis accumulator arrays.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Uppercase label for status displays.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Direction of a rotation session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    /// Negative angular step.
    Anticlockwise,
    /// Positive angular step.
    Clockwise,
}

impl RotationDirection {
    /// The sign applied to each tick's angular step.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            RotationDirection::Anticlockwise => -1.0,
            RotationDirection::Clockwise => 1.0,
        }
    }
}

/// Which directive the command builder emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotMode {
    /// Three-dimensional plot with rotation angles (`.plotxy`).
    ThreeD,
    /// Two-dimensional plot over a z range (`.simple_plotxy`).
    TwoDRange,
}

impl PlotMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            PlotMode::ThreeD => PlotMode::TwoDRange,
            PlotMode::TwoDRange => PlotMode::ThreeD,
        }
    }
}

/// Live transform state for the next submitted plot.
///
/// Angles are radians and unbounded. `scale_factor` holds the last committed
/// scale (see [`crate::scale::ScaleController`]); it starts at 0 and is only
/// meaningful after the first commit.
#[derive(Clone, Debug)]
pub struct TransformState {
    /// Rotation about the X axis, radians.
    pub angle_x: f64,
    /// Rotation about the Y axis, radians.
    pub angle_y: f64,
    /// Rotation about the Z axis, radians.
    pub angle_z: f64,
    /// Last committed cumulative scale.
    pub scale_factor: f64,
    /// Current plot mode.
    pub mode: PlotMode,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
            scale_factor: 0.0,
            // The console comes up in range mode.
            mode: PlotMode::TwoDRange,
        }
    }
}

impl TransformState {
    /// Create the startup transform state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the angle for one axis, radians.
    #[must_use]
    pub fn angle(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.angle_x,
            Axis::Y => self.angle_y,
            Axis::Z => self.angle_z,
        }
    }

    /// Overwrite the angle for one axis, radians.
    pub fn set_angle(&mut self, axis: Axis, radians: f64) {
        match axis {
            Axis::X => self.angle_x = radians,
            Axis::Y => self.angle_y = radians,
            Axis::Z => self.angle_z = radians,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed_in_range_mode() {
        let state = TransformState::new();
        assert_eq!(state.angle_x, 0.0);
        assert_eq!(state.angle_y, 0.0);
        assert_eq!(state.angle_z, 0.0);
        assert_eq!(state.scale_factor, 0.0);
        assert_eq!(state.mode, PlotMode::TwoDRange);
    }

    #[test]
    fn angle_accessors_round_trip() {
        let mut state = TransformState::new();
        state.set_angle(Axis::Y, 1.5);
        assert_eq!(state.angle(Axis::Y), 1.5);
        assert_eq!(state.angle_y, 1.5);
        assert_eq!(state.angle(Axis::X), 0.0);
    }

    #[test]
    fn mode_toggle_alternates() {
        assert_eq!(PlotMode::ThreeD.toggled(), PlotMode::TwoDRange);
        assert_eq!(PlotMode::TwoDRange.toggled(), PlotMode::ThreeD);
    }

    #[test]
    fn direction_signs() {
        assert_eq!(RotationDirection::Clockwise.sign(), 1.0);
        assert_eq!(RotationDirection::Anticlockwise.sign(), -1.0);
    }
}
