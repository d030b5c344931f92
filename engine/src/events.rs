//! Surface Events
//!
//! Events sent from a UI surface to the engine. Surfaces are thin renderers:
//! they report what the operator did and let the engine decide what it
//! means. The engine responds with [`crate::messages::EngineMessage`]s.

use serde::{Deserialize, Serialize};

use crate::transform::{Axis, RotationDirection};

/// Events from a UI surface to the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// A rotation control was pressed.
    RotatePressed {
        /// Axis of the pressed control.
        axis: Axis,
        /// Direction of the pressed control.
        direction: RotationDirection,
    },

    /// The active rotation control was released.
    RotateReleased,

    /// A scale gesture progressed.
    GestureUpdate {
        /// Gesture magnitude; above 1 grows the plot, at or below 1 shrinks.
        magnitude: f64,
    },

    /// The operator toggled between 3D and range mode.
    ModeToggled,

    /// The operator submitted the expression for plotting.
    Submit {
        /// The expression as typed.
        expression: String,
        /// Raw lower z bound input (range mode; blank means default).
        z_min: String,
        /// Raw upper z bound input (range mode; blank means default).
        z_max: String,
    },

    /// The operator submitted a raw command, bypassing the transform state,
    /// the simplification flag, and the complexity check.
    SubmitRaw {
        /// The command text as typed.
        command: String,
    },

    /// The operator asked to quit.
    QuitRequested,
}
