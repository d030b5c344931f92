//! Engine Messages
//!
//! Messages sent from the engine to a UI surface. The surface renders what
//! it is told; it holds no business logic of its own. High-frequency display
//! readings (rotation ticks, gesture deltas) are droppable — losing one only
//! skips a frame of a live readout.

use serde::{Deserialize, Serialize};

use crate::transform::{Axis, PlotMode};

/// Messages from the engine to a UI surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum EngineMessage {
    /// Live reading of the active rotation session.
    RotationReading {
        /// The axis being rotated.
        axis: Axis,
        /// Its accumulated degrees.
        degrees: f64,
    },

    /// The pending scale delta changed.
    ScalePending {
        /// Delta accumulated since the last submit.
        value: f64,
    },

    /// A submit committed the scale.
    ScaleCommitted {
        /// The new total scale.
        value: f64,
    },

    /// The plot mode changed.
    ModeChanged {
        /// The mode now in effect.
        mode: PlotMode,
    },

    /// A submit passed validation and its pipeline run began.
    PipelineStarted,

    /// A compiled program was sent to the device.
    Dispatched {
        /// Datagram payload size in bytes.
        bytes: usize,
    },

    /// A submit failed; the text is ready for the status line.
    SubmitFailed {
        /// Classified failure, rendered.
        message: String,
    },

    /// The device reported its frame rate.
    Telemetry {
        /// Frames per second.
        fps: f64,
    },

    /// The engine is shutting down; the surface should exit its loop.
    ShuttingDown,
}
