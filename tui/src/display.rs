//! Display State
//!
//! Render state derived from `EngineMessage`s. The surface is a thin client:
//! it keeps no console logic of its own, only the last-told values.

use plotcast_engine::{Axis, EngineMessage, PlotMode};

/// Pipeline status for the status line.
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineStatus {
    /// Nothing submitted yet.
    Idle,
    /// A submit is being compiled/assembled.
    Running,
    /// The last submit was dispatched to the device.
    Plotted {
        /// Datagram size in bytes.
        bytes: usize,
    },
    /// The last submit failed.
    Failed {
        /// Rendered failure text.
        message: String,
    },
}

/// Everything the view needs to draw a frame.
#[derive(Clone, Debug)]
pub struct DisplayState {
    /// Current plot mode.
    pub mode: PlotMode,
    /// Scale delta accumulated since the last submit.
    pub pending_scale: f64,
    /// Last committed total scale.
    pub total_scale: f64,
    /// Live rotation reading, if a session has run.
    pub rotation: Option<(Axis, f64)>,
    /// Last pipeline outcome.
    pub status: PipelineStatus,
    /// Last frame rate reported by the device.
    pub fps: Option<f64>,
}

impl DisplayState {
    /// Create display state for the given startup mode.
    #[must_use]
    pub fn new(mode: PlotMode) -> Self {
        Self {
            mode,
            pending_scale: 0.0,
            total_scale: 0.0,
            rotation: None,
            status: PipelineStatus::Idle,
            fps: None,
        }
    }

    /// Fold one engine message into the display state.
    pub fn apply(&mut self, message: &EngineMessage) {
        match message {
            EngineMessage::RotationReading { axis, degrees } => {
                self.rotation = Some((*axis, *degrees));
            }
            EngineMessage::ScalePending { value } => self.pending_scale = *value,
            EngineMessage::ScaleCommitted { value } => {
                self.total_scale = *value;
                self.pending_scale = 0.0;
            }
            EngineMessage::ModeChanged { mode } => self.mode = *mode,
            EngineMessage::PipelineStarted => self.status = PipelineStatus::Running,
            EngineMessage::Dispatched { bytes } => {
                self.status = PipelineStatus::Plotted { bytes: *bytes };
            }
            EngineMessage::SubmitFailed { message } => {
                self.status = PipelineStatus::Failed {
                    message: message.clone(),
                };
            }
            EngineMessage::Telemetry { fps } => self.fps = Some(*fps),
            // Lifecycle; handled by the app loop.
            EngineMessage::ShuttingDown => {}
        }
    }

    /// Status line text.
    #[must_use]
    pub fn status_text(&self) -> String {
        match &self.status {
            PipelineStatus::Idle => "Ready".to_string(),
            PipelineStatus::Running => "Compiling and assembling...".to_string(),
            PipelineStatus::Plotted { bytes } => {
                format!("Plotting your function ({bytes} bytes sent)")
            }
            PipelineStatus::Failed { message } => format!("Error: {message}"),
        }
    }

    /// Rotation line text, matching the console's degree readout.
    #[must_use]
    pub fn rotation_text(&self) -> String {
        match self.rotation {
            Some((axis, degrees)) => {
                format!("Rotating {} (degrees): {degrees:.2}", axis.label())
            }
            None => "Rotating: 0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn commit_resets_pending_display() {
        let mut display = DisplayState::new(PlotMode::TwoDRange);
        display.apply(&EngineMessage::ScalePending { value: 0.5 });
        assert_eq!(display.pending_scale, 0.5);

        display.apply(&EngineMessage::ScaleCommitted { value: 1.5 });
        assert_eq!(display.total_scale, 1.5);
        assert_eq!(display.pending_scale, 0.0);
    }

    #[test]
    fn pipeline_outcomes_drive_status_text() {
        let mut display = DisplayState::new(PlotMode::ThreeD);
        assert_eq!(display.status_text(), "Ready");

        display.apply(&EngineMessage::PipelineStarted);
        assert_eq!(display.status_text(), "Compiling and assembling...");

        display.apply(&EngineMessage::Dispatched { bytes: 48 });
        assert_eq!(display.status_text(), "Plotting your function (48 bytes sent)");

        display.apply(&EngineMessage::SubmitFailed {
            message: "invalid range: `a` is not an integer".to_string(),
        });
        assert!(display.status_text().starts_with("Error: invalid range"));
    }

    #[test]
    fn rotation_reading_formats_degrees() {
        let mut display = DisplayState::new(PlotMode::ThreeD);
        display.apply(&EngineMessage::RotationReading {
            axis: Axis::Z,
            degrees: 12.6,
        });
        assert_eq!(display.rotation_text(), "Rotating Z (degrees): 12.60");
    }
}
