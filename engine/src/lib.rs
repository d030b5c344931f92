//! Plotcast Engine - Headless Console Core
//!
//! The transform-state engine and command pipeline behind the plotcast
//! console, completely independent of any UI framework. It can drive a
//! terminal surface or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      UI Surface (TUI)                    │
//! │                                                          │
//! │            SurfaceEvent (up) / EngineMessage (down)      │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼──────────────────────────────┐
//! │                        ENGINE                            │
//! │  ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌────────────┐  │
//! │  │ Rotation │ │  Scale   │ │  Command  │ │  Pipeline  │  │
//! │  │ Control  │ │ Control  │ │  Builder  │ │  Executor  │  │
//! │  └────┬─────┘ └────┬─────┘ └─────┬─────┘ └─────┬──────┘  │
//! │       └────────────┴─► Transform ┘             │         │
//! │                        State                   ▼         │
//! │  ┌───────────────────┐              ┌──────────────────┐ │
//! │  │ TelemetryReceiver │◄─ device ──► │    Dispatcher    │ │
//! │  └───────────────────┘    (UDP)     └──────────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Engine`]: the context object owning all console state
//! - [`SurfaceEvent`]: events sent from a UI surface to the engine
//! - [`EngineMessage`]: messages sent from the engine to a UI surface
//! - [`Pipeline`]: the compile→assemble executor
//! - [`PipelineError`]: the classified submit-failure taxonomy
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It is pure console logic that can be driven from anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod events;
pub mod messages;
pub mod pipeline;
pub mod rotation;
pub mod scale;
pub mod telemetry;
pub mod transform;

// Re-exports for convenience
pub use command::{build_command, substitute_scale, validate_range};
pub use config::{EngineConfig, COMMAND_PORT, DEFAULT_DEVICE_ADDR, TELEMETRY_PORT};
pub use dispatch::Dispatcher;
pub use engine::Engine;
pub use error::{PipelineError, Stage};
pub use events::SurfaceEvent;
pub use messages::EngineMessage;
pub use pipeline::{check_complexity, Pipeline, MAX_SUBPROGRAM_LINES};
pub use rotation::{RotationController, RotationState, ROTATION_TICK, TICK_STEP_DEGREES};
pub use scale::ScaleController;
pub use telemetry::TelemetryReceiver;
pub use transform::{Axis, PlotMode, RotationDirection, TransformState};
