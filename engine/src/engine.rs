//! Engine - The Console Core
//!
//! The engine is the context object that owns the transform state and both
//! controllers, turns surface events into state changes and pipeline runs,
//! and reports everything back through its message channel.
//!
//! # Design
//!
//! The engine is UI-agnostic: it does not know whether it is driven by a
//! terminal surface, a test harness, or something else. The contract is
//! [`SurfaceEvent`] in, [`EngineMessage`] out.
//!
//! All state mutation happens on the task that calls [`Engine::handle_event`]
//! and [`Engine::tick_rotation`] — the single-writer discipline the transform
//! state relies on. Pipeline stages run in spawned tasks and report back over
//! the channel; the surface never blocks on a collaborator call.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::lookup_host;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::command::{build_command, validate_range};
use crate::config::EngineConfig;
use crate::dispatch::Dispatcher;
use crate::events::SurfaceEvent;
use crate::messages::EngineMessage;
use crate::pipeline::Pipeline;
use crate::rotation::RotationController;
use crate::scale::ScaleController;
use crate::telemetry::TelemetryReceiver;
use crate::transform::{PlotMode, TransformState};

/// The headless console core.
pub struct Engine {
    config: EngineConfig,
    transform: TransformState,
    rotation: RotationController,
    scale: ScaleController,
    pipeline: Arc<Pipeline>,
    dispatcher: Option<Arc<Dispatcher>>,
    tx: mpsc::Sender<EngineMessage>,
    /// The pipeline run currently in flight, if any. A new submit aborts it.
    inflight: Option<JoinHandle<()>>,
}

impl Engine {
    /// Create an engine that reports through `tx`. Call [`Engine::start`]
    /// before submitting.
    #[must_use]
    pub fn new(config: EngineConfig, tx: mpsc::Sender<EngineMessage>) -> Self {
        let pipeline = Arc::new(Pipeline::new(&config));
        Self {
            config,
            transform: TransformState::new(),
            rotation: RotationController::new(),
            scale: ScaleController::new(),
            pipeline,
            dispatcher: None,
            tx,
            inflight: None,
        }
    }

    /// Resolve the device address, bind the dispatch socket, and spawn the
    /// telemetry receive loop.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        let device = (self.config.device_addr.as_str(), self.config.command_port);
        let target = lookup_host(device)
            .await
            .with_context(|| format!("resolving device address {}", self.config.device_addr))?
            .next()
            .with_context(|| format!("device address {} has no endpoints", self.config.device_addr))?;

        let dispatcher = Dispatcher::bind(target)
            .await
            .context("binding command socket")?;
        self.dispatcher = Some(Arc::new(dispatcher));

        let telemetry = TelemetryReceiver::bind(self.config.telemetry_port, self.tx.clone())
            .await
            .context("binding telemetry socket")?;
        let telemetry_addr = telemetry.local_addr().context("telemetry local address")?;
        tokio::spawn(telemetry.run());

        info!(%target, telemetry = %telemetry_addr, "engine started");
        Ok(())
    }

    /// The live transform state (read-only; for surface bootstrapping).
    #[must_use]
    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    /// Current plot mode.
    #[must_use]
    pub fn mode(&self) -> PlotMode {
        self.transform.mode
    }

    /// Whether a rotation session is active (the surface gates its tick
    /// timer on this).
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.rotation.is_rotating()
    }

    /// Handle one surface event.
    pub async fn handle_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        match event {
            SurfaceEvent::RotatePressed { axis, direction } => {
                if !self.rotation.activate(axis, direction) {
                    debug!(?axis, "rotation already active; press ignored");
                }
            }
            SurfaceEvent::RotateReleased => {
                if let Some(axis) = self.rotation.deactivate(&mut self.transform) {
                    debug!(
                        axis = axis.label(),
                        radians = self.transform.angle(axis),
                        "rotation folded"
                    );
                }
            }
            SurfaceEvent::GestureUpdate { magnitude } => {
                let value = self.scale.on_gesture(magnitude);
                self.tx.send(EngineMessage::ScalePending { value }).await?;
            }
            SurfaceEvent::ModeToggled => {
                self.transform.mode = self.transform.mode.toggled();
                let mode = self.transform.mode;
                self.tx.send(EngineMessage::ModeChanged { mode }).await?;
            }
            SurfaceEvent::Submit {
                expression,
                z_min,
                z_max,
            } => self.submit(&expression, &z_min, &z_max).await?,
            SurfaceEvent::SubmitRaw { command } => {
                self.spawn_pipeline(command, true).await?;
            }
            SurfaceEvent::QuitRequested => {
                if let Some(handle) = self.inflight.take() {
                    handle.abort();
                }
                self.tx.send(EngineMessage::ShuttingDown).await?;
            }
        }
        Ok(())
    }

    /// One 10 ms rotation tick. The reading is a droppable display update:
    /// a full channel skips a frame rather than stalling the event loop.
    pub fn tick_rotation(&mut self) {
        if let Some((axis, degrees)) = self.rotation.tick() {
            let _ = self
                .tx
                .try_send(EngineMessage::RotationReading { axis, degrees });
        }
    }

    /// The standard submit path: validate, commit scale, build, run.
    async fn submit(&mut self, expression: &str, z_min: &str, z_max: &str) -> anyhow::Result<()> {
        // Range validation happens before any state changes; a rejected
        // submit leaves the pending scale untouched.
        let bounds = match self.transform.mode {
            PlotMode::TwoDRange => match validate_range(z_min, z_max) {
                Ok(bounds) => Some(bounds),
                Err(err) => {
                    warn!(error = %err, "submit rejected");
                    self.tx
                        .send(EngineMessage::SubmitFailed {
                            message: err.to_string(),
                        })
                        .await?;
                    return Ok(());
                }
            },
            PlotMode::ThreeD => None,
        };

        // The scale commits on submit even if the pipeline later fails.
        let value = self.scale.commit(&mut self.transform);
        self.tx.send(EngineMessage::ScaleCommitted { value }).await?;

        let command = build_command(expression, &self.transform, bounds);
        debug!(command = %command, "built plot command");
        self.spawn_pipeline(command, false).await
    }

    /// Run the pipeline for `command` in a spawned task, aborting any run
    /// still in flight (newest submit wins), and dispatch on success.
    async fn spawn_pipeline(&mut self, command: String, raw: bool) -> anyhow::Result<()> {
        if let Some(handle) = self.inflight.take() {
            if !handle.is_finished() {
                warn!("aborting in-flight pipeline run");
            }
            handle.abort();
        }

        let Some(dispatcher) = self.dispatcher.clone() else {
            self.tx
                .send(EngineMessage::SubmitFailed {
                    message: "engine not started".to_string(),
                })
                .await?;
            return Ok(());
        };

        self.tx.send(EngineMessage::PipelineStarted).await?;
        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.tx.clone();
        self.inflight = Some(tokio::spawn(async move {
            let result = if raw {
                pipeline.run_raw(&command).await
            } else {
                pipeline.run(&command).await
            };
            let message = match result {
                Ok(payload) => match dispatcher.send(&payload).await {
                    Ok(bytes) => EngineMessage::Dispatched { bytes },
                    Err(err) => EngineMessage::SubmitFailed {
                        message: err.to_string(),
                    },
                },
                Err(err) => EngineMessage::SubmitFailed {
                    message: err.to_string(),
                },
            };
            // The surface may already be gone on shutdown.
            let _ = tx.send(message).await;
        }));
        Ok(())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}
