//! Engine Client
//!
//! Thin wrapper embedding the engine in the TUI process. The surface sends
//! [`SurfaceEvent`]s and receives [`EngineMessage`]s; it never reaches into
//! engine state beyond the read-only accessors exposed here.

use tokio::sync::mpsc;

use plotcast_engine::{Engine, EngineConfig, EngineMessage, PlotMode, SurfaceEvent};

/// Channel capacity for engine→surface messages.
const MESSAGE_BUFFER: usize = 100;

/// In-process client for the console engine.
pub struct EngineClient {
    engine: Engine,
    rx: mpsc::Receiver<EngineMessage>,
}

impl EngineClient {
    /// Embed a new engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let (tx, rx) = mpsc::channel(MESSAGE_BUFFER);
        Self {
            engine: Engine::new(config, tx),
            rx,
        }
    }

    /// Start the embedded engine (sockets and telemetry loop).
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.engine.start().await
    }

    /// Forward a surface event to the engine.
    pub async fn send_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        self.engine.handle_event(event).await
    }

    /// Wait for the next engine message.
    pub async fn recv(&mut self) -> Option<EngineMessage> {
        self.rx.recv().await
    }

    /// Drain all queued engine messages without waiting.
    pub fn recv_all(&mut self) -> Vec<EngineMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Whether a rotation session is active (gates the tick timer).
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.engine.is_rotating()
    }

    /// The engine's current plot mode (for surface bootstrapping).
    #[must_use]
    pub fn mode(&self) -> PlotMode {
        self.engine.mode()
    }

    /// Drive one rotation tick.
    pub fn tick_rotation(&mut self) {
        self.engine.tick_rotation();
    }
}
