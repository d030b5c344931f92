//! Main Application
//!
//! The App drives the TUI lifecycle as a thin display client:
//! 1. Converts terminal events to `SurfaceEvent`s
//! 2. Sends them to the embedded engine via `EngineClient`
//! 3. Receives `EngineMessage`s and updates `DisplayState`
//! 4. Renders based on `DisplayState`
//!
//! The rotation tick runs here: a 10 ms interval that is only polled while
//! the engine reports an active session, mirroring the held-button timer of
//! the physical console. Terminal surfaces get no reliable key-release
//! events, so a rotation key press toggles the session instead of tracking
//! press/release.

use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error};

use plotcast_engine::{
    Axis, EngineConfig, EngineMessage, PlotMode, RotationDirection, SurfaceEvent, ROTATION_TICK,
};

use crate::display::DisplayState;
use crate::engine_client::EngineClient;
use crate::input::InputField;

/// Gesture magnitude fed by one scroll-up / scale-up key.
const GESTURE_GROW: f64 = 1.25;

/// Gesture magnitude fed by one scroll-down / scale-down key.
const GESTURE_SHRINK: f64 = 0.8;

/// Which console screen is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// The full console: expression, transforms, readouts.
    Main,
    /// The raw command pass-through console.
    Raw,
}

impl Screen {
    fn toggled(self) -> Self {
        match self {
            Screen::Main => Screen::Raw,
            Screen::Raw => Screen::Main,
        }
    }
}

/// Which input field receives typed characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    /// The expression input.
    Expression,
    /// The lower z bound (range mode).
    ZMin,
    /// The upper z bound (range mode).
    ZMax,
}

/// Main application state.
pub struct App {
    /// Is the app still running?
    running: bool,
    /// Client for the embedded engine.
    client: EngineClient,
    /// Display state derived from engine messages.
    pub(crate) display: DisplayState,
    /// Device address, shown in the header.
    pub(crate) device: String,
    /// Visible screen.
    pub(crate) screen: Screen,
    /// Focused input on the main screen.
    pub(crate) focus: Focus,
    /// Expression input.
    pub(crate) expression: InputField,
    /// Lower z bound input (range mode).
    pub(crate) z_min: InputField,
    /// Upper z bound input (range mode).
    pub(crate) z_max: InputField,
    /// Raw console input.
    pub(crate) raw: InputField,
}

impl App {
    /// Create the app around an embedded engine.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let device = config.device_addr.clone();
        let client = EngineClient::new(config);
        let display = DisplayState::new(client.mode());
        Self {
            running: true,
            client,
            display,
            device,
            screen: Screen::Main,
            focus: Focus::Expression,
            expression: InputField::new(),
            z_min: InputField::new(),
            z_max: InputField::new(),
            raw: InputField::new(),
        }
    }

    /// Main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        self.client.start().await?;

        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(ROTATION_TICK);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Render the initial frame immediately.
        terminal.draw(|frame| crate::view::draw(frame, self))?;

        while self.running {
            let rotating = self.client.is_rotating();
            tokio::select! {
                biased;

                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key).await;
                        }
                        Some(Ok(Event::Mouse(mouse))) => self.handle_mouse(mouse).await,
                        Some(Ok(_)) => {}
                        Some(Err(err)) => error!(error = %err, "terminal event error"),
                        None => self.running = false,
                    }
                }

                Some(msg) = self.client.recv() => {
                    self.apply_message(msg);
                }

                // Held-rotation timer; only polled while a session is active.
                _ = tick.tick(), if rotating => {
                    self.client.tick_rotation();
                }
            }

            // Fold in anything else the engine queued before drawing.
            for msg in self.client.recv_all() {
                self.apply_message(msg);
            }
            terminal.draw(|frame| crate::view::draw(frame, self))?;
        }

        Ok(())
    }

    /// Fold one engine message into the surface state.
    fn apply_message(&mut self, msg: EngineMessage) {
        match &msg {
            EngineMessage::ShuttingDown => self.running = false,
            // Leaving range mode retires the bound fields.
            EngineMessage::ModeChanged {
                mode: PlotMode::ThreeD,
            } => self.focus = Focus::Expression,
            _ => {}
        }
        self.display.apply(&msg);
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.request_quit().await;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_quit().await;
                return;
            }
            KeyCode::F(2) => {
                self.screen = self.screen.toggled();
                return;
            }
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => {
                self.handle_console_key(c).await;
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Main => self.handle_edit_key(key).await,
            Screen::Raw => self.handle_raw_key(key).await,
        }
    }

    /// Alt-chorded console controls: mode, rotation, scale.
    async fn handle_console_key(&mut self, c: char) {
        match c {
            'm' => self.send(SurfaceEvent::ModeToggled).await,
            '1' => self.rotate(Axis::Z, RotationDirection::Anticlockwise).await,
            '2' => self.rotate(Axis::Z, RotationDirection::Clockwise).await,
            '3' => self.rotate(Axis::X, RotationDirection::Anticlockwise).await,
            '4' => self.rotate(Axis::X, RotationDirection::Clockwise).await,
            '5' => self.rotate(Axis::Y, RotationDirection::Anticlockwise).await,
            '6' => self.rotate(Axis::Y, RotationDirection::Clockwise).await,
            '+' | '=' => self.gesture(GESTURE_GROW).await,
            '-' => self.gesture(GESTURE_SHRINK).await,
            _ => {}
        }
    }

    /// A rotation key toggles the session: press to start, press again to
    /// release. A press for a different axis while one is active releases
    /// the active session (the engine rejects overlapping activations).
    async fn rotate(&mut self, axis: Axis, direction: RotationDirection) {
        if self.client.is_rotating() {
            self.send(SurfaceEvent::RotateReleased).await;
        } else {
            self.send(SurfaceEvent::RotatePressed { axis, direction }).await;
        }
    }

    async fn gesture(&mut self, magnitude: f64) {
        self.send(SurfaceEvent::GestureUpdate { magnitude }).await;
    }

    async fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.gesture(GESTURE_GROW).await,
            MouseEventKind::ScrollDown => self.gesture(GESTURE_SHRINK).await,
            _ => {}
        }
    }

    async fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit().await,
            KeyCode::Tab if self.display.mode == PlotMode::TwoDRange => {
                self.focus = match self.focus {
                    Focus::Expression => Focus::ZMin,
                    Focus::ZMin => Focus::ZMax,
                    Focus::ZMax => Focus::Expression,
                };
            }
            _ => Self::edit_field(self.focused_field(), key),
        }
    }

    async fn handle_raw_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if !self.raw.is_empty() {
                    let command = self.raw.text().to_string();
                    self.send(SurfaceEvent::SubmitRaw { command }).await;
                }
            }
            _ => Self::edit_field(&mut self.raw, key),
        }
    }

    /// Readline-style editing shared by every input field.
    fn edit_field(field: &mut InputField, key: KeyEvent) {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => field.clear(),
            KeyCode::Char(c) => field.insert(c),
            KeyCode::Backspace => field.backspace(),
            KeyCode::Delete => field.delete(),
            KeyCode::Left => field.move_left(),
            KeyCode::Right => field.move_right(),
            KeyCode::Home => field.move_home(),
            KeyCode::End => field.move_end(),
            _ => {}
        }
    }

    async fn submit(&mut self) {
        let event = SurfaceEvent::Submit {
            expression: self.expression.text().to_string(),
            z_min: self.z_min.text().to_string(),
            z_max: self.z_max.text().to_string(),
        };
        self.send(event).await;
    }

    async fn request_quit(&mut self) {
        self.send(SurfaceEvent::QuitRequested).await;
        self.running = false;
    }

    async fn send(&mut self, event: SurfaceEvent) {
        debug!(?event, "surface event");
        if let Err(err) = self.client.send_event(event).await {
            error!(error = %err, "engine rejected event");
        }
    }

    fn focused_field(&mut self) -> &mut InputField {
        match self.focus {
            Focus::Expression => &mut self.expression,
            Focus::ZMin => &mut self.z_min,
            Focus::ZMax => &mut self.z_max,
        }
    }

    /// The input field the cursor should be drawn in, if any.
    pub(crate) fn cursor_field(&self) -> &InputField {
        match self.screen {
            Screen::Raw => &self.raw,
            Screen::Main => match self.focus {
                Focus::Expression => &self.expression,
                Focus::ZMin => &self.z_min,
                Focus::ZMax => &self.z_max,
            },
        }
    }
}
