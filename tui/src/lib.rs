//! Plotcast TUI - Terminal surface for the plotcast console
//!
//! A thin display client over the headless engine:
//!
//! - **App**: event loop wiring terminal events to `SurfaceEvent`s
//! - **Display**: render state derived from `EngineMessage`s
//! - **Input**: readline-style single-line fields
//! - **View**: ratatui layout and widgets

pub mod app;
pub mod display;
pub mod engine_client;
pub mod input;
pub mod theme;
pub mod view;

pub use app::App;
