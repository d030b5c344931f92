//! Theme and Colors
//!
//! The console's terminal palette: restrained, with warm accents for the
//! live readouts so they stand out against the input chrome.

use ratatui::style::Color;

// ============================================================================
// Chrome
// ============================================================================

/// Title and header accents.
pub const ACCENT: Color = Color::Cyan;

/// Border of the focused input field.
pub const INPUT_FOCUSED: Color = Color::Cyan;

/// Border of unfocused input fields.
pub const INPUT_BLURRED: Color = Color::Rgb(100, 100, 100);

/// Dim help/footer text.
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

// ============================================================================
// Readouts
// ============================================================================

/// Ready/success status.
pub const STATUS_OK: Color = Color::Rgb(120, 230, 120);

/// Pipeline running.
pub const STATUS_BUSY: Color = Color::Rgb(255, 223, 128);

/// Failure status.
pub const STATUS_ERROR: Color = Color::Rgb(255, 80, 80);

/// Live rotation reading.
pub const ROTATION_READOUT: Color = Color::Rgb(150, 180, 255);

/// Scale readouts.
pub const SCALE_READOUT: Color = Color::Rgb(255, 160, 160);

/// Device frame-rate readout.
pub const FPS_READOUT: Color = Color::Magenta;
