//! Command Builder
//!
//! Renders a user expression plus the current transform state into the
//! domain command string understood by the compiler collaborator.
//!
//! Scale is applied by textual substitution: every `x`/`y` in the expression
//! is wrapped as `(x/<scale>)`. When the scale is integral a trailing `.` is
//! appended to the divisor so the collaborator parses it as a float literal.

use crate::error::PipelineError;
use crate::transform::{PlotMode, TransformState};

/// Default lower z bound when the range input is left blank.
pub const DEFAULT_Z_MIN: i64 = -5;

/// Default upper z bound when the range input is left blank.
pub const DEFAULT_Z_MAX: i64 = 5;

/// Validate raw z-range inputs, applying defaults for blank fields.
///
/// Both bounds must parse as integers and the minimum must be strictly below
/// the maximum; anything else is a [`PipelineError::Range`], raised before
/// any external process is invoked.
pub fn validate_range(z_min: &str, z_max: &str) -> Result<(i64, i64), PipelineError> {
    let min = parse_bound(z_min, DEFAULT_Z_MIN)?;
    let max = parse_bound(z_max, DEFAULT_Z_MAX)?;
    if min >= max {
        return Err(PipelineError::Range {
            reason: format!("minimum {min} must be below maximum {max}"),
        });
    }
    Ok((min, max))
}

fn parse_bound(raw: &str, default: i64) -> Result<i64, PipelineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed.parse().map_err(|_| PipelineError::Range {
        reason: format!("`{trimmed}` is not an integer"),
    })
}

/// Substitute every `x` and `y` in the expression with its scaled form.
#[must_use]
pub fn substitute_scale(expression: &str, scale: f64) -> String {
    if scale.fract() == 0.0 {
        let k = scale as i64;
        expression
            .replace('x', &format!("(x/{k}.)"))
            .replace('y', &format!("(y/{k}.)"))
    } else {
        expression
            .replace('x', &format!("(x/{scale})"))
            .replace('y', &format!("(y/{scale})"))
    }
}

/// Build the command string for the current mode.
///
/// `bounds` carries the validated z range for [`PlotMode::TwoDRange`] (see
/// [`validate_range`]); it is ignored in [`PlotMode::ThreeD`] and falls back
/// to the defaults if absent in range mode.
#[must_use]
pub fn build_command(
    expression: &str,
    transform: &TransformState,
    bounds: Option<(i64, i64)>,
) -> String {
    let substituted = substitute_scale(expression, transform.scale_factor);
    match transform.mode {
        PlotMode::ThreeD => format!(
            ".plotxy {} {} {} {}",
            transform.angle_x, transform.angle_y, transform.angle_z, substituted
        ),
        PlotMode::TwoDRange => {
            let (z_min, z_max) = bounds.unwrap_or((DEFAULT_Z_MIN, DEFAULT_Z_MAX));
            format!(".simple_plotxy {z_min} {z_max} {substituted}")
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn integral_scale_gets_trailing_separator() {
        assert_eq!(substitute_scale("x", 1.0), "(x/1.)");
        assert_eq!(substitute_scale("x*y", 3.0), "(x/3.)*(y/3.)");
        assert_eq!(substitute_scale("x", -2.0), "(x/-2.)");
    }

    #[test]
    fn fractional_scale_has_no_separator() {
        assert_eq!(substitute_scale("x", 2.5), "(x/2.5)");
        assert_eq!(substitute_scale("y", 0.5), "(y/0.5)");
    }

    #[test]
    fn substitution_is_plain_textual_replacement() {
        // Every occurrence of the letters is rewritten, even inside names.
        assert_eq!(substitute_scale("exp", 1.0), "e(x/1.)p");
    }

    #[test]
    fn three_d_command_with_zero_angles() {
        let mut transform = TransformState::new();
        transform.mode = PlotMode::ThreeD;
        transform.scale_factor = 1.0;
        assert_eq!(
            build_command("x+y", &transform, None),
            ".plotxy 0 0 0 (x/1.)+(y/1.)"
        );
    }

    #[test]
    fn three_d_command_carries_radians() {
        let mut transform = TransformState::new();
        transform.mode = PlotMode::ThreeD;
        transform.scale_factor = 2.0;
        transform.angle_z = 1.5;
        assert_eq!(
            build_command("x", &transform, None),
            ".plotxy 0 0 1.5 (x/2.)"
        );
    }

    #[test]
    fn range_command_uses_validated_bounds() {
        let mut transform = TransformState::new();
        transform.scale_factor = 1.0;
        let bounds = validate_range("-2", "7").expect("valid range");
        assert_eq!(
            build_command("x", &transform, Some(bounds)),
            ".simple_plotxy -2 7 (x/1.)"
        );
    }

    #[test]
    fn blank_bounds_default() {
        assert_eq!(validate_range("", "").expect("defaults apply"), (-5, 5));
        assert_eq!(validate_range("  ", "9").expect("min defaults"), (-5, 9));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = validate_range("5", "1").expect_err("inverted range");
        assert!(matches!(err, PipelineError::Range { .. }));
    }

    #[test]
    fn equal_bounds_are_rejected() {
        assert!(validate_range("3", "3").is_err());
    }

    #[test]
    fn non_integer_bound_is_rejected() {
        let err = validate_range("1.5", "4").expect_err("not an integer");
        assert!(matches!(err, PipelineError::Range { .. }));
    }
}
