// Our Real scalar type:
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used for geometric comparisons across the crate.
/// Defaults to `1e-9`, but can be overridden:
///  1) **Build-time**: set env var `VCARVE_DIAGRAM_TOLERANCE` (e.g. `VCARVE_DIAGRAM_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    1e-9
}

/// Returns the current tolerance value.
/// If not set yet, it tries `VCARVE_DIAGRAM_TOLERANCE` (parsed as `Real`) and
/// falls back to the default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("VCARVE_DIAGRAM_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Unit conversion
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
/// Typographic points per inch.
pub const POINTS_PER_INCH: Real = 72.0;

/// Converts a length in typographic points to pixels at `dpi`.
#[inline]
pub fn points_to_px(points: Real, dpi: Real) -> Real {
    points * dpi / POINTS_PER_INCH
}
