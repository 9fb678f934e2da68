//! Placement of the axes box on the canvas and the data → pixel mapping.

use crate::float_types::Real;
use crate::plot::Figure;
use geo::{Coord, Rect, coord};
use nalgebra::{Matrix3, Point2};

/// Axes box as fractions of the canvas: left, bottom, right, top.
const SUBPLOT: [Real; 4] = [0.125, 0.11, 0.9, 0.88];

/// Data margin added on each side of the data extent, as a fraction of it.
const MARGIN: Real = 0.05;

/// Axis-aligned rectangle in pixel space, y pointing down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub left: Real,
    pub top: Real,
    pub right: Real,
    pub bottom: Real,
}

impl PixelRect {
    pub fn width(&self) -> Real {
        self.right - self.left
    }

    pub fn height(&self) -> Real {
        self.bottom - self.top
    }

    pub fn contains(&self, (x, y): (Real, Real)) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Axes box on the canvas.
    pub axes: PixelRect,
    /// Data limits shown inside the axes box.
    pub view: Rect<Real>,
    transform: Matrix3<Real>,
}

impl Layout {
    /// Lays out `figure`. With equal aspect the axes box shrinks around the
    /// data so one data unit spans the same pixel count on both axes.
    pub fn new(figure: &Figure) -> Self {
        let w = Real::from(figure.width_px);
        let h = Real::from(figure.height_px);
        let [left, bottom, right, top] = SUBPLOT;
        let mut axes = PixelRect {
            left: left * w,
            top: (1.0 - top) * h,
            right: right * w,
            bottom: (1.0 - bottom) * h,
        };

        let view = padded(
            figure
                .data_bounds()
                .unwrap_or_else(|| Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 })),
        );

        let mut sx = axes.width() / view.width();
        let mut sy = axes.height() / view.height();
        if figure.equal_aspect {
            let s = sx.min(sy);
            let (cx, cy) = ((axes.left + axes.right) * 0.5, (axes.top + axes.bottom) * 0.5);
            let (half_w, half_h) = (view.width() * s * 0.5, view.height() * s * 0.5);
            axes = PixelRect {
                left: cx - half_w,
                top: cy - half_h,
                right: cx + half_w,
                bottom: cy + half_h,
            };
            sx = s;
            sy = s;
        }

        #[rustfmt::skip]
        let transform = Matrix3::new(
            sx,  0.0, axes.left - view.min().x * sx,
            0.0, -sy, axes.bottom + view.min().y * sy,
            0.0, 0.0, 1.0,
        );

        Self { axes, view, transform }
    }

    /// Maps a data coordinate to canvas pixels.
    pub fn to_px(&self, c: Coord<Real>) -> (Real, Real) {
        let p = self.transform.transform_point(&Point2::new(c.x, c.y));
        (p.x, p.y)
    }

    /// Pixels per data unit along x and y.
    pub fn scale(&self) -> (Real, Real) {
        (self.transform[(0, 0)], -self.transform[(1, 1)])
    }

    pub fn x_ticks(&self) -> Vec<Real> {
        ticks(self.view.min().x, self.view.max().x)
    }

    pub fn y_ticks(&self) -> Vec<Real> {
        ticks(self.view.min().y, self.view.max().y)
    }
}

fn padded(rect: Rect<Real>) -> Rect<Real> {
    let dx = if rect.width() > 0.0 { rect.width() * MARGIN } else { 0.5 };
    let dy = if rect.height() > 0.0 { rect.height() * MARGIN } else { 0.5 };
    Rect::new(
        coord! { x: rect.min().x - dx, y: rect.min().y - dy },
        coord! { x: rect.max().x + dx, y: rect.max().y + dy },
    )
}

/// Evenly spaced "nice" tick values (steps of 1, 2, 2.5 or 5 × 10ⁿ) within `[lo, hi]`.
pub fn ticks(lo: Real, hi: Real) -> Vec<Real> {
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }

    let raw = span / 8.0;
    let magnitude = Real::powf(10.0, raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as Real * step).collect()
}

/// Tick label: integers without a fractional part, others trimmed.
pub fn tick_label(value: Real) -> String {
    let value = if value.abs() < 1e-12 { 0.0 } else { value };
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let s = format!("{value:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}
