//! The carved shape: a closed polygon boundary in the XY plane

use crate::errors::{DiagramError, Result};
use crate::float_types::{Real, tolerance};
use geo::{BoundingRect, Coord, EuclideanDistance, LineString, Orient, Point, Polygon, Rect, coord, orient::Direction};

/// The "wide V": narrow at the tip (x = 0), 8 units wide at x = 10.
///
/// The ring is explicitly closed, first point repeated as last.
pub const WIDE_V: [[Real; 2]; 4] = [
    [0.0, 0.0],   // tip
    [10.0, 4.0],  // top right
    [10.0, -4.0], // bottom right
    [0.0, 0.0],   // close loop
];

/// Chord width gained per unit of x along the wide V: `width(x) = 0.8·x`.
pub const WIDE_V_TAPER: Real = 0.8;

/// A validated, closed polygon boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    polygon: Polygon<Real>,
}

impl Boundary {
    /// Builds a boundary from an explicitly closed ring of `[x, y]` points.
    ///
    /// # Errors
    /// - [`DiagramError::TooFewPoints`] for fewer than 4 coordinates
    /// - [`DiagramError::InvalidCoordinate`] for NaN or infinite values
    /// - [`DiagramError::RingNotClosed`] when the first and last points differ
    pub fn from_ring(points: &[[Real; 2]]) -> Result<Self> {
        if points.len() < 4 {
            return Err(DiagramError::TooFewPoints(points.len()));
        }
        if let Some(bad) = points.iter().find(|p| !p[0].is_finite() || !p[1].is_finite()) {
            return Err(DiagramError::InvalidCoordinate { x: bad[0], y: bad[1] });
        }

        let first = points[0];
        let last = points[points.len() - 1];
        let eps = tolerance();
        if (first[0] - last[0]).abs() > eps || (first[1] - last[1]).abs() > eps {
            return Err(DiagramError::RingNotClosed { first, last });
        }

        let ring: LineString<Real> = points.iter().map(|p| coord! { x: p[0], y: p[1] }).collect();
        Ok(Self { polygon: Polygon::new(ring, vec![]) })
    }

    /// Like [`Boundary::from_ring`], but closes an open ring by repeating its first point.
    pub fn closed(points: &[[Real; 2]]) -> Result<Self> {
        let mut ring = points.to_vec();
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if first != last {
                ring.push(*first);
            }
        }
        Self::from_ring(&ring)
    }

    /// The fixed example shape, see [`WIDE_V`].
    pub fn wide_v() -> Self {
        let ring: LineString<Real> = WIDE_V.iter().map(|p| coord! { x: p[0], y: p[1] }).collect();
        Self { polygon: Polygon::new(ring, vec![]) }
    }

    pub const fn polygon(&self) -> &Polygon<Real> {
        &self.polygon
    }

    pub fn ring(&self) -> &LineString<Real> {
        self.polygon.exterior()
    }

    /// First point of the ring. For the wide V this is the tip.
    pub fn start(&self) -> Coord<Real> {
        self.ring().0[0]
    }

    pub fn is_closed(&self) -> bool {
        self.ring().is_closed()
    }

    /// A copy with the exterior counter-clockwise and holes clockwise, as the
    /// buffer and skeleton routines expect. The literal ring order is kept in `self`.
    pub fn oriented(&self) -> Polygon<Real> {
        self.polygon.orient(Direction::Default)
    }

    pub fn bounds(&self) -> Option<Rect<Real>> {
        self.polygon.bounding_rect()
    }

    /// Distance from `point` to the nearest boundary edge, holes included.
    pub fn clearance(&self, point: Coord<Real>) -> Real {
        std::iter::once(self.polygon.exterior())
            .chain(self.polygon.interiors())
            .flat_map(|ring| ring.lines())
            .map(|line| Point::from(point).euclidean_distance(&line))
            .fold(Real::INFINITY, Real::min)
    }

    /// Vertical extent of the boundary along the line `X = x`,
    /// or `None` when that line misses the shape.
    pub fn chord_width(&self, x: Real) -> Option<Real> {
        let eps = tolerance();
        let mut lo = Real::INFINITY;
        let mut hi = Real::NEG_INFINITY;

        for line in self.ring().lines() {
            let (a, b) = (line.start, line.end);
            if x < a.x.min(b.x) - eps || x > a.x.max(b.x) + eps {
                continue;
            }
            if (b.x - a.x).abs() <= eps {
                // vertical edge lying on the chord
                lo = lo.min(a.y.min(b.y));
                hi = hi.max(a.y.max(b.y));
            } else {
                let y = a.y + (x - a.x) * (b.y - a.y) / (b.x - a.x);
                lo = lo.min(y);
                hi = hi.max(y);
            }
        }

        (hi >= lo).then(|| hi - lo)
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::wide_v()
    }
}
