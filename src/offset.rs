//! Inward offsetting (negative buffer) of the boundary.
//!
//! The offset ring is the path a flat-bottomed pass follows once the V-bit has
//! reached its maximum depth: every point of it sits `radius` away from the
//! nearest boundary edge. Depending on the local width of the shape the result
//! may vanish, stay one ring, or split into several disjoint rings.
//!
//! The buffer itself is delegated to `geo-buf`, which resolves the
//! self-intersections of shrunken corners through its straight skeleton.

use crate::errors::{DiagramError, Result};
use crate::float_types::Real;
use crate::shape::Boundary;
use geo::{LineString, MultiPolygon, Polygon};
use geo_buf::buffer_polygon;
use tracing::debug;

/// Outcome of shrinking a boundary, by shape cardinality.
#[derive(Clone, Debug, PartialEq)]
pub enum InwardOffset {
    /// The radius exceeds the shape's inscribed capacity everywhere.
    Empty,
    /// One simple ring.
    Single(Polygon<Real>),
    /// Several disjoint pieces.
    Multi(MultiPolygon<Real>),
}

impl InwardOffset {
    pub fn is_empty(&self) -> bool {
        matches!(self, InwardOffset::Empty)
    }

    /// Number of disjoint pieces.
    pub fn len(&self) -> usize {
        match self {
            InwardOffset::Empty => 0,
            InwardOffset::Single(_) => 1,
            InwardOffset::Multi(mp) => mp.0.len(),
        }
    }

    /// Exterior rings of every piece, in buffer order.
    pub fn exteriors(&self) -> Vec<&LineString<Real>> {
        match self {
            InwardOffset::Empty => Vec::new(),
            InwardOffset::Single(poly) => vec![poly.exterior()],
            InwardOffset::Multi(mp) => mp.0.iter().map(|poly| poly.exterior()).collect(),
        }
    }

    fn from_multi_polygon(mut mpoly: MultiPolygon<Real>) -> Self {
        // geo-buf can emit slivers with fewer than three distinct vertices
        mpoly.0.retain(|poly| poly.exterior().0.len() >= 4);
        match mpoly.0.len() {
            0 => InwardOffset::Empty,
            1 => match mpoly.0.pop() {
                Some(poly) => InwardOffset::Single(poly),
                None => InwardOffset::Empty,
            },
            _ => InwardOffset::Multi(mpoly),
        }
    }
}

/// Shrinks `boundary` by `radius` with sharp (mitered) corners.
///
/// # Errors
/// [`DiagramError::InvalidRadius`] unless `radius` is finite and positive.
pub fn inward_offset(boundary: &Boundary, radius: Real) -> Result<InwardOffset> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(DiagramError::InvalidRadius(radius));
    }

    let buffered = buffer_polygon(&boundary.oriented(), -radius);
    let offset = InwardOffset::from_multi_polygon(buffered);
    debug!(radius, pieces = offset.len(), "computed inward offset");
    Ok(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn slivers_are_dropped() {
        let sliver = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 0.0, y: 0.0)];
        let square = polygon![
            (x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0), (x: 0.0, y: 0.0)
        ];
        let offset = InwardOffset::from_multi_polygon(MultiPolygon::new(vec![sliver, square.clone()]));
        assert_eq!(offset, InwardOffset::Single(square));
    }

    #[test]
    fn cardinality_follows_piece_count() {
        assert!(InwardOffset::from_multi_polygon(MultiPolygon::new(vec![])).is_empty());

        let a = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)];
        let b = polygon![(x: 5.0, y: 0.0), (x: 6.0, y: 0.0), (x: 6.0, y: 1.0), (x: 5.0, y: 0.0)];
        let offset = InwardOffset::from_multi_polygon(MultiPolygon::new(vec![a, b]));
        assert_eq!(offset.len(), 2);
        assert_eq!(offset.exteriors().len(), 2);
    }

    #[test]
    fn rejects_non_positive_radius() {
        let v = Boundary::wide_v();
        assert!(matches!(inward_offset(&v, 0.0), Err(DiagramError::InvalidRadius(_))));
        assert!(matches!(inward_offset(&v, Real::NAN), Err(DiagramError::InvalidRadius(_))));
    }
}
