//! The V-carve centerline and its bifurcation point.
//!
//! Along the medial axis the V-bit plunges deeper as the shape widens. Once the
//! inscribed circle reaches the bit's maximum radius, the bit cannot go deeper
//! and the toolpath splits into the parallel offsets of [`crate::offset`]. The
//! point where that happens is the *bifurcation*, and the centerline is only
//! carved up to it.

use crate::errors::{DiagramError, Result};
use crate::float_types::{Real, tolerance};
use crate::shape::Boundary;
use geo::{Coord, EuclideanDistance, LineString, Point, coord};
use geo_buf::skeleton_of_polygon_to_linestring;
use std::collections::VecDeque;
use tracing::debug;

/// Radius of the bit at its maximum depth.
pub const MAX_RADIUS: Real = 1.5;

/// Bifurcation x for the wide V, derived by hand:
/// `width(x) = 0.8·x` and `0.8·x = 2·MAX_RADIUS` gives `x = 3.75`.
pub const CUTOFF_X: Real = 3.75;

pub const CENTERLINE_SAMPLES: usize = 100;

/// Ordered samples of the medial axis, start to bifurcation.
pub type Centerline = LineString<Real>;

/// How the bifurcation point along the centerline is located.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cutoff {
    /// A precomputed x on the start point's horizontal.
    Fixed(Real),
    /// First x where the vertical chord of the shape reaches `2·radius`.
    Taper,
    /// First point along the straight skeleton whose clearance reaches `radius`.
    Skeleton,
}

impl Default for Cutoff {
    fn default() -> Self {
        Cutoff::Fixed(CUTOFF_X)
    }
}

impl Cutoff {
    /// Checks the strategy's own parameters against `boundary`.
    ///
    /// # Errors
    /// [`DiagramError::InvalidCoordinate`] for a non-finite fixed x.
    pub fn validate(&self, boundary: &Boundary) -> Result<()> {
        match *self {
            Cutoff::Fixed(x) if !x.is_finite() => {
                Err(DiagramError::InvalidCoordinate { x, y: boundary.start().y })
            },
            _ => Ok(()),
        }
    }

    /// Locates the bifurcation point, or `None` if the shape never gets wide enough.
    pub fn resolve(&self, boundary: &Boundary, radius: Real) -> Option<Coord<Real>> {
        let start = boundary.start();
        let point = match *self {
            Cutoff::Fixed(x) => Some(coord! { x: x, y: start.y }),
            Cutoff::Taper => taper_cutoff(boundary, radius).map(|x| coord! { x: x, y: start.y }),
            Cutoff::Skeleton => skeleton_cutoff(boundary, radius),
        };
        debug!(strategy = ?self, ?point, "resolved bifurcation point");
        point
    }
}

/// `stop` is always the last sample, like numpy's `linspace`.
pub fn linspace(start: Real, stop: Real, samples: usize) -> impl Iterator<Item = Real> {
    let last = samples.saturating_sub(1);
    let step = if last == 0 { 0.0 } else { (stop - start) / last as Real };
    (0..samples).map(move |i| if i == last { stop } else { start + step * i as Real })
}

/// Samples the straight centerline from `from` to `to`, both included.
///
/// # Errors
/// [`DiagramError::InvalidSampleCount`] for fewer than two samples.
pub fn centerline(from: Coord<Real>, to: Coord<Real>, samples: usize) -> Result<Centerline> {
    if samples < 2 {
        return Err(DiagramError::InvalidSampleCount(samples));
    }
    Ok(linspace(0.0, 1.0, samples)
        .map(|t| coord! { x: from.x + (to.x - from.x) * t, y: from.y + (to.y - from.y) * t })
        .collect())
}

/// The closed-form rule generalised: bisects for the smallest x past the start
/// whose chord width is `2·radius`. Assumes the chord widens monotonically
/// away from the start, as in a V.
pub fn taper_cutoff(boundary: &Boundary, radius: Real) -> Option<Real> {
    let target = 2.0 * radius;
    let width = |x: Real| boundary.chord_width(x).unwrap_or(0.0);

    let mut lo = boundary.start().x;
    let mut hi = boundary.bounds()?.max().x;
    if width(lo) >= target {
        return Some(lo);
    }
    if width(hi) < target {
        return None;
    }

    let eps = tolerance() * (hi - lo).abs().max(1.0);
    for _ in 0..200 {
        if hi - lo <= eps {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if width(mid) >= target {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Some(hi)
}

/// Walks the straight skeleton outward from the boundary's start vertex and
/// returns the first point whose clearance reaches `radius`.
///
/// Clearance grows linearly along a skeleton edge, so the crossing is
/// interpolated between the edge's endpoints.
pub fn skeleton_cutoff(boundary: &Boundary, radius: Real) -> Option<Coord<Real>> {
    let skeleton = skeleton_of_polygon_to_linestring(&boundary.oriented(), true);
    let segments: Vec<(Coord<Real>, Coord<Real>)> = skeleton
        .iter()
        .flat_map(|ls| ls.lines())
        .map(|line| (line.start, line.end))
        .filter(|(a, b)| a != b)
        .collect();

    let start = Point::from(boundary.start());
    let seed = segments
        .iter()
        .flat_map(|&(a, b)| [a, b])
        .min_by(|p, q| {
            let dp = Point::from(*p).euclidean_distance(&start);
            dp.total_cmp(&Point::from(*q).euclidean_distance(&start))
        })?;

    let snap = 1e-6 * boundary.bounds().map_or(1.0, |r| r.width().hypot(r.height()).max(1.0));
    let mut used = vec![false; segments.len()];
    let mut queue = VecDeque::from([seed]);

    while let Some(node) = queue.pop_front() {
        let here = Point::from(node);
        for (i, &(p, q)) in segments.iter().enumerate() {
            if used[i] {
                continue;
            }
            let (a, b) = if Point::from(p).euclidean_distance(&here) <= snap {
                (p, q)
            } else if Point::from(q).euclidean_distance(&here) <= snap {
                (q, p)
            } else {
                continue;
            };
            used[i] = true;

            let da = boundary.clearance(a);
            let db = boundary.clearance(b);
            if da < radius && db >= radius {
                let t = (radius - da) / (db - da);
                return Some(coord! { x: a.x + (b.x - a.x) * t, y: a.y + (b.y - a.y) * t });
            }
            queue.push_back(b);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let xs: Vec<Real> = linspace(0.0, CUTOFF_X, 5).collect();
        assert_eq!(xs, vec![0.0, 0.9375, 1.875, 2.8125, 3.75]);
        assert_eq!(linspace(2.0, 9.0, 1).collect::<Vec<_>>(), vec![9.0]);
        assert_eq!(linspace(2.0, 9.0, 0).count(), 0);
    }

    #[test]
    fn centerline_needs_two_samples() {
        let a = coord! { x: 0.0, y: 0.0 };
        assert!(matches!(centerline(a, a, 1), Err(DiagramError::InvalidSampleCount(1))));
    }

    #[test]
    fn non_finite_fixed_cutoff_is_rejected() {
        let v = Boundary::wide_v();
        assert!(Cutoff::default().validate(&v).is_ok());
        assert!(Cutoff::Taper.validate(&v).is_ok());
        assert!(matches!(
            Cutoff::Fixed(Real::NAN).validate(&v),
            Err(DiagramError::InvalidCoordinate { .. })
        ));
        assert!(Cutoff::Fixed(Real::INFINITY).validate(&v).is_err());
    }

    #[test]
    fn taper_gives_up_when_shape_stays_narrow() {
        // widest chord of the wide V is 8
        assert!(taper_cutoff(&Boundary::wide_v(), 4.5).is_none());
    }
}
