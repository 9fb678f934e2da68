mod support;

use approx::assert_relative_eq;
use vcarve_diagram::medial::{CUTOFF_X, MAX_RADIUS, centerline, taper_cutoff};
use vcarve_diagram::offset::inward_offset;
use vcarve_diagram::shape::{WIDE_V, WIDE_V_TAPER};
use vcarve_diagram::{Boundary, Cutoff, DiagramError, InwardOffset};

#[test]
fn wide_v_ring_is_closed() {
    assert_eq!(WIDE_V.first(), WIDE_V.last());

    let boundary = Boundary::from_ring(&WIDE_V).unwrap();
    assert!(boundary.is_closed());
    assert_eq!(boundary.ring().0.len(), 4);
    assert_eq!(boundary.start(), geo::coord! { x: 0.0, y: 0.0 });
}

#[test]
fn open_ring_is_rejected() {
    let open = [[0.0, 0.0], [10.0, 4.0], [10.0, -4.0], [1.0, 0.0]];
    assert!(matches!(Boundary::from_ring(&open), Err(DiagramError::RingNotClosed { .. })));

    // closing it explicitly makes it valid
    let closed = Boundary::closed(&open[..3]).unwrap();
    assert_eq!(closed, Boundary::wide_v());
}

#[test]
fn degenerate_rings_are_rejected() {
    assert!(matches!(
        Boundary::from_ring(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]),
        Err(DiagramError::TooFewPoints(3))
    ));
    assert!(matches!(
        Boundary::from_ring(&[[0.0, 0.0], [f64::NAN, 1.0], [1.0, 0.0], [0.0, 0.0]]),
        Err(DiagramError::InvalidCoordinate { .. })
    ));
}

#[test]
fn offset_keeps_its_distance_from_the_boundary() {
    let boundary = Boundary::wide_v();
    let offset = inward_offset(&boundary, MAX_RADIUS).unwrap();
    assert!(!offset.is_empty());
    assert_eq!(offset.len(), 1);

    let vertices = support::offset_vertices(&offset);
    assert!(vertices.len() >= 4);
    for (x, y) in vertices {
        let clearance = boundary.clearance(geo::coord! { x: x, y: y });
        assert!(clearance >= MAX_RADIUS - 1e-6, "vertex ({x}, {y}) only {clearance} from boundary");
    }
}

#[test]
fn offset_vanishes_past_the_inscribed_radius() {
    // inradius of the wide V is about 2.708
    let offset = inward_offset(&Boundary::wide_v(), 3.0).unwrap();
    assert_eq!(offset, InwardOffset::Empty);
    assert!(support::offset_vertices(&offset).is_empty());
}

#[test]
fn non_positive_radius_is_rejected() {
    assert!(matches!(inward_offset(&Boundary::wide_v(), 0.0), Err(DiagramError::InvalidRadius(_))));
    assert!(matches!(inward_offset(&Boundary::wide_v(), -1.5), Err(DiagramError::InvalidRadius(_))));
}

#[test]
fn centerline_runs_along_the_axis() {
    let boundary = Boundary::wide_v();
    let cutoff = Cutoff::default().resolve(&boundary, MAX_RADIUS).unwrap();
    let line = centerline(boundary.start(), cutoff, 100).unwrap();

    assert_eq!(line.0.len(), 100);
    assert!(line.coords().all(|c| c.y == 0.0));
    assert!(line.0.windows(2).all(|w| w[0].x <= w[1].x));
    assert_eq!(line.0[0].x, 0.0);
    assert_eq!(line.0[99].x, CUTOFF_X);
}

#[test]
fn cutoff_matches_the_taper() {
    assert_relative_eq!(WIDE_V_TAPER * CUTOFF_X, 2.0 * MAX_RADIUS);
    assert_relative_eq!(Boundary::wide_v().chord_width(CUTOFF_X).unwrap(), 3.0, epsilon = 1e-12);

    let taper = taper_cutoff(&Boundary::wide_v(), MAX_RADIUS).unwrap();
    assert_relative_eq!(taper, CUTOFF_X, epsilon = 1e-6);

    let resolved = Cutoff::Taper.resolve(&Boundary::wide_v(), MAX_RADIUS).unwrap();
    assert_relative_eq!(resolved.x, CUTOFF_X, epsilon = 1e-6);
    assert_eq!(resolved.y, 0.0);
}

#[test]
fn skeleton_cutoff_is_where_clearance_reaches_the_radius() {
    let boundary = Boundary::wide_v();
    let point = Cutoff::Skeleton.resolve(&boundary, MAX_RADIUS).unwrap();

    // on the tip's bisector, where the inscribed circle has radius 1.5
    let expected = MAX_RADIUS * 116f64.sqrt() / 4.0;
    assert!(support::approx_eq(point.x, expected, 1e-4), "got {point:?}");
    assert!(support::approx_eq(point.y, 0.0, 1e-4), "got {point:?}");
    assert!(support::approx_eq(boundary.clearance(point), MAX_RADIUS, 1e-4));
}

#[test]
fn skeleton_cutoff_gives_up_on_narrow_shapes() {
    assert_eq!(Cutoff::Skeleton.resolve(&Boundary::wide_v(), 3.0), None);
}
