//! Runs in its own process: the tolerance can be set once per process.

use vcarve_diagram::float_types::{set_tolerance, tolerance};
use vcarve_diagram::{Boundary, DiagramError};

#[test]
fn runtime_tolerance_loosens_ring_closure() {
    set_tolerance(1e-6);
    assert_eq!(tolerance(), 1e-6);

    // a later call is ignored
    set_tolerance(1.0);
    assert_eq!(tolerance(), 1e-6);

    let nearly = [[0.0, 0.0], [10.0, 4.0], [10.0, -4.0], [1e-7, 0.0]];
    assert!(Boundary::from_ring(&nearly).is_ok());

    let open = [[0.0, 0.0], [10.0, 4.0], [10.0, -4.0], [1e-5, 0.0]];
    assert!(matches!(Boundary::from_ring(&open), Err(DiagramError::RingNotClosed { .. })));
}
