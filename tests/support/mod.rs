//! Test support library
//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use vcarve_diagram::{DiagramConfig, InwardOffset, float_types::Real};

/// Default configuration with every output redirected into a scratch directory.
pub fn scratch_config(test_name: &str) -> DiagramConfig {
    let dir = scratch_dir(test_name);
    DiagramConfig::default()
        .with_output(dir.join("hybrid_vcarve.png"))
}

/// Fresh, empty directory under the system temp dir, unique per test and process.
pub fn scratch_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vcarve-diagram-{}-{}", test_name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap_or_else(|e| panic!("cannot create {}: {e}", dir.display()));
    dir
}

/// All exterior vertices of the offset, closing points included.
pub fn offset_vertices(offset: &InwardOffset) -> Vec<(Real, Real)> {
    offset
        .exteriors()
        .into_iter()
        .flat_map(|ring| ring.coords().map(|c| (c.x, c.y)))
        .collect()
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}
