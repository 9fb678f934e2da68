//! Fixed inputs of the diagram, gathered in one place.

use crate::float_types::Real;
use crate::medial::{CENTERLINE_SAMPLES, Cutoff, MAX_RADIUS};
use crate::shape::WIDE_V;
use std::path::PathBuf;

/// Relative path the PNG is written to, overwriting any previous run.
pub const OUTPUT_PATH: &str = "hybrid_vcarve.png";

#[derive(Clone, Debug, PartialEq)]
pub struct DiagramConfig {
    /// Explicitly closed boundary ring.
    pub boundary: Vec<[Real; 2]>,
    /// Bit radius at maximum depth; also the inward offset distance.
    pub max_radius: Real,
    pub cutoff: Cutoff,
    /// Number of centerline samples, both ends included.
    pub samples: usize,
    pub output: PathBuf,
    /// Also write an SVG rendition here.
    pub svg_output: Option<PathBuf>,
    pub width_px: u32,
    pub height_px: u32,
    pub dpi: Real,
    /// TrueType font for raster text; system fonts are searched when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            boundary: WIDE_V.to_vec(),
            max_radius: MAX_RADIUS,
            cutoff: Cutoff::default(),
            samples: CENTERLINE_SAMPLES,
            output: PathBuf::from(OUTPUT_PATH),
            svg_output: None,
            // 10 x 6 inches at 100 dpi
            width_px: 1000,
            height_px: 600,
            dpi: 100.0,
            font_path: None,
        }
    }
}

impl DiagramConfig {
    pub fn with_max_radius(mut self, radius: Real) -> Self {
        self.max_radius = radius;
        self
    }

    pub fn with_cutoff(mut self, cutoff: Cutoff) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_svg_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.svg_output = Some(output.into());
        self
    }
}
