//! Renders the **hybrid V-carve** strategy for a wide V shape in one figure.
//!
//! A V-carving toolpath follows the shape's medial axis while the bit plunges
//! deeper with the widening shape. Once the bit reaches its maximum radius it
//! can go no deeper, and the path switches to a parallel offset of the boundary.
//! The figure shows the boundary, the inward offset at the maximum radius, the
//! centerline up to the bifurcation point and the bit's circle at that point.
//!
//! # Features
//! #### Default
//! - **svg-io**: also write the figure as SVG
//! - **truetype-text**: draw raster text with a TrueType font found on the system
//!
//! ```no_run
//! use vcarve_diagram::{DiagramConfig, generate_hybrid_visual};
//!
//! let diagram = generate_hybrid_visual(&DiagramConfig::default())?;
//! assert_eq!(diagram.centerline.0.len(), 100);
//! # Ok::<(), vcarve_diagram::errors::DiagramError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::approx_constant, clippy::all)]

pub mod config;
pub mod diagram;
pub mod errors;
pub mod float_types;
pub mod medial;
pub mod offset;
pub mod plot;
pub mod shape;

pub use config::DiagramConfig;
pub use diagram::{HybridDiagram, generate_hybrid_visual};
pub use errors::{DiagramError, Result};
pub use medial::Cutoff;
pub use offset::InwardOffset;
pub use shape::Boundary;
