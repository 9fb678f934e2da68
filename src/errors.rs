//! Errors raised while building or rendering the diagram

use crate::float_types::Real;

/// All the possible failures we might encounter
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// (RingNotClosed) The ring’s first/last points differ
    #[error("(RingNotClosed) The ring's first({first:?}) and last({last:?}) points differ")]
    RingNotClosed { first: [Real; 2], last: [Real; 2] },
    /// (TooFewPoints) A closed ring needs at least 4 coordinates (3 distinct + closing point)
    #[error("(TooFewPoints) A ring needs at least 4 coordinates, got {0}")]
    TooFewPoints(usize),
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) The coordinate ({x}, {y}) has a NaN or infinite")]
    InvalidCoordinate { x: Real, y: Real },
    /// Offset radii must be finite and strictly positive
    #[error("offset radius must be finite and > 0, got {0}")]
    InvalidRadius(Real),
    /// A centerline needs at least two samples to span its range
    #[error("a centerline needs at least 2 samples, got {0}")]
    InvalidSampleCount(usize),
    /// The pixel buffer could not be allocated
    #[error("a {width}x{height} canvas could not be allocated")]
    Canvas { width: u32, height: u32 },
    /// The font file could not be parsed
    #[error("font could not be loaded: {0}")]
    Font(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, DiagramError>;
