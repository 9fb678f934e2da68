//! TrueType text for the raster backend: glyph outlines become `tiny-skia` paths.

use crate::errors::{DiagramError, Result};
use crate::float_types::Real;
use crate::plot::{HAlign, TextMetrics};
use std::path::{Path, PathBuf};
use tiny_skia::PathBuilder;
use tracing::debug;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// Sans-serif fonts commonly present on Linux, macOS and Windows.
pub const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// An owned font file, parsed on demand.
#[derive(Clone, Debug)]
pub struct Font {
    data: Vec<u8>,
    units_per_em: Real,
    path: Option<PathBuf>,
}

impl Font {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let units_per_em = {
            let face = Face::from_slice(&data, 0).map_err(|e| DiagramError::Font(e.to_string()))?;
            Option::<u16>::from(face.units_per_em()).unwrap_or(1000)
        };
        Ok(Self { data, units_per_em: Real::from(units_per_em.max(1)), path: None })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut font = Self::from_bytes(std::fs::read(path)?)?;
        font.path = Some(path.to_path_buf());
        Ok(font)
    }

    /// First loadable font among [`SYSTEM_FONTS`].
    pub fn discover() -> Option<Self> {
        SYSTEM_FONTS.iter().find_map(|candidate| match Self::load(candidate) {
            Ok(font) => {
                debug!(path = candidate, "using system font");
                Some(font)
            },
            Err(_) => None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::from_slice(&self.data, 0).ok()
    }

    fn glyph_advance(&self, face: &Face<'_>, ch: char) -> (Option<GlyphId>, Real) {
        match face.glyph_index(ch) {
            Some(id) => {
                let advance = face.glyph_hor_advance(id).map_or(0.5 * self.units_per_em, Real::from);
                (Some(id), advance)
            },
            None => (None, 0.5 * self.units_per_em),
        }
    }

    /// Outline of one line of text at `size_px`, baseline at `y`, aligned on `x`.
    /// `None` for empty or whitespace-only text.
    pub fn outline(&self, text: &str, size_px: Real, x: Real, y: Real, align: HAlign) -> Option<tiny_skia::Path> {
        let face = self.face()?;
        let scale = size_px / self.units_per_em;
        let width = self.advance(text, size_px);
        let mut pen_x = match align {
            HAlign::Left => x,
            HAlign::Center => x - 0.5 * width,
            HAlign::Right => x - width,
        };

        let mut sink = PathSink { builder: PathBuilder::new(), scale: scale as f32, x: 0.0, y: y as f32 };
        for ch in text.chars() {
            let (id, advance) = self.glyph_advance(&face, ch);
            if let Some(id) = id {
                sink.x = pen_x as f32;
                let _ = face.outline_glyph(id, &mut sink);
            }
            pen_x += advance * scale;
        }
        sink.builder.finish()
    }
}

impl TextMetrics for Font {
    fn advance(&self, text: &str, size_px: Real) -> Real {
        let Some(face) = self.face() else {
            return 0.0;
        };
        let units: Real = text.chars().map(|ch| self.glyph_advance(&face, ch).1).sum();
        units * size_px / self.units_per_em
    }
}

/// Places font-unit outlines on the canvas; font y points up, canvas y down.
struct PathSink {
    builder: PathBuilder,
    scale: f32,
    x: f32,
    y: f32,
}

impl PathSink {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x * self.scale, self.y - y * self.scale)
    }
}

impl OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
