//! A small figure model in the spirit of a plotting library's axes: lines,
//! circle patches, arrow annotations, a title, a legend and a grid, laid out
//! on a fixed-size canvas and handed to a [`Backend`] for output.

pub mod layout;
pub mod scene;
pub mod raster;

#[cfg(feature = "svg-io")]
pub mod svg;

#[cfg(feature = "truetype-text")]
pub mod font;

use crate::errors::Result;
use crate::float_types::Real;
use geo::{Coord, Rect, coord};

pub use layout::Layout;
pub use raster::RasterBackend;
pub use scene::{Primitive, Scene, Stroke};

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GRID: Color = Color::rgb(176, 176, 176);
    pub const LEGEND_EDGE: Color = Color::rgb(204, 204, 204);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with opacity `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: Real) -> Self {
        Self { a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8, ..self }
    }

    pub fn opacity(&self) -> Real {
        Real::from(self.a) / 255.0
    }

    /// `#rrggbb`, alpha excluded.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
}

/// Stroke of a line or patch outline, width in typographic points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width_pt: Real,
    pub dash: Dash,
}

impl LineStyle {
    pub const fn solid(color: Color, width_pt: Real) -> Self {
        Self { color, width_pt, dash: Dash::Solid }
    }

    pub const fn dashed(color: Color, width_pt: Real) -> Self {
        Self { color, width_pt, dash: Dash::Dashed }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text placed at `xytext` with an arrow pointing at `xy`, both in data coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub xy: Coord<Real>,
    pub xytext: Coord<Real>,
    pub align: HAlign,
    /// Fraction of the arrow length removed at each end.
    pub shrink: Real,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    Line {
        points: Vec<Coord<Real>>,
        style: LineStyle,
        label: Option<String>,
    },
    /// Unfilled circle patch.
    Circle {
        center: Coord<Real>,
        radius: Real,
        style: LineStyle,
        label: Option<String>,
    },
    Annotation(Annotation),
}

/// How a legend entry draws its key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LegendKey {
    Line(LineStyle),
    Patch(LineStyle),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub width_px: u32,
    pub height_px: u32,
    pub dpi: Real,
    pub title: Option<String>,
    pub title_size_pt: Real,
    pub font_size_pt: Real,
    pub marks: Vec<Mark>,
    pub equal_aspect: bool,
    pub legend: bool,
    /// Grid opacity, `None` for no grid.
    pub grid: Option<Real>,
}

impl Figure {
    pub fn new(width_px: u32, height_px: u32, dpi: Real) -> Self {
        Self {
            width_px,
            height_px,
            dpi,
            title: None,
            title_size_pt: 12.0,
            font_size_pt: 10.0,
            marks: Vec::new(),
            equal_aspect: false,
            legend: false,
            grid: None,
        }
    }

    /// Draws the points as a connected line.
    pub fn plot<I>(&mut self, points: I, style: LineStyle, label: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = Coord<Real>>,
    {
        self.marks.push(Mark::Line {
            points: points.into_iter().collect(),
            style,
            label: label.map(str::to_owned),
        });
        self
    }

    pub fn circle(
        &mut self,
        center: Coord<Real>,
        radius: Real,
        style: LineStyle,
        label: Option<&str>,
    ) -> &mut Self {
        self.marks.push(Mark::Circle { center, radius, style, label: label.map(str::to_owned) });
        self
    }

    /// Annotates `xy` with `text` at `xytext`, black arrow shrunk 5% at both ends.
    pub fn annotate(
        &mut self,
        text: &str,
        xy: Coord<Real>,
        xytext: Coord<Real>,
        align: HAlign,
    ) -> &mut Self {
        self.marks.push(Mark::Annotation(Annotation {
            text: text.to_owned(),
            xy,
            xytext,
            align,
            shrink: 0.05,
            color: Color::BLACK,
        }));
        self
    }

    pub fn set_title(&mut self, title: &str, size_pt: Real) -> &mut Self {
        self.title = Some(title.to_owned());
        self.title_size_pt = size_pt;
        self
    }

    pub fn set_aspect_equal(&mut self) -> &mut Self {
        self.equal_aspect = true;
        self
    }

    pub fn show_legend(&mut self) -> &mut Self {
        self.legend = true;
        self
    }

    pub fn show_grid(&mut self, alpha: Real) -> &mut Self {
        self.grid = Some(alpha);
        self
    }

    /// Labelled marks in insertion order.
    pub fn legend_entries(&self) -> Vec<(&str, LegendKey)> {
        self.marks
            .iter()
            .filter_map(|mark| match mark {
                Mark::Line { label: Some(label), style, .. } => {
                    Some((label.as_str(), LegendKey::Line(*style)))
                },
                Mark::Circle { label: Some(label), style, .. } => {
                    Some((label.as_str(), LegendKey::Patch(*style)))
                },
                _ => None,
            })
            .collect()
    }

    /// Extent of every mark in data coordinates, annotation anchors included.
    pub fn data_bounds(&self) -> Option<Rect<Real>> {
        let mut min = coord! { x: Real::INFINITY, y: Real::INFINITY };
        let mut max = coord! { x: Real::NEG_INFINITY, y: Real::NEG_INFINITY };
        let mut grow = |c: Coord<Real>| {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        };

        for mark in &self.marks {
            match mark {
                Mark::Line { points, .. } => points.iter().copied().for_each(&mut grow),
                Mark::Circle { center, radius, .. } => {
                    grow(coord! { x: center.x - radius, y: center.y - radius });
                    grow(coord! { x: center.x + radius, y: center.y + radius });
                },
                Mark::Annotation(annotation) => {
                    grow(annotation.xy);
                    grow(annotation.xytext);
                },
            }
        }

        (min.x <= max.x && min.y <= max.y).then(|| Rect::new(min, max))
    }
}

/// Turns a [`Figure`] into an output artifact.
pub trait Backend {
    type Output;

    fn render(&self, figure: &Figure) -> Result<Self::Output>;
}

/// Advance widths for laying out text.
pub trait TextMetrics {
    /// Width in pixels of one line of `text` at `size_px`.
    fn advance(&self, text: &str, size_px: Real) -> Real;
}

/// Fallback metrics when no font is loaded: a fixed average glyph width.
#[derive(Clone, Copy, Debug, Default)]
pub struct EstimatedMetrics;

impl TextMetrics for EstimatedMetrics {
    fn advance(&self, text: &str, size_px: Real) -> Real {
        0.6 * size_px * text.chars().count() as Real
    }
}
