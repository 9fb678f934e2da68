//! PNG output: the scene is rasterised with `tiny-skia` and encoded with `image`.

use crate::errors::{DiagramError, Result};
use crate::float_types::Real;
use crate::plot::scene::{Primitive, Scene, Stroke};
use crate::plot::{Backend, Color, EstimatedMetrics, Figure, TextMetrics};
use std::io::Cursor;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, StrokeDash, Transform};
use tracing::warn;

#[cfg(feature = "truetype-text")]
use crate::plot::font::Font;

/// Renders figures to PNG bytes.
#[derive(Clone, Debug, Default)]
pub struct RasterBackend {
    #[cfg(feature = "truetype-text")]
    font: Option<Font>,
}

impl RasterBackend {
    /// A backend without a font; text primitives are skipped.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "truetype-text")]
    pub fn with_font(font: Font) -> Self {
        Self { font: Some(font) }
    }

    pub fn has_font(&self) -> bool {
        #[cfg(feature = "truetype-text")]
        {
            self.font.is_some()
        }
        #[cfg(not(feature = "truetype-text"))]
        {
            false
        }
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        #[cfg(feature = "truetype-text")]
        if let Some(font) = &self.font {
            return font;
        }
        &EstimatedMetrics
    }

    /// Draws the scene onto a fresh pixmap.
    pub fn rasterize(&self, scene: &Scene) -> Result<Pixmap> {
        let mut pixmap = Pixmap::new(scene.width, scene.height)
            .ok_or(DiagramError::Canvas { width: scene.width, height: scene.height })?;
        pixmap.fill(skia_color(scene.background));

        if !self.has_font() && scene.primitives.iter().any(|p| matches!(p, Primitive::Text { .. })) {
            warn!("no font available, text is left out of the raster image");
        }

        for primitive in &scene.primitives {
            self.draw(&mut pixmap, primitive);
        }
        Ok(pixmap)
    }

    fn draw(&self, pixmap: &mut Pixmap, primitive: &Primitive) {
        match primitive {
            Primitive::Polyline { points, stroke } => {
                if let Some(path) = polyline_path(points, false) {
                    stroke_path(pixmap, &path, stroke);
                }
            },
            Primitive::Fill { points, color, outline } => {
                if let Some(path) = polyline_path(points, true) {
                    pixmap.fill_path(&path, &paint(*color), FillRule::Winding, Transform::identity(), None);
                    if let Some(outline) = outline {
                        stroke_path(pixmap, &path, outline);
                    }
                }
            },
            Primitive::Circle { center, radius, stroke } => {
                if let Some(path) = PathBuilder::from_circle(center.0 as f32, center.1 as f32, *radius as f32) {
                    stroke_path(pixmap, &path, stroke);
                }
            },
            Primitive::Rect { rect, fill, stroke } => {
                let corners = [
                    (rect.left, rect.top),
                    (rect.right, rect.top),
                    (rect.right, rect.bottom),
                    (rect.left, rect.bottom),
                ];
                if let Some(path) = polyline_path(&corners, true) {
                    if let Some(fill) = fill {
                        pixmap.fill_path(&path, &paint(*fill), FillRule::Winding, Transform::identity(), None);
                    }
                    if let Some(stroke) = stroke {
                        stroke_path(pixmap, &path, stroke);
                    }
                }
            },
            Primitive::Text { text, x, y, size, align, color } => {
                #[cfg(feature = "truetype-text")]
                if let Some(font) = &self.font {
                    if let Some(path) = font.outline(text, *size, *x, *y, *align) {
                        pixmap.fill_path(&path, &paint(*color), FillRule::Winding, Transform::identity(), None);
                    }
                }
                #[cfg(not(feature = "truetype-text"))]
                let _ = (text, x, y, size, align, color);
            },
        }
    }
}

impl Backend for RasterBackend {
    type Output = Vec<u8>;

    fn render(&self, figure: &Figure) -> Result<Vec<u8>> {
        let scene = Scene::compose(figure, self.metrics());
        encode_png(&self.rasterize(&scene)?)
    }
}

/// Encodes a pixmap as PNG, un-premultiplying its pixels.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let mut image = image::RgbaImage::new(pixmap.width(), pixmap.height());
    for (src, dst) in pixmap.pixels().iter().zip(image.pixels_mut()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

fn polyline_path(points: &[(Real, Real)], closed: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.0 as f32, first.1 as f32);
    for p in rest {
        pb.line_to(p.0 as f32, p.1 as f32);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

fn stroke_path(pixmap: &mut Pixmap, path: &tiny_skia::Path, stroke: &Stroke) {
    let skia_stroke = tiny_skia::Stroke {
        width: stroke.width as f32,
        dash: stroke
            .dash
            .as_ref()
            .and_then(|dash| StrokeDash::new(dash.iter().map(|d| *d as f32).collect(), 0.0)),
        ..tiny_skia::Stroke::default()
    };
    pixmap.stroke_path(path, &paint(stroke.color), &skia_stroke, Transform::identity(), None);
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::LineStyle;
    use geo::coord;

    fn red_square() -> Scene {
        Scene {
            width: 20,
            height: 20,
            background: Color::WHITE,
            primitives: vec![Primitive::Fill {
                points: vec![(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)],
                color: Color::RED,
                outline: None,
            }],
        }
    }

    #[test]
    fn fills_land_on_the_pixmap() {
        let pixmap = RasterBackend::new().rasterize(&red_square()).unwrap_or_else(|e| panic!("{e}"));
        let inside = pixmap.pixel(10, 10).map(|p| p.demultiply());
        let outside = pixmap.pixel(1, 1).map(|p| p.demultiply());
        assert_eq!(inside.map(|c| (c.red(), c.green(), c.blue())), Some((255, 0, 0)));
        assert_eq!(outside.map(|c| (c.red(), c.green(), c.blue())), Some((255, 255, 255)));
    }

    #[test]
    fn zero_sized_canvas_is_an_error() {
        let mut scene = red_square();
        scene.width = 0;
        assert!(matches!(RasterBackend::new().rasterize(&scene), Err(DiagramError::Canvas { .. })));
    }

    #[test]
    fn encodes_a_png() {
        let mut fig = Figure::new(64, 48, 72.0);
        fig.plot(
            [coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }],
            LineStyle::solid(Color::BLUE, 2.0),
            None,
        );
        let bytes = RasterBackend::new().render(&fig).unwrap_or_default();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).map(|img| (img.width(), img.height()));
        assert_eq!(decoded.ok(), Some((64, 48)));
    }
}
