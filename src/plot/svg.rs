//! SVG output through the `svg` crate. Text stays text, so no font is needed.

use crate::errors::Result;
use crate::float_types::Real;
use crate::plot::scene::{Primitive, Scene, Stroke};
use crate::plot::{Backend, Color, EstimatedMetrics, Figure, HAlign, TextMetrics};
use ::svg::Document;
use ::svg::Node;
use ::svg::node::element::path::Data;
use ::svg::node::element::{Circle, Element, Path, Rectangle};

/// Renders figures to SVG documents.
pub struct SvgBackend<'a> {
    metrics: &'a dyn TextMetrics,
}

impl Default for SvgBackend<'_> {
    fn default() -> Self {
        Self { metrics: &EstimatedMetrics }
    }
}

impl<'a> SvgBackend<'a> {
    /// Lays text out with `metrics`, so the legend box matches the raster output.
    pub fn with_metrics(metrics: &'a dyn TextMetrics) -> Self {
        Self { metrics }
    }

    pub fn document(&self, scene: &Scene) -> Document {
        let mut document = Document::new()
            .set("width", scene.width)
            .set("height", scene.height)
            .set("viewBox", format!("0 0 {} {}", scene.width, scene.height));

        document = document.add(
            Rectangle::new()
                .set("width", scene.width)
                .set("height", scene.height)
                .set("fill", scene.background.hex()),
        );

        for primitive in &scene.primitives {
            document = match primitive {
                Primitive::Polyline { points, stroke } => document.add(styled(
                    Path::new().set("d", path_data(points, false)).set("fill", "none"),
                    stroke,
                )),
                Primitive::Fill { points, color, outline } => {
                    let mut path = with_fill(Path::new().set("d", path_data(points, true)), *color);
                    if let Some(outline) = outline {
                        path = styled(path, outline);
                    }
                    document.add(path)
                },
                Primitive::Circle { center, radius, stroke } => document.add(styled(
                    Circle::new().set("cx", center.0).set("cy", center.1).set("r", *radius).set("fill", "none"),
                    stroke,
                )),
                Primitive::Rect { rect, fill, stroke } => {
                    let mut node = Rectangle::new()
                        .set("x", rect.left)
                        .set("y", rect.top)
                        .set("width", rect.width())
                        .set("height", rect.height());
                    node = match fill {
                        Some(fill) => with_fill(node, *fill),
                        None => node.set("fill", "none"),
                    };
                    if let Some(stroke) = stroke {
                        node = styled(node, stroke);
                    }
                    document.add(node)
                },
                Primitive::Text { text, x, y, size, align, color } => {
                    document.add(text_element(text, *x, *y, *size, *align, *color))
                },
            };
        }
        document
    }
}

impl Backend for SvgBackend<'_> {
    type Output = Document;

    fn render(&self, figure: &Figure) -> Result<Document> {
        Ok(self.document(&Scene::compose(figure, self.metrics)))
    }
}

fn path_data(points: &[(Real, Real)], closed: bool) -> Data {
    let mut data = Data::new();
    for (i, p) in points.iter().enumerate() {
        let xy = vec![p.0 as f32, p.1 as f32];
        data = if i == 0 { data.move_to(xy) } else { data.line_to(xy) };
    }
    if closed {
        data = data.close();
    }
    data
}

macro_rules! impl_paint {
    ($($node:ty),*) => {
        $(impl Paintable for $node {
            fn attr(self, name: &str, value: String) -> Self {
                self.set(name, value)
            }
        })*
    };
}

trait Paintable: Sized {
    fn attr(self, name: &str, value: String) -> Self;
}

impl_paint!(Path, Circle, Rectangle);

fn styled<N: Paintable>(node: N, stroke: &Stroke) -> N {
    let mut node = node
        .attr("stroke", stroke.color.hex())
        .attr("stroke-width", format!("{:.3}", stroke.width));
    if stroke.color.a < 255 {
        node = node.attr("stroke-opacity", format!("{:.3}", stroke.color.opacity()));
    }
    if let Some(dash) = &stroke.dash {
        let pattern: Vec<String> = dash.iter().map(|d| format!("{d:.3}")).collect();
        node = node.attr("stroke-dasharray", pattern.join(" "));
    }
    node
}

fn with_fill<N: Paintable>(node: N, color: Color) -> N {
    let node = node.attr("fill", color.hex());
    if color.a < 255 {
        node.attr("fill-opacity", format!("{:.3}", color.opacity()))
    } else {
        node
    }
}

fn text_element(text: &str, x: Real, y: Real, size: Real, align: HAlign, color: Color) -> Element {
    let anchor = match align {
        HAlign::Left => "start",
        HAlign::Center => "middle",
        HAlign::Right => "end",
    };
    let mut element = Element::new("text");
    element.assign("x", x);
    element.assign("y", y);
    element.assign("font-family", "DejaVu Sans, Arial, sans-serif");
    element.assign("font-size", format!("{size:.2}"));
    element.assign("text-anchor", anchor);
    element.assign("fill", color.hex());
    element.append(::svg::node::Text::new(text));
    element
}
