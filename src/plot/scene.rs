//! Resolves a [`Figure`] into pixel-space drawing primitives.
//!
//! Every backend draws the same [`Scene`], so the PNG and SVG outputs agree
//! on placement down to the pixel.

use crate::float_types::{Real, points_to_px, tolerance};
use crate::plot::layout::{Layout, PixelRect, tick_label};
use crate::plot::{Annotation, Color, Dash, Figure, HAlign, LegendKey, LineStyle, Mark, TextMetrics};
use geo::coord;

/// Stroke in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: Real,
    /// On/off lengths, `None` for a solid stroke.
    pub dash: Option<Vec<Real>>,
}

impl Stroke {
    pub const fn solid(color: Color, width: Real) -> Self {
        Self { color, width, dash: None }
    }

    /// Converts a point-based line style at `dpi`. Dashes scale with the line width.
    pub fn from_style(style: &LineStyle, dpi: Real) -> Self {
        let width = points_to_px(style.width_pt, dpi);
        let dash = match style.dash {
            Dash::Solid => None,
            Dash::Dashed => Some(vec![3.7 * width, 1.6 * width]),
        };
        Self { color: style.color, width, dash }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Polyline {
        points: Vec<(Real, Real)>,
        stroke: Stroke,
    },
    /// Filled polygon, optionally outlined.
    Fill {
        points: Vec<(Real, Real)>,
        color: Color,
        outline: Option<Stroke>,
    },
    Circle {
        center: (Real, Real),
        radius: Real,
        stroke: Stroke,
    },
    Rect {
        rect: PixelRect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// One line of text; `y` is the baseline.
    Text {
        text: String,
        x: Real,
        y: Real,
        size: Real,
        align: HAlign,
        color: Color,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub primitives: Vec<Primitive>,
}

/// Arrow shaft width, head width and head length, in points.
const ARROW_WIDTH_PT: Real = 4.0;
const ARROW_HEAD_WIDTH_PT: Real = 12.0;
const ARROW_HEAD_LENGTH_PT: Real = 12.0;

const TICK_LENGTH_PT: Real = 3.5;
const TICK_PAD_PT: Real = 3.5;
const FRAME_WIDTH_PT: Real = 0.8;
const TITLE_PAD_PT: Real = 6.0;
const LINE_SPACING: Real = 1.2;

// Legend spacing, in font-size units.
const LEGEND_BORDER_PAD: Real = 0.4;
const LEGEND_HANDLE_LENGTH: Real = 2.0;
const LEGEND_HANDLE_PAD: Real = 0.8;
const LEGEND_LABEL_SPACING: Real = 0.5;
const LEGEND_AXES_PAD: Real = 0.5;

impl Scene {
    pub fn compose(figure: &Figure, metrics: &dyn TextMetrics) -> Self {
        let layout = Layout::new(figure);
        let mut scene = Scene {
            width: figure.width_px,
            height: figure.height_px,
            background: Color::WHITE,
            primitives: Vec::new(),
        };

        scene.grid(figure, &layout);
        for mark in &figure.marks {
            scene.mark(figure, &layout, mark, metrics);
        }
        scene.frame(figure, &layout);
        scene.title(figure, &layout);
        if figure.legend {
            scene.legend(figure, &layout, metrics);
        }
        scene
    }

    fn grid(&mut self, figure: &Figure, layout: &Layout) {
        let Some(alpha) = figure.grid else { return };
        let stroke = Stroke::solid(Color::GRID.with_alpha(alpha), points_to_px(FRAME_WIDTH_PT, figure.dpi));
        let view = layout.view;

        for x in layout.x_ticks() {
            let top = layout.to_px(coord! { x: x, y: view.max().y });
            let bottom = layout.to_px(coord! { x: x, y: view.min().y });
            self.primitives.push(Primitive::Polyline { points: vec![top, bottom], stroke: stroke.clone() });
        }
        for y in layout.y_ticks() {
            let left = layout.to_px(coord! { x: view.min().x, y: y });
            let right = layout.to_px(coord! { x: view.max().x, y: y });
            self.primitives.push(Primitive::Polyline { points: vec![left, right], stroke: stroke.clone() });
        }
    }

    fn mark(&mut self, figure: &Figure, layout: &Layout, mark: &Mark, metrics: &dyn TextMetrics) {
        match mark {
            Mark::Line { points, style, .. } => {
                if points.len() < 2 {
                    return;
                }
                self.primitives.push(Primitive::Polyline {
                    points: points.iter().map(|c| layout.to_px(*c)).collect(),
                    stroke: Stroke::from_style(style, figure.dpi),
                });
            },
            Mark::Circle { center, radius, style, .. } => {
                let (sx, _) = layout.scale();
                self.primitives.push(Primitive::Circle {
                    center: layout.to_px(*center),
                    radius: radius * sx,
                    stroke: Stroke::from_style(style, figure.dpi),
                });
            },
            Mark::Annotation(annotation) => self.annotation(figure, layout, annotation, metrics),
        }
    }

    fn annotation(&mut self, figure: &Figure, layout: &Layout, annotation: &Annotation, metrics: &dyn TextMetrics) {
        let size = points_to_px(figure.font_size_pt, figure.dpi);
        let anchor = layout.to_px(annotation.xytext);
        let lines: Vec<&str> = annotation.text.split('\n').collect();
        let text_box = text_box(&lines, anchor, size, annotation.align, metrics);

        let head = layout.to_px(annotation.xy);
        if let Some(tail) = box_exit(&text_box, head) {
            if let Some(points) = arrow_outline(tail, head, annotation.shrink, figure.dpi) {
                self.primitives.push(Primitive::Fill {
                    points,
                    color: annotation.color,
                    outline: Some(Stroke::solid(annotation.color, points_to_px(1.0, figure.dpi))),
                });
            }
        }

        for (i, line) in lines.iter().enumerate() {
            self.primitives.push(Primitive::Text {
                text: (*line).to_owned(),
                x: anchor.0,
                y: anchor.1 + i as Real * LINE_SPACING * size,
                size,
                align: annotation.align,
                color: annotation.color,
            });
        }
    }

    fn frame(&mut self, figure: &Figure, layout: &Layout) {
        let width = points_to_px(FRAME_WIDTH_PT, figure.dpi);
        let tick = points_to_px(TICK_LENGTH_PT, figure.dpi);
        let pad = points_to_px(TICK_PAD_PT, figure.dpi);
        let size = points_to_px(figure.font_size_pt, figure.dpi);
        let axes = layout.axes;
        let stroke = Stroke::solid(Color::BLACK, width);

        self.primitives.push(Primitive::Rect { rect: axes, fill: None, stroke: Some(stroke.clone()) });

        for x in layout.x_ticks() {
            let (px, _) = layout.to_px(coord! { x: x, y: 0.0 });
            self.primitives.push(Primitive::Polyline {
                points: vec![(px, axes.bottom), (px, axes.bottom + tick)],
                stroke: stroke.clone(),
            });
            self.primitives.push(Primitive::Text {
                text: tick_label(x),
                x: px,
                y: axes.bottom + tick + pad + 0.8 * size,
                size,
                align: HAlign::Center,
                color: Color::BLACK,
            });
        }
        for y in layout.y_ticks() {
            let (_, py) = layout.to_px(coord! { x: 0.0, y: y });
            self.primitives.push(Primitive::Polyline {
                points: vec![(axes.left - tick, py), (axes.left, py)],
                stroke: stroke.clone(),
            });
            self.primitives.push(Primitive::Text {
                text: tick_label(y),
                x: axes.left - tick - pad,
                y: py + 0.35 * size,
                size,
                align: HAlign::Right,
                color: Color::BLACK,
            });
        }
    }

    fn title(&mut self, figure: &Figure, layout: &Layout) {
        let Some(title) = &figure.title else { return };
        let size = points_to_px(figure.title_size_pt, figure.dpi);
        self.primitives.push(Primitive::Text {
            text: title.clone(),
            x: (layout.axes.left + layout.axes.right) * 0.5,
            y: layout.axes.top - points_to_px(TITLE_PAD_PT, figure.dpi) - 0.2 * size,
            size,
            align: HAlign::Center,
            color: Color::BLACK,
        });
    }

    fn legend(&mut self, figure: &Figure, layout: &Layout, metrics: &dyn TextMetrics) {
        let entries = figure.legend_entries();
        if entries.is_empty() {
            return;
        }

        let em = points_to_px(figure.font_size_pt, figure.dpi);
        let label_width = entries
            .iter()
            .map(|(label, _)| metrics.advance(label, em))
            .fold(0.0, Real::max);
        let rows = entries.len() as Real;
        let width = em * (2.0 * LEGEND_BORDER_PAD + LEGEND_HANDLE_LENGTH + LEGEND_HANDLE_PAD) + label_width;
        let height = em * (2.0 * LEGEND_BORDER_PAD + rows + (rows - 1.0) * LEGEND_LABEL_SPACING);

        let rect = best_legend_rect(figure, layout, width, height, em * LEGEND_AXES_PAD);
        self.primitives.push(Primitive::Rect {
            rect,
            fill: Some(Color::WHITE.with_alpha(0.8)),
            stroke: Some(Stroke::solid(Color::LEGEND_EDGE, points_to_px(1.0, figure.dpi))),
        });

        let handle_left = rect.left + em * LEGEND_BORDER_PAD;
        let handle_right = handle_left + em * LEGEND_HANDLE_LENGTH;
        for (i, (label, key)) in entries.iter().enumerate() {
            let center = rect.top + em * (LEGEND_BORDER_PAD + i as Real * (1.0 + LEGEND_LABEL_SPACING) + 0.5);
            match key {
                LegendKey::Line(style) => self.primitives.push(Primitive::Polyline {
                    points: vec![(handle_left, center), (handle_right, center)],
                    stroke: Stroke::from_style(style, figure.dpi),
                }),
                LegendKey::Patch(style) => self.primitives.push(Primitive::Rect {
                    rect: PixelRect {
                        left: handle_left,
                        top: center - 0.35 * em,
                        right: handle_right,
                        bottom: center + 0.35 * em,
                    },
                    fill: None,
                    stroke: Some(Stroke::from_style(style, figure.dpi)),
                }),
            }
            self.primitives.push(Primitive::Text {
                text: (*label).to_owned(),
                x: handle_right + em * LEGEND_HANDLE_PAD,
                y: center + 0.35 * em,
                size: em,
                align: HAlign::Left,
                color: Color::BLACK,
            });
        }
    }
}

/// Pixel bounding box of a block of text lines whose first baseline is at `anchor`.
fn text_box(lines: &[&str], anchor: (Real, Real), size: Real, align: HAlign, metrics: &dyn TextMetrics) -> PixelRect {
    let width = lines.iter().map(|line| metrics.advance(line, size)).fold(0.0, Real::max);
    let left = match align {
        HAlign::Left => anchor.0,
        HAlign::Center => anchor.0 - 0.5 * width,
        HAlign::Right => anchor.0 - width,
    };
    let top = anchor.1 - 0.8 * size;
    let bottom = anchor.1 + (lines.len().max(1) - 1) as Real * LINE_SPACING * size + 0.2 * size;
    PixelRect { left, top, right: left + width, bottom }
}

/// Where the ray from the box center towards `target` leaves the box.
/// `None` when the target lies inside the box.
fn box_exit(rect: &PixelRect, target: (Real, Real)) -> Option<(Real, Real)> {
    if rect.contains(target) {
        return None;
    }
    let center = ((rect.left + rect.right) * 0.5, (rect.top + rect.bottom) * 0.5);
    let (dx, dy) = (target.0 - center.0, target.1 - center.1);
    let tx = if dx.abs() > 0.0 { 0.5 * rect.width() / dx.abs() } else { Real::INFINITY };
    let ty = if dy.abs() > 0.0 { 0.5 * rect.height() / dy.abs() } else { Real::INFINITY };
    let t = tx.min(ty).min(1.0);
    Some((center.0 + dx * t, center.1 + dy * t))
}

/// Filled arrow from `tail` to `head`, each end pulled in by `shrink` of the length.
pub fn arrow_outline(tail: (Real, Real), head: (Real, Real), shrink: Real, dpi: Real) -> Option<Vec<(Real, Real)>> {
    let (dx, dy) = (head.0 - tail.0, head.1 - tail.1);
    let length = dx.hypot(dy);
    if length <= tolerance() {
        return None;
    }
    let (ux, uy) = (dx / length, dy / length);
    let (nx, ny) = (-uy, ux);

    let start = (tail.0 + dx * shrink, tail.1 + dy * shrink);
    let tip = (head.0 - dx * shrink, head.1 - dy * shrink);
    let usable = length * (1.0 - 2.0 * shrink);
    let head_length = points_to_px(ARROW_HEAD_LENGTH_PT, dpi).min(usable);
    let base = (tip.0 - ux * head_length, tip.1 - uy * head_length);

    let half_shaft = 0.5 * points_to_px(ARROW_WIDTH_PT, dpi);
    let half_head = 0.5 * points_to_px(ARROW_HEAD_WIDTH_PT, dpi);
    let side = |p: (Real, Real), w: Real| (p.0 + nx * w, p.1 + ny * w);

    Some(vec![
        side(start, half_shaft),
        side(base, half_shaft),
        side(base, half_head),
        tip,
        side(base, -half_head),
        side(base, -half_shaft),
        side(start, -half_shaft),
    ])
}

/// Picks the candidate legend position covering the fewest plotted points.
/// Candidates mirror the usual preference: upper right, upper left, lower left,
/// lower right, upper center, lower center.
fn best_legend_rect(figure: &Figure, layout: &Layout, width: Real, height: Real, pad: Real) -> PixelRect {
    let axes = layout.axes;
    let at = |left: Real, top: Real| PixelRect { left, top, right: left + width, bottom: top + height };
    let mid = (axes.left + axes.right - width) * 0.5;
    let candidates = [
        at(axes.right - pad - width, axes.top + pad),
        at(axes.left + pad, axes.top + pad),
        at(axes.left + pad, axes.bottom - pad - height),
        at(axes.right - pad - width, axes.bottom - pad - height),
        at(mid, axes.top + pad),
        at(mid, axes.bottom - pad - height),
    ];

    let samples = mark_samples(figure, layout);
    let mut best = candidates[0];
    let mut best_hits = usize::MAX;
    for candidate in candidates {
        let hits = samples.iter().filter(|p| candidate.contains(**p)).count();
        if hits < best_hits {
            best = candidate;
            best_hits = hits;
        }
    }
    best
}

/// Pixel positions along every line and circle, a few pixels apart.
fn mark_samples(figure: &Figure, layout: &Layout) -> Vec<(Real, Real)> {
    const STEP_PX: Real = 4.0;
    let mut samples = Vec::new();

    for mark in &figure.marks {
        match mark {
            Mark::Line { points, .. } => {
                let px: Vec<(Real, Real)> = points.iter().map(|c| layout.to_px(*c)).collect();
                for pair in px.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    let n = ((b.0 - a.0).hypot(b.1 - a.1) / STEP_PX).ceil().max(1.0) as usize;
                    samples.extend(
                        (0..=n).map(|i| i as Real / n as Real).map(|t| (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)),
                    );
                }
            },
            Mark::Circle { center, radius, .. } => {
                let (cx, cy) = layout.to_px(*center);
                let r = radius * layout.scale().0;
                let n = ((crate::float_types::TAU * r) / STEP_PX).ceil().max(8.0) as usize;
                samples.extend((0..n).map(|i| {
                    let theta = crate::float_types::TAU * i as Real / n as Real;
                    (cx + r * theta.cos(), cy + r * theta.sin())
                }));
            },
            Mark::Annotation(annotation) => {
                samples.push(layout.to_px(annotation.xy));
                samples.push(layout.to_px(annotation.xytext));
            },
        }
    }
    samples
}
