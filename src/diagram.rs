//! The hybrid V-carve diagram: medial axis up to the bifurcation, parallel
//! offset beyond it.

use crate::config::DiagramConfig;
use crate::errors::Result;
use crate::float_types::Real;
use crate::medial::{Centerline, centerline};
use crate::offset::{InwardOffset, inward_offset};
use crate::plot::{Backend, Color, Figure, HAlign, LineStyle, RasterBackend};
use crate::shape::Boundary;
use geo::{Coord, coord};
use tracing::{debug, info, warn};

pub const TITLE: &str = "Hybrid Strategy: Medial Axis -> Parallel Offset";

/// Every computed value the diagram is drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct HybridDiagram {
    pub boundary: Boundary,
    pub max_radius: Real,
    pub offset: InwardOffset,
    /// Bifurcation point, on the centerline's far end.
    pub cutoff: Coord<Real>,
    pub centerline: Centerline,
}

impl HybridDiagram {
    pub fn build(config: &DiagramConfig) -> Result<Self> {
        let boundary = Boundary::from_ring(&config.boundary)?;
        let offset = inward_offset(&boundary, config.max_radius)?;
        config.cutoff.validate(&boundary)?;

        let start = boundary.start();
        let cutoff = match config.cutoff.resolve(&boundary, config.max_radius) {
            Some(point) => point,
            None => {
                let end = boundary.bounds().map_or(start.x, |r| r.max().x);
                warn!(
                    radius = config.max_radius,
                    "shape never reaches the maximum bit width, carving the centerline to x = {end}"
                );
                coord! { x: end, y: start.y }
            },
        };
        let centerline = centerline(start, cutoff, config.samples)?;

        info!(pieces = offset.len(), cutoff_x = cutoff.x, "built hybrid diagram");
        Ok(Self { boundary, max_radius: config.max_radius, offset, cutoff, centerline })
    }

    pub fn figure(&self, config: &DiagramConfig) -> Figure {
        let mut fig = Figure::new(config.width_px, config.height_px, config.dpi);

        fig.plot(
            self.boundary.ring().coords().copied(),
            LineStyle::solid(Color::BLACK, 2.0),
            Some("Shape Boundary"),
        );

        let offset_style = LineStyle::solid(Color::BLUE, 3.0);
        match &self.offset {
            InwardOffset::Empty => debug!("inward offset is empty, nothing to draw"),
            InwardOffset::Single(poly) => {
                let label = format!("Offset Path (Max Depth={})", self.max_radius);
                fig.plot(poly.exterior().coords().copied(), offset_style, Some(&label));
            },
            InwardOffset::Multi(mpoly) => {
                for poly in &mpoly.0 {
                    fig.plot(poly.exterior().coords().copied(), offset_style, None);
                }
            },
        }

        fig.plot(
            self.centerline.coords().copied(),
            LineStyle::solid(Color::GREEN, 3.0),
            Some("Medial Axis (Variable Depth)"),
        );

        let start = self.boundary.start();
        fig.annotate(
            "Start V-Carve\n(Depth = 0)",
            start,
            coord! { x: start.x - 2.0, y: start.y },
            HAlign::Left,
        );
        fig.annotate(
            "The \"Bifurcation\"\n(Depth Reached Max)",
            self.cutoff,
            coord! { x: self.cutoff.x, y: self.cutoff.y - 2.5 },
            HAlign::Center,
        );

        // constraint circle at the split point
        fig.circle(self.cutoff, self.max_radius, LineStyle::dashed(Color::RED, 1.0), Some("Max Bit Size"));

        fig.set_title(TITLE, 14.0).set_aspect_equal().show_legend().show_grid(0.3);
        fig
    }

    pub fn render_png(&self, config: &DiagramConfig) -> Result<Vec<u8>> {
        raster_backend(config)?.render(&self.figure(config))
    }

    #[cfg(feature = "svg-io")]
    pub fn render_svg(&self, config: &DiagramConfig) -> Result<::svg::Document> {
        let raster = raster_backend(config)?;
        crate::plot::svg::SvgBackend::with_metrics(raster.metrics()).render(&self.figure(config))
    }

    /// Writes the PNG (and the SVG, when configured), replacing existing files.
    pub fn save(&self, config: &DiagramConfig) -> Result<()> {
        let png = self.render_png(config)?;
        std::fs::write(&config.output, &png)?;
        info!(path = %config.output.display(), bytes = png.len(), "wrote diagram");

        if let Some(path) = &config.svg_output {
            #[cfg(feature = "svg-io")]
            {
                ::svg::save(path, &self.render_svg(config)?)?;
                info!(path = %path.display(), "wrote svg diagram");
            }
            #[cfg(not(feature = "svg-io"))]
            warn!(path = %path.display(), "built without svg-io, skipping svg output");
        }
        Ok(())
    }
}

/// Raster backend with the configured font, or the first system font found.
pub fn raster_backend(config: &DiagramConfig) -> Result<RasterBackend> {
    #[cfg(feature = "truetype-text")]
    {
        use crate::plot::font::Font;

        let font = match &config.font_path {
            Some(path) => Some(Font::load(path)?),
            None => Font::discover(),
        };
        match font {
            Some(font) => Ok(RasterBackend::with_font(font)),
            None => {
                warn!("no usable system font found, raster text will be missing");
                Ok(RasterBackend::new())
            },
        }
    }
    #[cfg(not(feature = "truetype-text"))]
    {
        let _ = config;
        Ok(RasterBackend::new())
    }
}

/// Builds the diagram from `config` and writes it out.
pub fn generate_hybrid_visual(config: &DiagramConfig) -> Result<HybridDiagram> {
    let diagram = HybridDiagram::build(config)?;
    diagram.save(config)?;
    Ok(diagram)
}
