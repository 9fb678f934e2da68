mod support;

use vcarve_diagram::diagram::TITLE;
use vcarve_diagram::medial::CUTOFF_X;
use vcarve_diagram::plot::{Layout, Mark};
use vcarve_diagram::{Cutoff, DiagramConfig, DiagramError, HybridDiagram, InwardOffset, generate_hybrid_visual};

fn labels(diagram: &HybridDiagram, config: &DiagramConfig) -> Vec<String> {
    diagram
        .figure(config)
        .legend_entries()
        .into_iter()
        .map(|(label, _)| label.to_owned())
        .collect()
}

#[test]
fn default_diagram_has_every_component() {
    let config = DiagramConfig::default();
    let diagram = HybridDiagram::build(&config).unwrap();

    assert_eq!(diagram.cutoff, geo::coord! { x: CUTOFF_X, y: 0.0 });
    assert!(matches!(diagram.offset, InwardOffset::Single(_)));
    assert_eq!(
        labels(&diagram, &config),
        [
            "Shape Boundary",
            "Offset Path (Max Depth=1.5)",
            "Medial Axis (Variable Depth)",
            "Max Bit Size",
        ]
    );

    let figure = diagram.figure(&config);
    assert_eq!(figure.title.as_deref(), Some(TITLE));
    assert_eq!(figure.title_size_pt, 14.0);
    assert!(figure.equal_aspect && figure.legend);
    assert_eq!(figure.grid, Some(0.3));

    let notes: Vec<&str> = figure
        .marks
        .iter()
        .filter_map(|m| match m {
            Mark::Annotation(a) => Some(a.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(notes, ["Start V-Carve\n(Depth = 0)", "The \"Bifurcation\"\n(Depth Reached Max)"]);
}

#[test]
fn viewport_keeps_equal_aspect() {
    let config = DiagramConfig::default();
    let figure = HybridDiagram::build(&config).unwrap().figure(&config);
    let layout = Layout::new(&figure);

    let origin = layout.to_px(geo::coord! { x: 0.0, y: 0.0 });
    let right = layout.to_px(geo::coord! { x: 1.0, y: 0.0 });
    let up = layout.to_px(geo::coord! { x: 0.0, y: 1.0 });
    assert!(support::approx_eq(right.0 - origin.0, origin.1 - up.1, 1e-9));
    assert!(right.0 > origin.0);
}

#[test]
fn empty_offset_still_renders() {
    let config = DiagramConfig::default().with_max_radius(3.0);
    let diagram = HybridDiagram::build(&config).unwrap();
    assert!(diagram.offset.is_empty());
    assert!(!labels(&diagram, &config).iter().any(|l| l.starts_with("Offset Path")));

    let png = diagram.render_png(&config).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

/// Two 6x6 squares joined by a neck 1 unit wide.
fn dumbbell() -> Vec<[f64; 2]> {
    vec![
        [0.0, 0.0],
        [6.0, 0.0],
        [6.0, 2.5],
        [10.0, 2.5],
        [10.0, 0.0],
        [16.0, 0.0],
        [16.0, 6.0],
        [10.0, 6.0],
        [10.0, 3.5],
        [6.0, 3.5],
        [6.0, 6.0],
        [0.0, 6.0],
        [0.0, 0.0],
    ]
}

#[test]
fn split_offset_draws_every_piece_unlabelled() {
    let config = DiagramConfig { boundary: dumbbell(), ..DiagramConfig::default() };
    let diagram = HybridDiagram::build(&config).unwrap();

    let InwardOffset::Multi(pieces) = &diagram.offset else {
        panic!("expected the neck to split the offset, got {:?}", diagram.offset);
    };
    assert_eq!(pieces.0.len(), 2);
    assert_eq!(diagram.offset.len(), 2);

    let figure = diagram.figure(&config);
    let unlabelled = figure
        .marks
        .iter()
        .filter(|m| matches!(m, Mark::Line { label: None, .. }))
        .count();
    assert_eq!(unlabelled, 2);
    assert_eq!(
        labels(&diagram, &config),
        ["Shape Boundary", "Medial Axis (Variable Depth)", "Max Bit Size"]
    );

    let png = diagram.render_png(&config).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn non_finite_fixed_cutoff_fails_the_build() {
    let config = DiagramConfig::default().with_cutoff(Cutoff::Fixed(f64::NAN));
    assert!(matches!(HybridDiagram::build(&config), Err(DiagramError::InvalidCoordinate { .. })));
}

#[test]
fn unreachable_cutoff_falls_back_to_the_far_end() {
    let config = DiagramConfig::default().with_max_radius(4.5).with_cutoff(Cutoff::Taper);
    let diagram = HybridDiagram::build(&config).unwrap();
    assert_eq!(diagram.cutoff, geo::coord! { x: 10.0, y: 0.0 });
    assert_eq!(diagram.centerline.0.last().map(|c| c.x), Some(10.0));
}

#[test]
fn png_has_the_configured_size() {
    let config = DiagramConfig::default();
    let png = HybridDiagram::build(&config).unwrap().render_png(&config).unwrap();
    let image = image::load_from_memory(&png).unwrap();
    assert_eq!((image.width(), image.height()), (1000, 600));
}

#[test]
fn rendering_is_deterministic() {
    let config = DiagramConfig::default();
    let diagram = HybridDiagram::build(&config).unwrap();
    assert_eq!(diagram.render_png(&config).unwrap(), diagram.render_png(&config).unwrap());
}

#[test]
fn saving_twice_overwrites_with_identical_bytes() {
    let config = support::scratch_config("overwrite");

    generate_hybrid_visual(&config).unwrap();
    let first = std::fs::read(&config.output).unwrap();
    generate_hybrid_visual(&config).unwrap();
    let second = std::fs::read(&config.output).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[cfg(feature = "svg-io")]
#[test]
fn svg_output_is_written_alongside() {
    let config = support::scratch_config("svg");
    let svg_path = config.output.with_extension("svg");
    let config = config.with_svg_output(&svg_path);

    generate_hybrid_visual(&config).unwrap();
    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Max Bit Size"));
    assert!(svg.contains("Start V-Carve"));
}

#[test]
fn invalid_samples_fail_the_build() {
    let config = DiagramConfig { samples: 1, ..DiagramConfig::default() };
    assert!(HybridDiagram::build(&config).is_err());
}
