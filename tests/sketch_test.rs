//! Sketches arriving as JSON documents, swept with logging enabled.

use approx::assert_abs_diff_eq;
use brep_sweep::ops::LinearSweepFeature;
use brep_sweep::settings::SweepSettings;
use brep_sweep::sketch::{Sketch, SketchEntity};
use brep_sweep::ErrorKind;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const TRIANGLE: &str = r#"{
    "entities": [
        {"type": "Line", "x1": 0.0, "y1": 0.0, "x2": 4.0, "y2": 0.0},
        {"type": "Line", "x1": 4.0, "y1": 0.0, "x2": 0.0, "y2": 3.0},
        {"type": "Line", "x1": 0.0, "y1": 3.0, "x2": 0.0, "y2": 0.0}
    ]
}"#;

#[test]
fn triangle_document_sweeps_to_prism() {
    init_logging();
    let sketch = Sketch::from_json(TRIANGLE).unwrap();
    assert_eq!(sketch.entities.len(), 3);
    let body = LinearSweepFeature::builder()
        .sketch(sketch)
        .distance(2.0)
        .build()
        .generate()
        .unwrap();
    assert_eq!(body.vertices().len(), 6);
    assert_eq!(body.edges().len(), 9);
    assert_eq!(body.faces().len(), 5);
    assert_abs_diff_eq!(body.volume(), 12.0, epsilon = 1e-9);
    // 2 × 6 + 2 × (4 + 3 + 5)
    assert_abs_diff_eq!(body.surface_area(), 36.0, epsilon = 1e-9);
}

#[test]
fn polygon_document_roundtrips() {
    let sketch = Sketch::polygon(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
    let json = sketch.to_json().unwrap();
    assert!(json.contains(r#""type":"Polygon""#));
    let back = Sketch::from_json(&json).unwrap();
    assert_eq!(back, sketch);
}

#[test]
fn unclosed_document_is_an_open_profile() {
    init_logging();
    let json = r#"{"entities": [
        {"type": "Arc", "cx": 0.0, "cy": 0.0, "r": 1.0, "start_angle": 0.0, "end_angle": 90.0},
        {"type": "Line", "x1": 0.0, "y1": 1.0, "x2": 0.0, "y2": 0.0}
    ]}"#;
    let sketch = Sketch::from_json(json).unwrap();
    let err = LinearSweepFeature::builder()
        .sketch(sketch)
        .distance(1.0)
        .build()
        .generate()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OpenProfile);
}

#[test]
fn quarter_disc_closes_with_two_lines() {
    let sketch = Sketch::new()
        .with_entity(SketchEntity::arc(0.0, 0.0, 1.0, 0.0, 90.0))
        .with_entity(SketchEntity::line(0.0, 1.0, 0.0, 0.0))
        .with_entity(SketchEntity::line(0.0, 0.0, 1.0, 0.0));
    let settings = SweepSettings {
        arc_segments: 4,
        ..SweepSettings::default()
    };
    let body = LinearSweepFeature::builder()
        .sketch(sketch)
        .distance(1.0)
        .settings(settings)
        .build()
        .generate()
        .unwrap();
    // 5 arc points plus the center.
    assert_eq!(body.vertices().len(), 12);
    assert_eq!(body.faces().len(), 8);
}

#[test]
fn garbage_documents_are_settings_errors() {
    assert_eq!(Sketch::from_json("[").unwrap_err().kind(), ErrorKind::Settings);
    assert_eq!(
        SweepSettings::from_json(r#"{"arc_segments": "many"}"#).unwrap_err().kind(),
        ErrorKind::Settings
    );
}
