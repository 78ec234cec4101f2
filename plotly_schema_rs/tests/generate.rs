//! Integration tests for the public generation API against a Plotly-shaped fixture.

use plotly_schema_rs::{
    GenerateSettings, HEADER, PlotlySchemaGenError, Registry, WorkaroundSelection,
    attach_encoding, builtin_rules, emit, generate_from_file, generate_to_string,
    generate_to_writer, parse, synthesize, validate_schema,
};
use std::path::PathBuf;

const FIXTURE: &str = include_str!("fixtures/plot-schema-mini.json");

fn fixture_without(pointer: &str) -> String {
    let mut document: serde_json::Value = serde_json::from_str(FIXTURE).expect("fixture is JSON");
    let (parent, key) = pointer.rsplit_once('/').expect("pointer has a parent");
    document
        .pointer_mut(parent)
        .and_then(serde_json::Value::as_object_mut)
        .expect("parent exists")
        .remove(key)
        .expect("key exists");
    serde_json::to_string(&document).expect("serialize")
}

#[test]
fn fixture_generates_every_top_level_type() {
    let code: String =
        generate_to_string(FIXTURE, &GenerateSettings::default()).expect("generate");
    assert!(code.starts_with(HEADER), "missing header");
    for declaration in [
        "pub struct Scatter {",
        "pub struct ScatterMarker {",
        "pub struct ScatterMarkerLine {",
        "pub struct Bar {",
        "pub struct Filter {",
        "pub struct Layout {",
        "pub struct LayoutAnnotation {",
        "pub struct Frame {",
        "pub enum Visible {",
        "pub enum ScatterMarkerSymbol {",
        "pub enum LayoutHoverMode {",
        "pub struct ScatterMode(u64);",
        "pub enum LayoutAnnotationXRef {",
        "pub enum LayoutBarMode {",
        "pub enum BarTextAngle {",
        "    pub x_axis: ::plotly_schema_rs::runtime::Subplots<LayoutXAxis>,",
    ] {
        assert!(code.contains(declaration), "missing `{declaration}`");
    }
    assert!(!code.contains("pub enum ScatterVisible"), "visible should be shared");
    assert!(!code.contains("static_plot"), "config section is not part of the figure");
}

#[test]
fn frame_patches_are_applied() {
    let code: String =
        generate_to_string(FIXTURE, &GenerateSettings::default()).expect("generate");
    assert!(
        code.contains("    pub data: ::std::vec::Vec<::std::boxed::Box<dyn ::plotly_schema_rs::runtime::Trace>>,"),
        "Frame.data should hold traces"
    );
    assert!(code.contains("    pub layout: ::core::option::Option<Layout>,"));
}

#[test]
fn removing_a_patched_attribute_fails_generation() {
    let schema_json: String = fixture_without("/frames/items/frames_entry/data");
    let error: PlotlySchemaGenError =
        generate_to_string(&schema_json, &GenerateSettings::default())
            .expect_err("frame data is gone");
    let PlotlySchemaGenError::UnknownWorkaroundTargetError {
        type_name,
        field_name,
        ..
    } = &error
    else {
        panic!("expected UnknownWorkaroundTargetError, got {error:?}");
    };
    assert_eq!(("Frame", "data"), (type_name.as_str(), field_name.as_str()));
    assert!(error.to_string().contains("`Frame.data`"), "{error}");
}

#[test]
fn disabled_workarounds_keep_frame_data_generic() {
    let schema_json: String = fixture_without("/frames/items/frames_entry/data");
    let settings: GenerateSettings = GenerateSettings {
        workarounds: WorkaroundSelection::Disabled,
        ..GenerateSettings::default()
    };
    let code: String = generate_to_string(&schema_json, &settings).expect("generate");
    assert!(code.contains("pub struct Frame {"));
    assert!(code.contains("    pub layout: ::core::option::Option<::plotly_schema_rs::runtime::Anything>,"));
}

#[test]
fn fixture_passes_strict_validation() {
    let document: serde_json::Value = serde_json::from_str(FIXTURE).expect("fixture is JSON");
    validate_schema(&document).expect("fixture is well formed");
}

#[test]
fn custom_runtime_path_is_used_everywhere() {
    let settings: GenerateSettings = GenerateSettings {
        runtime_path: "crate::plotly_runtime".to_string(),
        ..GenerateSettings::default()
    };
    let code: String = generate_to_string(FIXTURE, &settings).expect("generate");
    assert!(code.contains("impl crate::plotly_runtime::Trace for Scatter {"));
    assert!(!code.contains("::plotly_schema_rs::runtime"));
}

#[test]
fn stages_compose_like_the_pipeline() {
    let root = parse(FIXTURE, "Root").expect("parse");
    let mut registry: Registry = synthesize(&root).expect("synthesize");
    plotly_schema_rs::share_identical_enums(&mut registry);
    attach_encoding(&mut registry).expect("encode");
    plotly_schema_rs::validate_rules(&builtin_rules(), &root).expect("rules match");
    plotly_schema_rs::apply_workarounds(&mut registry, &builtin_rules()).expect("apply");

    let mut staged: Vec<u8> = Vec::new();
    emit(&registry, &GenerateSettings::default(), &mut staged).expect("emit");

    let mut piped: Vec<u8> = Vec::new();
    generate_to_writer(FIXTURE, &mut piped, &GenerateSettings::default()).expect("generate");
    assert_eq!(String::from_utf8(piped), String::from_utf8(staged));
}

#[test]
fn generate_from_file_writes_output() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
    let input: PathBuf = dir.path().join("plot-schema.json");
    let output: PathBuf = dir.path().join("plotly_types.rs");
    std::fs::write(&input, FIXTURE).expect("write input");

    generate_from_file(&input, &output, &GenerateSettings::default()).expect("generate");
    let written: String = std::fs::read_to_string(&output).expect("read output");
    let expected: String =
        generate_to_string(FIXTURE, &GenerateSettings::default()).expect("generate");
    assert_eq!(expected, written);
}

#[test]
fn failed_generation_creates_no_output_file() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
    let input: PathBuf = dir.path().join("broken.json");
    let output: PathBuf = dir.path().join("out.rs");
    std::fs::write(&input, r#"{"r": {"valType": "vector"}}"#).expect("write input");

    let error: PlotlySchemaGenError =
        generate_from_file(&input, &output, &GenerateSettings::default())
            .expect_err("unknown valType");
    assert!(
        matches!(error, PlotlySchemaGenError::SchemaParseError { ref path, .. } if path == "/r/valType"),
        "got {error:?}"
    );
    assert!(!output.exists());
}

#[test]
fn missing_input_file_is_an_io_error() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
    let error: PlotlySchemaGenError = generate_from_file(
        dir.path().join("absent.json"),
        dir.path().join("out.rs"),
        &GenerateSettings::default(),
    )
    .expect_err("no input");
    assert!(matches!(error, PlotlySchemaGenError::IoError(_)), "got {error:?}");
}
