//! Directory batches and path validation.

mod common;

use common::*;
use pixelart_colors::error::PipelineError;
use pixelart_colors::models::{DitherSelector, ParameterAxes};
use pixelart_colors::services::{PipelineDriver, PipelineOptions};
use pretty_assertions::assert_eq;
use std::fs;

fn driver() -> PipelineDriver {
    PipelineDriver::new(
        ParameterAxes::default(),
        PipelineOptions {
            target_width: 8,
            ..PipelineOptions::default()
        },
    )
    .unwrap()
}

#[test]
fn test_directory_mirrors_relative_paths() {
    let ws = Workspace::new();
    ws.write_image("in/a.png", &gradient_image(16, 16));
    ws.write_image("in/sub/b.jpg", &gradient_image(24, 12));
    ws.write_image("in/sub/deeper/C.PNG", &gradient_image(16, 8));
    fs::write(ws.path("in/readme.txt"), "not an image").unwrap();

    let report = driver().run(&ws.path("in"), &ws.path("out")).unwrap();

    assert!(report.is_success());
    assert_eq!(report.files, 3);
    assert_eq!(file_names(&ws.path("out")), vec!["a_DNONE.png"]);
    assert_eq!(file_names(&ws.path("out/sub")), vec!["b_DNONE.jpg"]);
    assert_eq!(file_names(&ws.path("out/sub/deeper")), vec!["C_DNONE.PNG"]);
    assert_image_size(&ws.path("out/sub/b_DNONE.jpg"), 24, 12);
}

#[test]
fn test_failed_file_does_not_stop_batch() {
    let ws = Workspace::new();
    ws.write_image("in/good.png", &gradient_image(16, 16));
    fs::write(ws.path("in/broken.png"), b"definitely not a png").unwrap();
    ws.write_image("in/zz.png", &gradient_image(16, 16));

    let axes =
        ParameterAxes::new(vec![], vec![], DitherSelector::Both, vec![], vec![]).unwrap();
    let report = PipelineDriver::new(
        axes,
        PipelineOptions {
            target_width: 8,
            ..PipelineOptions::default()
        },
    )
    .unwrap()
    .run(&ws.path("in"), &ws.path("out"))
    .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.files, 3);
    assert_eq!(report.outputs.len(), 4);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, ws.path("in/broken.png"));
    assert!(matches!(report.failures[0].1, PipelineError::Image(_)));
    assert!(ws.path("out/zz_DNONE.png").exists());
}

#[test]
fn test_empty_directory_succeeds_with_nothing() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.path("in/nested")).unwrap();

    let report = driver().run(&ws.path("in"), &ws.path("out")).unwrap();

    assert!(report.is_success());
    assert_eq!(report.files, 0);
    assert!(report.outputs.is_empty());
    assert!(ws.path("out").is_dir());
}

#[test]
fn test_directory_into_existing_file_is_rejected() {
    let ws = Workspace::new();
    ws.write_image("in/a.png", &gradient_image(8, 8));
    fs::write(ws.path("out.png"), b"existing").unwrap();

    let err = driver().run(&ws.path("in"), &ws.path("out.png")).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidOutputTarget(p) if p == ws.path("out.png")));
}

#[test]
fn test_missing_input() {
    let ws = Workspace::new();
    let err = driver()
        .run(&ws.path("nope.png"), &ws.path("out.png"))
        .unwrap_err();
    assert!(matches!(err, PipelineError::InputNotFound(_)));
}

#[test]
fn test_single_file_into_existing_directory() {
    let ws = Workspace::new();
    let input = ws.write_image("cat.png", &gradient_image(16, 16));
    fs::create_dir(ws.path("results")).unwrap();

    let report = driver().run(&input, &ws.path("results")).unwrap();

    assert_eq!(report.outputs[0].path, ws.path("results/cat_DNONE.png"));
    assert_image_size(&report.outputs[0].path, 16, 16);
}

#[test]
fn test_single_broken_file_is_an_error() {
    let ws = Workspace::new();
    fs::write(ws.path("broken.png"), b"nope").unwrap();

    let err = driver()
        .run(&ws.path("broken.png"), &ws.path("out.png"))
        .unwrap_err();
    assert!(matches!(err, PipelineError::Image(_)));
}
