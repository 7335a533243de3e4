//! End-to-end tests of the single-image pipeline.

mod common;

use common::*;
use image::Rgb;
use pixel_quant::{resize_nearest, Palette};
use pixelart_colors::models::{DitherSelector, PaletteImage, ParameterAxes};
use pixelart_colors::services::{PipelineDriver, PipelineOptions};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn options(target_width: u32) -> PipelineOptions {
    PipelineOptions {
        target_width,
        ..PipelineOptions::default()
    }
}

fn two_color_palette(name: &str, a: [u8; 3], b: [u8; 3]) -> PaletteImage {
    PaletteImage::new(name, Palette::new(&[Rgb(a), Rgb(b)]).unwrap())
}

#[test]
fn test_readme_example_four_variants() {
    let ws = Workspace::new();
    let input = ws.write_image("img.png", &gradient_image(512, 512));
    let output = ws.path("out/img.png");

    let axes =
        ParameterAxes::new(vec![], vec![], DitherSelector::Both, vec![16, 32], vec![]).unwrap();
    let report = PipelineDriver::new(axes, options(128))
        .unwrap()
        .run(&input, &output)
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.outputs.len(), 4);
    assert_eq!(
        file_names(&ws.path("out")),
        vec![
            "img_DFLOYDSTEINBERG_16.png",
            "img_DFLOYDSTEINBERG_32.png",
            "img_DNONE_16.png",
            "img_DNONE_32.png",
        ]
    );
    for out in &report.outputs {
        assert_image_size(&out.path, 512, 512);
        assert!(color_count(&load_rgb(&out.path)) <= out.variant.color_count);
    }
}

#[test]
fn test_cartesian_completeness_and_unique_names() {
    let ws = Workspace::new();
    let input = ws.write_image("in.png", &noise_image(16, 16, 9));
    let output = ws.path("out/in.png");

    let axes = ParameterAxes::new(
        vec![0.5, 1.5],
        vec![0.0, 2.0],
        DitherSelector::Both,
        vec![0, 4],
        vec![
            two_color_palette("bw", [0, 0, 0], [255, 255, 255]),
            two_color_palette("rg", [255, 0, 0], [0, 255, 0]),
        ],
    )
    .unwrap();
    assert_eq!(axes.product_len(), 32);

    let report = PipelineDriver::new(axes, options(8))
        .unwrap()
        .run(&input, &output)
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.outputs.len(), 32);
    let unique: HashSet<_> = report.outputs.iter().map(|o| o.path.clone()).collect();
    assert_eq!(unique.len(), 32);
    assert_eq!(file_names(&ws.path("out")).len(), 32);
    assert!(ws
        .path("out/in_C0.5_S2.0_DFLOYDSTEINBERG_Prg_4.png")
        .exists());
    assert!(ws.path("out/in_C1.5_S0.0_DNONE_Pbw_2.png").exists());
}

#[test]
fn test_defaults_write_single_dither_tagged_file() {
    let ws = Workspace::new();
    let input = ws.write_image("photo.png", &gradient_image(40, 30));

    let report = PipelineDriver::new(ParameterAxes::default(), options(20))
        .unwrap()
        .run(&input, &ws.path("photo_out.png"))
        .unwrap();

    assert_eq!(report.outputs.len(), 1);
    assert_eq!(report.outputs[0].path, ws.path("photo_out_DNONE.png"));
}

#[test]
fn test_defaults_are_downscale_quantize_upscale() {
    let ws = Workspace::new();
    let source = blocky_image(8, 6, 8, 21);
    let input = ws.write_image("blocks.png", &source);

    let report = PipelineDriver::new(ParameterAxes::default(), options(16))
        .unwrap()
        .run(&input, &ws.path("blocks_out.png"))
        .unwrap();

    // 48 colors fit the adaptive palette, so quantization is lossless
    let expected = resize_nearest(&resize_nearest(&source, 16, 12), 64, 48);
    assert_eq!(load_rgb(&report.outputs[0].path), expected);
}

#[test]
fn test_round_trip_size_with_uneven_scale() {
    let ws = Workspace::new();
    let input = ws.write_image("odd.png", &noise_image(300, 202, 4));

    let axes =
        ParameterAxes::new(vec![1.2], vec![], DitherSelector::Floyd, vec![8], vec![]).unwrap();
    let report = PipelineDriver::new(
        axes,
        PipelineOptions {
            target_width: 128,
            save_downscaled: true,
            ..PipelineOptions::default()
        },
    )
    .unwrap()
    .run(&input, &ws.path("odd_out.png"))
    .unwrap();

    let out = &report.outputs[0];
    assert_eq!(out.path, ws.path("odd_out_C1.2_DFLOYDSTEINBERG_8.png"));
    assert_image_size(&out.path, 300, 202);
    // round(202 * 128 / 300) = 86
    assert_image_size(out.downscaled_path.as_ref().unwrap(), 128, 86);
}

#[test]
fn test_auto_detect_overrides_width() {
    let ws = Workspace::new();
    let input = ws.write_image("sprite.png", &blocky_image(16, 12, 4, 8));

    let report = PipelineDriver::new(
        ParameterAxes::default(),
        PipelineOptions {
            target_width: 256,
            auto_detect: true,
            save_downscaled: true,
        },
    )
    .unwrap()
    .run(&input, &ws.path("sprite_out.png"))
    .unwrap();

    let out = &report.outputs[0];
    assert_image_size(out.downscaled_path.as_ref().unwrap(), 16, 12);
    assert_eq!(load_rgb(&out.path), load_rgb(&input));
}

#[test]
fn test_palette_variant_only_uses_palette_colors() {
    let ws = Workspace::new();
    let input = ws.write_image("in.png", &gradient_image(32, 32));
    let palette = two_color_palette("duo", [10, 20, 30], [240, 230, 220]);

    let axes = ParameterAxes::new(
        vec![],
        vec![],
        DitherSelector::Floyd,
        vec![],
        vec![palette.clone()],
    )
    .unwrap();
    let report = PipelineDriver::new(axes, options(16))
        .unwrap()
        .run(&input, &ws.path("in_out.png"))
        .unwrap();

    let out = &report.outputs[0];
    assert_eq!(out.path, ws.path("in_out_DFLOYDSTEINBERG_Pduo_2.png"));
    assert_eq!(out.effective_colors, 2);
    let allowed: HashSet<[u8; 3]> = palette.palette.colors().iter().map(|c| c.0).collect();
    assert!(load_rgb(&out.path).pixels().all(|p| allowed.contains(&p.0)));
}
