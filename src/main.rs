use clap::{Parser, Subcommand};
use image::Rgb;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixelart_colors::assets::{PaletteAssets, PALETTES_DIR_ENV};
use pixelart_colors::models::{DitherSelector, PaletteCollection, PaletteSource, ParameterAxes};
use pixelart_colors::services::{
    extract_palette, palette_swatch, resolve_palettes, PipelineDriver, PipelineOptions,
};

#[derive(Parser)]
#[command(name = "pixelart-colors")]
#[command(version)]
#[command(about = "Transform images with retro color palettes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Downscale, enhance, quantize and upscale images over every option combination
    Process {
        /// Image file or directory
        input: PathBuf,

        /// Output file or directory
        output: PathBuf,

        /// Target width for downscaling
        #[arg(short, long, default_value_t = 256)]
        width: u32,

        /// Palette name, palette image, or directory of palette images (repeatable)
        #[arg(short, long)]
        palette: Vec<String>,

        /// Force quantization to a color count (repeatable)
        #[arg(short, long)]
        colors: Vec<usize>,

        /// Contrast factor, 1.0 = unchanged (repeatable)
        #[arg(long)]
        contrast: Vec<f32>,

        /// Saturation factor, 1.0 = unchanged (repeatable)
        #[arg(short, long)]
        saturation: Vec<f32>,

        /// Dithering: none, floyd or both (or 0, 1, 2)
        #[arg(short, long, default_value = "none")]
        dither: DitherSelector,

        /// Detect the pixel-art cell size and downscale to it
        #[arg(short, long)]
        auto_detect: bool,

        /// Also save each result at downscaled resolution
        #[arg(long)]
        save_downscaled: bool,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },
    /// List available palettes
    Palettes,
    /// Show the colors of a palette
    ShowPalette {
        /// Palette name
        name: String,

        /// Save the palette as a swatch image
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract a color palette from an image
    ExtractPalette {
        /// Image file
        input: PathBuf,

        /// Number of colors to extract
        #[arg(short, long, default_value_t = 16)]
        colors: usize,

        /// Save the extracted palette as a swatch image
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract embedded palette files to PALETTES_DIR (or ./palettes)
    Init {
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded palette files without extracting
        #[arg(long)]
        list: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Process {
            input,
            output,
            width,
            palette,
            colors,
            contrast,
            saturation,
            dither,
            auto_detect,
            save_downscaled,
            verbose,
        }) => {
            init_logging(verbose);
            let options = PipelineOptions {
                target_width: width,
                auto_detect,
                save_downscaled,
            };
            run_process_command(
                &input, &output, options, &palette, colors, contrast, saturation, dither,
            )
        }
        Some(Commands::Palettes) => {
            init_logging(false);
            run_palettes_command();
            Ok(())
        }
        Some(Commands::ShowPalette { name, output }) => {
            init_logging(false);
            run_show_palette_command(&name, output.as_deref())
        }
        Some(Commands::ExtractPalette {
            input,
            colors,
            output,
        }) => {
            init_logging(false);
            run_extract_palette_command(&input, colors, output.as_deref())
        }
        Some(Commands::Init { force, list }) => {
            init_logging(false);
            run_init_command(force, list)
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "pixelart_colors=debug"
    } else {
        "pixelart_colors=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_palettes() -> PaletteCollection {
    PaletteCollection::load_from_assets(&PaletteAssets::from_env())
}

#[allow(clippy::too_many_arguments)]
fn run_process_command(
    input: &Path,
    output: &Path,
    options: PipelineOptions,
    palette_ids: &[String],
    colors: Vec<usize>,
    contrasts: Vec<f32>,
    saturations: Vec<f32>,
    dither: DitherSelector,
) -> anyhow::Result<()> {
    let collection = load_palettes();
    let palettes = resolve_palettes(palette_ids, &collection)?;
    let axes = ParameterAxes::new(contrasts, saturations, dither, colors, palettes)?;
    let driver = PipelineDriver::new(axes, options)?;

    tracing::info!(
        variants = driver.axes().product_len(),
        dither = %dither,
        "Starting"
    );
    let report = driver.run(input, output)?;

    for out in &report.outputs {
        println!("  + {}", out.path.display());
        if let Some(ref small) = out.downscaled_path {
            println!("  + {}", small.display());
        }
    }
    for (file, e) in &report.failures {
        eprintln!("  ! {}: {e}", file.display());
    }
    println!(
        "\nProcessed {} file(s), wrote {} variant(s)",
        report.files,
        report.outputs.len()
    );

    if !report.is_success() {
        anyhow::bail!("{} failure(s) during processing", report.failures.len());
    }
    Ok(())
}

fn run_palettes_command() {
    let collection = load_palettes();
    let names = collection.list_names();
    let width = names.iter().map(String::len).max().unwrap_or(0).max(4);

    println!("{:<width$}  {:>6}  Description", "Name", "Colors");
    for name in names {
        let count = collection
            .get_info(&name)
            .map(|info| info.color_count())
            .unwrap_or(0);
        let description = collection.get_description(&name).unwrap_or_default();
        println!("{name:<width$}  {count:>6}  {description}");
    }
}

fn run_show_palette_command(name: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let collection = load_palettes();
    if !collection.contains(name) {
        eprintln!("Palette '{name}' not found");
        eprintln!("Use 'pixelart-colors palettes' to see available palettes");
        std::process::exit(1);
    }

    let palette = collection.get_image(name)?;
    let description = collection.get_description(name).unwrap_or_default();
    println!("\n{} - {description}", palette.name.to_uppercase());
    println!("Colors: {}\n", palette.color_count());
    print_colors(palette.palette.colors());

    if let Some(path) = output {
        palette_swatch(palette.palette.colors()).save(path)?;
        println!("\nPalette saved to: {}", path.display());
    }
    Ok(())
}

fn run_extract_palette_command(
    input: &Path,
    colors: usize,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let image = image::open(input)?.to_rgb8();
    let palette = extract_palette(&image, colors)?;

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("\nExtracted palette from {file_name}");
    println!("Colors: {}\n", palette.len());
    print_colors(palette.colors());

    if let Some(path) = output {
        palette_swatch(palette.colors()).save(path)?;
        println!("\nPalette saved to: {}", path.display());
    }
    Ok(())
}

fn print_colors(colors: &[Rgb<u8>]) {
    for row in colors.chunks(8) {
        let hex: Vec<String> = row.iter().map(|&c| pixel_quant::rgb_to_hex(c)).collect();
        println!("{}", hex.join(" "));
    }
}

fn run_init_command(force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded palettes:\n");
        for f in PaletteAssets::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let report = PaletteAssets::from_env().init(force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Welcome text and palette store status
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let assets = PaletteAssets::from_env();

    println!("PixelArt Colors v{VERSION}");
    println!("Transform your images with retro color palettes\n");

    println!("Environment Variables:");
    match assets.palettes_dir() {
        Some(dir) => println!("  {PALETTES_DIR_ENV} = {}", dir.display()),
        None => println!("  {PALETTES_DIR_ENV} = (not set)"),
    }

    let collection = PaletteCollection::load_from_assets(&assets);
    println!("\nPalettes: {} available", collection.len());

    println!("\nCommands:");
    println!("  process          Transform an image or directory");
    println!("  palettes         List available palettes");
    println!("  show-palette     Show the colors of a palette");
    println!("  extract-palette  Extract a palette from an image");
    println!("  init             Extract embedded palettes for customization");
    println!("\nUse --help to see all options.");
}
