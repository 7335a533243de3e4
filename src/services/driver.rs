use crate::error::PipelineError;
use crate::models::ParameterAxes;
use crate::services::batch::BatchExpander;
use crate::services::palette_tools::has_extension;
use crate::services::pixel_size::PixelSizeDetector;
use crate::services::transformer::{VariantOutput, VariantTransformer};
use pixel_quant::resize_nearest;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Input file extensions picked up from directories.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Per-run options that are not parameter axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Width the source is downscaled to before processing
    pub target_width: u32,
    /// Derive the target width from the detected pixel size
    pub auto_detect: bool,
    /// Also save each variant at downscaled resolution
    pub save_downscaled: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            target_width: 256,
            auto_detect: false,
            save_downscaled: false,
        }
    }
}

/// Outcome of a run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Input files attempted
    pub files: usize,
    /// Variants written
    pub outputs: Vec<VariantOutput>,
    /// Failed files or variants, keyed by input file
    pub failures: Vec<(PathBuf, PipelineError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Per-image orchestration and directory iteration
#[derive(Debug, Clone)]
pub struct PipelineDriver {
    axes: ParameterAxes,
    options: PipelineOptions,
    detector: PixelSizeDetector,
}

impl PipelineDriver {
    pub fn new(axes: ParameterAxes, options: PipelineOptions) -> Result<Self, PipelineError> {
        if options.target_width == 0 {
            return Err(PipelineError::InvalidParameter(
                "target width must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            axes,
            options,
            detector: PixelSizeDetector::default(),
        })
    }

    pub fn axes(&self) -> &ParameterAxes {
        &self.axes
    }

    /// Process a file or a directory tree.
    ///
    /// Path problems are returned as errors before anything is written.
    /// Failures of individual files and variants are collected in the
    /// report and do not stop the run.
    pub fn run(&self, input: &Path, output: &Path) -> Result<BatchReport, PipelineError> {
        if !input.exists() {
            return Err(PipelineError::InputNotFound(input.to_path_buf()));
        }

        if input.is_dir() {
            self.run_directory(input, output)
        } else {
            let target = if output.is_dir() {
                match input.file_name() {
                    Some(name) => output.join(name),
                    None => return Err(PipelineError::InputNotFound(input.to_path_buf())),
                }
            } else {
                output.to_path_buf()
            };

            let mut report = BatchReport {
                files: 1,
                ..BatchReport::default()
            };
            self.collect(input, &target, &mut report)?;
            Ok(report)
        }
    }

    fn run_directory(&self, input: &Path, output: &Path) -> Result<BatchReport, PipelineError> {
        if output.is_file() {
            return Err(PipelineError::InvalidOutputTarget(output.to_path_buf()));
        }
        fs::create_dir_all(output)?;

        let files = find_images(input);
        let mut report = BatchReport::default();
        if files.is_empty() {
            tracing::warn!(dir = %input.display(), "No image files found in directory");
            return Ok(report);
        }

        tracing::info!(count = files.len(), dir = %input.display(), "Processing directory");
        for file in files {
            report.files += 1;
            let relative = file.strip_prefix(input).unwrap_or(&file);
            let target = output.join(relative);
            if let Err(e) = self.collect(&file, &target, &mut report) {
                tracing::warn!(%e, file = %file.display(), "Failed to process image");
                report.failures.push((file.clone(), e));
            }
        }

        tracing::info!(
            files = report.files,
            outputs = report.outputs.len(),
            failures = report.failures.len(),
            "Directory processed"
        );
        Ok(report)
    }

    /// Process one file into `report`; file-level errors are returned.
    fn collect(
        &self,
        input: &Path,
        output: &Path,
        report: &mut BatchReport,
    ) -> Result<(), PipelineError> {
        for result in self.process_file(input, output)? {
            match result {
                Ok(out) => report.outputs.push(out),
                Err(e) => report.failures.push((input.to_path_buf(), e)),
            }
        }
        Ok(())
    }

    /// Load, optionally detect pixel size, downscale once and expand all
    /// variants for a single image.
    pub fn process_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<Vec<Result<VariantOutput, PipelineError>>, PipelineError> {
        if !input.is_file() {
            return Err(PipelineError::InputNotFound(input.to_path_buf()));
        }
        tracing::info!(file = %input.display(), "Processing image");

        let source = image::open(input)?.to_rgb8();
        let (width, height) = source.dimensions();
        if width == 0 || height == 0 {
            return Err(pixel_quant::QuantizeError::EmptyImage.into());
        }

        let mut target_width = self.options.target_width;
        if self.options.auto_detect {
            let size = self.detector.detect(&source);
            if size > 1 {
                target_width = width / size;
                tracing::info!(pixel_size = size, target_width, "Auto-detected pixel size");
            }
        }

        let target_height = downscaled_height(width, height, target_width);
        let base = resize_nearest(&source, target_width, target_height);
        tracing::debug!(width, height, target_width, target_height, "Downscaled");

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let expander =
            BatchExpander::new(&self.axes, VariantTransformer::new(self.options.save_downscaled));
        Ok(expander.expand(&base, output, (width, height)))
    }
}

/// `round(height * target_width / width)`, at least 1.
pub fn downscaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (height as f64 * target_width as f64 / width as f64).round();
    (scaled as u32).max(1)
}

/// Image files under `dir`, recursively, sorted by path.
pub fn find_images(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_extension(p, IMAGE_EXTENSIONS))
        .collect()
}
