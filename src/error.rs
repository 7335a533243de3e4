use std::path::PathBuf;

use pixel_quant::{PaletteError, QuantizeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Palette not found: {0}")]
    PaletteNotFound(String),

    #[error("Output {} is an existing file, expected a directory", .0.display())]
    InvalidOutputTarget(PathBuf),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to produce {}: {source}", path.display())]
    Transform {
        path: PathBuf,
        #[source]
        source: Box<PipelineError>,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Quantize error: {0}")]
    Quantize(#[from] QuantizeError),

    #[error("Palette store error: {0}")]
    PaletteStore(#[from] PaletteStoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Attach the output path of the artifact being produced.
    pub fn for_output(self, path: impl Into<PathBuf>) -> Self {
        PipelineError::Transform {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

#[derive(Debug, Error)]
pub enum PaletteStoreError {
    #[error("Failed to parse palette file {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid color in palette {palette}: {source}")]
    Color {
        palette: String,
        #[source]
        source: PaletteError,
    },

    #[error("Palette {0} has no colors")]
    Empty(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_pipeline_error_input_not_found() {
        let error = PipelineError::InputNotFound(PathBuf::from("missing.png"));
        assert_eq!(error.to_string(), "Input not found: missing.png");
    }

    #[test]
    fn test_pipeline_error_palette_not_found() {
        let error = PipelineError::PaletteNotFound("vga".to_string());
        assert_eq!(error.to_string(), "Palette not found: vga");
    }

    #[test]
    fn test_pipeline_error_invalid_output_target() {
        let error = PipelineError::InvalidOutputTarget(PathBuf::from("out.png"));
        assert_eq!(
            error.to_string(),
            "Output out.png is an existing file, expected a directory"
        );
    }

    #[test]
    fn test_pipeline_error_for_output_keeps_source() {
        let inner = PipelineError::Quantize(QuantizeError::EmptyImage);
        let error = inner.for_output("out/a_DNONE.png");

        assert_eq!(
            error.to_string(),
            "Failed to produce out/a_DNONE.png: Quantize error: image has no pixels"
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn test_pipeline_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: PipelineError = io.into();
        assert!(matches!(error, PipelineError::Io(_)));
    }

    #[test]
    fn test_palette_store_error_display() {
        let error = PaletteStoreError::Empty("blank".to_string());
        assert_eq!(error.to_string(), "Palette blank has no colors");

        let error = PaletteStoreError::Color {
            palette: "nes".to_string(),
            source: PaletteError::EmptyPalette,
        };
        assert_eq!(
            error.to_string(),
            "Invalid color in palette nes: palette cannot be empty"
        );
    }
}
