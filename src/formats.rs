//! Output image formats the compressor can write.
//!
//! Source images may be any format the scanner accepts; everything is
//! re-encoded into one of these.

use crate::error::{PortfolioError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Lossy, quality-driven. No alpha channel.
    #[default]
    Jpeg,
    /// Lossless, optimized with oxipng.
    Png,
    /// Lossless WebP.
    WebP,
}

impl OutputFormat {
    /// File extension (without the dot) used for output filenames.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    pub fn supports_alpha(&self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }

    /// Format names for CLI help text
    pub fn format_names() -> Vec<&'static str> {
        vec!["jpeg", "png", "webp"]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::WebP => "WebP",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            _ => Err(PortfolioError::UnsupportedFormat(format!(
                "{} (expected one of: {})",
                s,
                OutputFormat::format_names().join(", ")
            ))),
        }
    }
}
