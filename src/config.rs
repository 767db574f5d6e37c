//! Run configuration.
//!
//! Built once in the binary (defaults overridden by CLI flags) and passed by
//! reference to everything that needs directories or compression settings.

use crate::catalog::Category;
use crate::cli::Args;
use crate::constants::{
    DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_SRC_DIR, METADATA_FILE_NAME,
};
use crate::error::{PortfolioError, Result};
use crate::formats::OutputFormat;
use crate::processing::CompressionOptions;
use std::fs;
use std::path::{Path, PathBuf};

/// Values offered as prompt defaults when collecting metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkDefaults {
    pub category: Category,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Original images, never modified
    pub src_dir: PathBuf,
    /// Compressed images
    pub output_dir: PathBuf,
    /// Holds the catalog file
    pub data_dir: PathBuf,
    pub compression: CompressionOptions,
    pub defaults: WorkDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from(DEFAULT_SRC_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            compression: CompressionOptions::default(),
            defaults: WorkDefaults::default(),
        }
    }
}

impl Config {
    /// Applies command-line overrides on top of the defaults.
    pub fn from_args(args: &Args) -> Result<Self> {
        let format = args.format.as_deref().map(str::parse::<OutputFormat>).transpose()?;
        let compression =
            CompressionOptions::new(args.max_width, args.max_height, args.quality, format)?;

        let defaults = Config::default();
        Ok(Self {
            src_dir: args.src_dir.clone().unwrap_or(defaults.src_dir),
            output_dir: args.output_dir.clone().unwrap_or(defaults.output_dir),
            data_dir: args.data_dir.clone().unwrap_or(defaults.data_dir),
            compression,
            defaults: defaults.defaults,
        })
    }

    /// Config rooted at `base`, using the default directory names under it.
    pub fn rooted_at(base: &Path) -> Self {
        let defaults = Config::default();
        Self {
            src_dir: base.join(&defaults.src_dir),
            output_dir: base.join(&defaults.output_dir),
            data_dir: base.join(&defaults.data_dir),
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.compression.validate()
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.data_dir.join(METADATA_FILE_NAME)
    }

    pub fn output_path(&self, output_filename: &str) -> PathBuf {
        self.output_dir.join(output_filename)
    }

    pub fn source_path(&self, source_filename: &str) -> PathBuf {
        self.src_dir.join(source_filename)
    }

    /// Creates the source, output and data directories if they are missing.
    pub fn prepare_directories(&self) -> Result<()> {
        for dir in [&self.src_dir, &self.output_dir, &self.data_dir] {
            fs::create_dir_all(dir)
                .map_err(|_| PortfolioError::DirectoryCreationFailed(dir.clone()))?;
        }
        Ok(())
    }
}
