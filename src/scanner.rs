use crate::constants::SUPPORTED_IMAGE_EXTENSIONS;
use crate::error::{PortfolioError, Result};
use crate::formats::OutputFormat;
use crate::verbose;
use std::ffi::OsStr;
use std::path::Path;
use walkdir::WalkDir;

/// Lists the image files directly inside `dir`, sorted by name.
///
/// Subdirectories are not descended into and hidden entries are skipped.
pub fn scan_source_dir(dir: &Path) -> Result<Vec<String>> {
    let mut filenames = Vec::new();

    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).into_iter();
    // The root itself may be hidden (temp dirs often are), so only filter children.
    for entry in walker.filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name())) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_image_file(entry.path()) {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => filenames.push(name.to_string()),
            None => verbose!("Skipping non UTF-8 file name {:?}", entry.path()),
        }
    }

    filenames.sort();
    Ok(filenames)
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Name of the compressed file for `source`: its stem plus the output extension.
pub fn output_filename(source: &str, format: OutputFormat) -> Result<String> {
    let stem = Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PortfolioError::InvalidFileName(source.into()))?;

    Ok(format!("{}.{}", stem, format.extension()))
}

/// Title offered by default for a source file: its name without the extension.
pub fn default_title(source: &str) -> String {
    Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source)
        .to_string()
}
