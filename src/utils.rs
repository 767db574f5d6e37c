//! Small helpers shared by the compressor, the catalog and the session.

use crate::constants::PROGRESS_SPINNER_TEMPLATE;
use crate::logger;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress spinner with consistent styling.
///
/// Returns a hidden spinner in quiet mode so callers never need to branch.
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    if logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}

/// Format file size in human-readable format
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Human-readable size string (e.g., "1.2 MB", "512 B")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Percentage of bytes saved: `(1 - compressed / original) * 100`.
///
/// Negative when the output grew. Zero when the original is empty.
pub fn calculate_savings_percent(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}
