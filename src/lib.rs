pub mod catalog;
pub mod cli;
pub mod collector;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod formats;
pub mod logger;
pub mod processing;
pub mod scanner;
pub mod session;
pub mod utils;

pub use catalog::{Catalog, Category, Work};
pub use collector::{batch_works, parse_price, prompt_batch_defaults, prompt_work_info, BatchDefaults};
pub use config::{Config, WorkDefaults};
pub use console::{Console, TextConsole};
pub use error::{PortfolioError, Result};
pub use formats::OutputFormat;
pub use processing::{compress_image, fit_within_bounds, resize_to_fit, CompressionOptions, CompressionReport};
pub use scanner::{is_image_file, output_filename, scan_source_dir};
pub use session::{Mode, RunSummary, Session};
