pub const DEFAULT_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_MAX_WIDTH: u32 = 1920;
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;

pub const DEFAULT_SRC_DIR: &str = "src";
pub const DEFAULT_OUTPUT_DIR: &str = "images";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const METADATA_FILE_NAME: &str = "works.json";

/// Source extensions picked up by the scanner, compared lowercase.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

pub const OXIPNG_PRESET: u8 = 4;
pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;

/// How many already-cataloged files are listed before collapsing the rest.
pub const EXISTING_PREVIEW_LIMIT: usize = 5;

pub const HEADER_WIDTH: usize = 60;
pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

// Console message prefixes
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️ ";
pub const ERROR_PREFIX: &str = "❌";
pub const INFO_PREFIX: &str = "ℹ️ ";
pub const IMAGE_PREFIX: &str = "📸";
