use crate::constants::{
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY, LIBDEFLATER_HIGH_LEVEL,
    LIBDEFLATER_LOW_LEVEL, MAX_QUALITY, MIN_QUALITY, OXIPNG_PRESET, ZOPFLI_ITERATIONS,
};
use crate::error::{PortfolioError, Result};
use crate::formats::OutputFormat;
use crate::utils::calculate_savings_percent;
use crate::verbose;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageReader};
use oxipng::{Deflaters, Options};
use std::fs;
use std::num::NonZeroU8;
use std::path::Path;

/// Resize and re-encode settings shared by every image in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionOptions {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
    pub format: OutputFormat,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            quality: DEFAULT_QUALITY,
            format: OutputFormat::Jpeg,
        }
    }
}

impl CompressionOptions {
    pub fn new(
        max_width: Option<u32>,
        max_height: Option<u32>,
        quality: Option<u8>,
        format: Option<OutputFormat>,
    ) -> Result<Self> {
        let options = Self {
            max_width: max_width.unwrap_or(DEFAULT_MAX_WIDTH),
            max_height: max_height.unwrap_or(DEFAULT_MAX_HEIGHT),
            quality: quality.unwrap_or(DEFAULT_QUALITY),
            format: format.unwrap_or_default(),
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.quality) {
            return Err(PortfolioError::InvalidQuality(self.quality));
        }
        if self.max_width == 0 || self.max_height == 0 {
            return Err(PortfolioError::InvalidDimensions(
                self.max_width,
                self.max_height,
            ));
        }
        Ok(())
    }
}

/// Outcome of compressing one image.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub original_size: u64,
    pub compressed_size: u64,
    /// Dimensions of the written image.
    pub width: u32,
    pub height: u32,
    pub resized: bool,
}

impl CompressionReport {
    pub fn savings_percent(&self) -> f64 {
        calculate_savings_percent(self.original_size, self.compressed_size)
    }
}

/// Validates that a file exists at the given path.
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PortfolioError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Target dimensions for an image that must fit inside `max_width` x `max_height`.
///
/// Images already inside the bounds keep their size. Larger ones are scaled by
/// the smaller of the two ratios so the aspect ratio is preserved: the bounding
/// side lands exactly on its limit and the other side is truncated.
pub fn fit_within_bounds(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let (w, h) = (u64::from(width), u64::from(height));
    let (max_w, max_h) = (u64::from(max_width), u64::from(max_height));

    // max_w / w <= max_h / h, cross-multiplied to stay in integers
    let (new_w, new_h) = if max_w * h <= max_h * w {
        (max_w, h * max_w / w)
    } else {
        (w * max_h / h, max_h)
    };

    (new_w.max(1) as u32, new_h.max(1) as u32)
}

/// Downscales `img` in place when it exceeds the configured bounds.
///
/// Returns whether a resize happened.
pub fn resize_to_fit(img: &mut DynamicImage, options: &CompressionOptions) -> bool {
    let (width, height) = img.dimensions();
    let (new_width, new_height) =
        fit_within_bounds(width, height, options.max_width, options.max_height);

    if (new_width, new_height) == (width, height) {
        return false;
    }

    verbose!(
        "Resizing {}x{} -> {}x{}",
        width,
        height,
        new_width,
        new_height
    );
    *img = img.resize_exact(new_width, new_height, FilterType::Lanczos3);
    true
}

/// Converts the pixel layout into one the target encoder accepts.
///
/// Palette and alpha images become plain RGB when the format has no alpha
/// channel; 16-bit and float layouts are narrowed to 8 bits.
pub fn normalize_color(img: DynamicImage, format: OutputFormat) -> DynamicImage {
    match (img.color(), format.supports_alpha()) {
        (ColorType::Rgb8, _) | (ColorType::L8, _) | (ColorType::Rgba8, true) => img,
        (color, true) if color.has_alpha() => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

/// Loads an image file and returns it along with its size on disk.
///
/// The decoder is chosen from the file contents, so a PNG saved with a
/// `.jpg` extension still decodes.
pub fn load_image_with_metadata(input_path: &Path) -> Result<(DynamicImage, u64)> {
    validate_file_exists(input_path)?;

    let file_size = fs::metadata(input_path)?.len();
    let img = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()?;

    Ok((img, file_size))
}

/// Encodes `img` in the requested format and returns the encoded bytes.
pub fn encode_image(img: &DynamicImage, options: &CompressionOptions) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();

    match options.format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buffer, options.quality);
            img.write_with_encoder(encoder)?;
        }
        OutputFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut buffer,
                CompressionType::Best,
                PngFilterType::Adaptive,
            );
            img.write_with_encoder(encoder)?;
            buffer = optimize_png(&buffer, options.quality)?;
        }
        OutputFormat::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut buffer);
            img.write_with_encoder(encoder)?;
        }
    }

    Ok(buffer)
}

/// Runs oxipng over an encoded PNG, trading time for size as quality rises.
fn optimize_png(png: &[u8], quality: u8) -> Result<Vec<u8>> {
    let mut oxipng_options = Options::from_preset(OXIPNG_PRESET);

    oxipng_options.deflate = if quality >= 90 {
        match NonZeroU8::new(ZOPFLI_ITERATIONS) {
            Some(iterations) => Deflaters::Zopfli { iterations },
            None => Deflaters::Libdeflater {
                compression: LIBDEFLATER_HIGH_LEVEL,
            },
        }
    } else if quality >= 70 {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    };

    verbose!("Optimizing PNG with {:?}", oxipng_options.deflate);
    oxipng::optimize_from_memory(png, &oxipng_options)
        .map_err(|e| PortfolioError::PngOptimization(e.to_string()))
}

/// Load -> resize -> normalize -> encode -> write.
///
/// The output directory is created if it does not exist yet.
pub fn compress_image(
    input_path: &Path,
    output_path: &Path,
    options: &CompressionOptions,
) -> Result<CompressionReport> {
    options.validate()?;

    let (mut img, original_size) = load_image_with_metadata(input_path)?;
    verbose!(
        "Loaded {:?}: {}x{} {:?}, {} bytes",
        input_path,
        img.width(),
        img.height(),
        img.color(),
        original_size
    );

    let resized = resize_to_fit(&mut img, options);
    let img = normalize_color(img, options.format);
    let encoded = encode_image(&img, options)?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|_| PortfolioError::DirectoryCreationFailed(parent.to_path_buf()))?;
    }
    fs::write(output_path, &encoded)?;

    let compressed_size = fs::metadata(output_path)?.len();
    verbose!(
        "Wrote {:?} as {} ({} bytes)",
        output_path,
        options.format,
        compressed_size
    );

    Ok(CompressionReport {
        original_size,
        compressed_size,
        width: img.width(),
        height: img.height(),
        resized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    #[test]
    fn test_compression_options_default() {
        let options = CompressionOptions::new(None, None, None, None).unwrap();
        assert_eq!(options, CompressionOptions::default());
        assert_eq!(options.max_width, 1920);
        assert_eq!(options.max_height, 1080);
        assert_eq!(options.quality, 85);
        assert_eq!(options.format, OutputFormat::Jpeg);
    }

    #[test]
    fn test_compression_options_invalid_quality() {
        let result = CompressionOptions::new(None, None, Some(0), None);
        assert!(matches!(result, Err(PortfolioError::InvalidQuality(0))));

        let result = CompressionOptions::new(None, None, Some(101), None);
        assert!(matches!(result, Err(PortfolioError::InvalidQuality(101))));
    }

    #[test]
    fn test_compression_options_zero_dimension() {
        let result = CompressionOptions::new(Some(0), Some(1080), None, None);
        assert!(matches!(
            result,
            Err(PortfolioError::InvalidDimensions(0, 1080))
        ));
    }

    #[test]
    fn test_fit_within_bounds_height_bound() {
        assert_eq!(fit_within_bounds(4000, 3000, 1920, 1080), (1440, 1080));
    }

    #[test]
    fn test_fit_within_bounds_width_bound() {
        assert_eq!(fit_within_bounds(3840, 1080, 1920, 1080), (1920, 540));
    }

    #[test]
    fn test_fit_within_bounds_already_inside() {
        assert_eq!(fit_within_bounds(800, 600, 1920, 1080), (800, 600));
        assert_eq!(fit_within_bounds(1920, 1080, 1920, 1080), (1920, 1080));
    }

    #[test]
    fn test_fit_within_bounds_never_collapses_to_zero() {
        assert_eq!(fit_within_bounds(10000, 1, 100, 100), (100, 1));
    }

    #[test]
    fn test_resize_to_fit_downscales() {
        let mut img = DynamicImage::new_rgb8(400, 300);
        let options = CompressionOptions::new(Some(192), Some(108), None, None).unwrap();

        assert!(resize_to_fit(&mut img, &options));
        assert_eq!(img.dimensions(), (144, 108));
    }

    #[test]
    fn test_resize_to_fit_keeps_small_image() {
        let options = CompressionOptions::new(Some(192), Some(108), None, None).unwrap();
        let mut small = DynamicImage::new_rgb8(100, 50);

        assert!(!resize_to_fit(&mut small, &options));
        assert_eq!(small.dimensions(), (100, 50));
    }

    #[test]
    fn test_normalize_color_drops_alpha_for_jpeg() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 128])));
        let normalized = normalize_color(img, OutputFormat::Jpeg);
        assert_eq!(normalized.color(), ColorType::Rgb8);
    }

    #[test]
    fn test_normalize_color_keeps_alpha_for_png() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 128])));
        let normalized = normalize_color(img, OutputFormat::Png);
        assert_eq!(normalized.color(), ColorType::Rgba8);
    }

    #[test]
    fn test_normalize_color_narrows_16_bit() {
        let img = DynamicImage::new_rgb16(4, 4);
        assert_eq!(
            normalize_color(img, OutputFormat::Jpeg).color(),
            ColorType::Rgb8
        );
    }

    #[test]
    fn test_load_image_with_metadata_not_found() {
        let result = load_image_with_metadata(Path::new("nonexistent.jpg"));
        assert!(matches!(result, Err(PortfolioError::FileNotFound(_))));
    }

    #[test]
    fn test_compress_image_png_to_jpeg() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("large.png");
        let output = temp_dir.path().join("out").join("large.jpg");
        gradient(400, 300).save(&input).unwrap();

        let options = CompressionOptions::new(Some(192), Some(108), Some(85), None).unwrap();
        let report = compress_image(&input, &output, &options).unwrap();

        assert!(report.resized);
        assert_eq!((report.width, report.height), (144, 108));
        assert_eq!(report.original_size, fs::metadata(&input).unwrap().len());
        assert_eq!(report.compressed_size, fs::metadata(&output).unwrap().len());

        let written = image::open(&output).unwrap();
        assert_eq!(written.dimensions(), (144, 108));
        let bytes = fs::read(&output).unwrap();
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_compress_image_rgba_source_to_jpeg() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("alpha.png");
        let output = temp_dir.path().join("alpha.jpg");
        RgbaImage::from_pixel(32, 16, Rgba([200, 100, 50, 10]))
            .save(&input)
            .unwrap();

        let report = compress_image(&input, &output, &CompressionOptions::default()).unwrap();

        assert!(!report.resized);
        assert_eq!(image::open(&output).unwrap().color(), ColorType::Rgb8);
    }

    #[test]
    fn test_compress_image_png_output_is_optimized_png() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("source.bmp");
        let output = temp_dir.path().join("source.png");
        gradient(64, 48).save(&input).unwrap();

        let options =
            CompressionOptions::new(None, None, Some(75), Some(OutputFormat::Png)).unwrap();
        let report = compress_image(&input, &output, &options).unwrap();

        let bytes = fs::read(&output).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
        assert_eq!((report.width, report.height), (64, 48));
    }

    #[test]
    fn test_compress_image_rejects_corrupt_input() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("broken.jpg");
        let output = temp_dir.path().join("broken_out.jpg");
        fs::write(&input, b"not really a jpeg").unwrap();

        let result = compress_image(&input, &output, &CompressionOptions::default());
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_report_savings_percent() {
        let report = CompressionReport {
            original_size: 2000,
            compressed_size: 500,
            width: 1,
            height: 1,
            resized: false,
        };
        assert!((report.savings_percent() - 75.0).abs() < 1e-9);
    }
}
