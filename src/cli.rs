use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-prep",
    about = "Compress portfolio images and maintain their JSON catalog",
    long_about = "portfolio-prep scans a source directory for images, downsizes and re-encodes them \
                  into an output directory, and records title, category, description and price for \
                  each work in a JSON catalog. All flags are optional; the workflow itself is \
                  interactive.",
    version,
    after_help = "EXAMPLES:\n  \
    portfolio-prep\n  \
    portfolio-prep --src-dir ./raw --output-dir ./site/images --data-dir ./site/data\n  \
    portfolio-prep -w 2560 -H 1440 -q 90"
)]
pub struct Args {
    #[arg(long, help = "Directory holding the original images (default: ./src)")]
    pub src_dir: Option<PathBuf>,

    #[arg(long, help = "Directory compressed images are written to (default: ./images)")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "Directory holding works.json (default: ./data)")]
    pub data_dir: Option<PathBuf>,

    #[arg(
        short = 'w',
        long,
        help = "Maximum width in pixels (default: 1920)",
        long_help = "Images wider than this are scaled down, preserving aspect ratio."
    )]
    pub max_width: Option<u32>,

    #[arg(
        short = 'H',
        long,
        help = "Maximum height in pixels (default: 1080)",
        long_help = "Images taller than this are scaled down, preserving aspect ratio."
    )]
    pub max_height: Option<u32>,

    #[arg(
        short = 'q',
        long,
        help = "Output quality (1-100, default: 85)",
        long_help = "JPEG quality from 1 (lowest) to 100 (highest). \
                     For PNG: >=90 uses Zopfli, >=70 uses high compression, <70 uses standard compression. \
                     WebP output is lossless and ignores this value."
    )]
    pub quality: Option<u8>,

    #[arg(
        short = 'f',
        long,
        help = "Output format (jpeg, png, webp; default: jpeg)"
    )]
    pub format: Option<String>,

    #[arg(short = 'v', long, help = "Print diagnostic details to stderr")]
    pub verbose: bool,

    #[arg(long, help = "Suppress diagnostics and progress spinners")]
    pub quiet: bool,
}
