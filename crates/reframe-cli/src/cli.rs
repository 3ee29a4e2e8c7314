//! Command-line interface implementation
//!
//! Parses the ten positional parameters, sets up logging and maps the
//! pipeline result to an exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use reframe_core::encode::DEFAULT_JPEG_QUALITY;
use reframe_core::{process_file, EncodeOptions, TransformRequest};
use tracing_subscriber::EnvFilter;

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "reframe=info,reframe_core=info";

/// Apply crop, rotation, flip and resize to a single image
#[derive(Parser, Debug)]
#[command(name = "reframe")]
#[command(version)]
#[command(after_help = "Numeric values of 0 (or less) leave the corresponding step out.")]
pub struct Args {
    /// Image to read
    pub input: PathBuf,

    /// Where to write the result; the extension selects the format
    pub output: PathBuf,

    /// Output width in pixels
    #[arg(allow_negative_numbers = true)]
    pub width: i64,

    /// Output height in pixels
    #[arg(allow_negative_numbers = true)]
    pub height: i64,

    /// Rotation in degrees, positive is counter-clockwise
    #[arg(allow_negative_numbers = true)]
    pub rotation: i32,

    /// horizontal, vertical or both; anything else disables flipping
    pub flip: String,

    /// Top edge of the crop region
    #[arg(allow_negative_numbers = true)]
    pub crop_top: i64,

    /// Left edge of the crop region
    #[arg(allow_negative_numbers = true)]
    pub crop_left: i64,

    /// Width of the crop region
    #[arg(allow_negative_numbers = true)]
    pub crop_width: i64,

    /// Height of the crop region
    #[arg(allow_negative_numbers = true)]
    pub crop_height: i64,

    /// JPEG quality for .jpg/.jpeg output (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,
}

impl Args {
    /// The transform request described by the positional parameters.
    pub fn request(&self) -> TransformRequest {
        TransformRequest::from_raw(
            self.width,
            self.height,
            self.rotation,
            &self.flip,
            self.crop_top,
            self.crop_left,
            self.crop_width,
            self.crop_height,
        )
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            jpeg_quality: self.quality,
        }
    }
}

/// Parse arguments, run the pipeline and report the outcome.
pub fn run() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version are not failures
            let code = if err.use_stderr() {
                EXIT_ERROR
            } else {
                EXIT_SUCCESS
            };
            err.print().ok();
            return ExitCode::from(code);
        }
    };

    init_tracing();
    ExitCode::from(execute(&args))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(args: &Args) -> u8 {
    let request = args.request();
    tracing::debug!("Request: {:?}", request);

    match process_file(&args.input, &args.output, &request, &args.encode_options()) {
        Ok(report) => {
            tracing::info!(
                "Done: {}x{} -> {}x{}",
                report.original.0,
                report.original.1,
                report.output.0,
                report.output.1
            );
            EXIT_SUCCESS
        }
        Err(err) => {
            tracing::error!("{}", err);
            EXIT_ERROR
        }
    }
}
