//! Smoke test for image loading
//!
//! Decodes one image and shows it in the terminal as a character-ramp
//! preview. Exits with status 2 when the image cannot be decoded.

use clap::Parser;
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status reserved for decode failures
const DECODE_FAILURE: u8 = 2;

/// Characters from darkest to lightest
const RAMP: &[u8] = b"@%#*+=-:. ";

#[derive(Parser, Debug)]
#[command(name = "viewer")]
#[command(about = "Load an image and preview it in the terminal")]
#[command(version)]
struct Args {
    /// Image to display
    #[arg(default_value = "teste.png")]
    path: PathBuf,

    /// Preview width in terminal columns
    #[arg(long, default_value = "80")]
    width: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let image = match image::open(&args.path) {
        Ok(image) => image,
        Err(e) => {
            tracing::error!("Failed to load image {}: {}", args.path.display(), e);
            return ExitCode::from(DECODE_FAILURE);
        }
    };

    let (width, height) = image.dimensions();
    tracing::info!(
        "Image loaded: {} ({}x{}, {:?})",
        args.path.display(),
        width,
        height,
        image.color()
    );

    let preview = render_preview(&image, args.width);
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(preview.as_bytes()).and_then(|_| stdout.flush()) {
        tracing::error!("Failed to write preview: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Downscale to `columns` characters wide, halving rows to account for
/// terminal cells being about twice as tall as they are wide
fn render_preview(image: &DynamicImage, columns: u32) -> String {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return String::new();
    }

    let columns = columns.clamp(1, width);
    let rows = ((height as f32 * columns as f32 / width as f32) / 2.0)
        .round()
        .max(1.0) as u32;
    let small = image.resize_exact(columns, rows, FilterType::Triangle).to_luma8();

    let mut out = String::with_capacity(((columns + 1) * rows) as usize);
    for row in small.rows() {
        for pixel in row {
            let index = (pixel.0[0] as usize * (RAMP.len() - 1) + 127) / 255;
            out.push(RAMP[index] as char);
        }
        out.push('\n');
    }
    out
}
