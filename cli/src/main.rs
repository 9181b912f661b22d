#![allow(dead_code)]

use clap::{Parser, Subcommand};
use std::error;
use std::error::Error;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const SUPPORTED_INPUT_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "bmp"];

#[derive(Debug)]
enum CliError {
    UnsupportedInputExtension { extension: String },
    LossyOutputExtension { extension: String },
}

impl error::Error for CliError {}
impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnsupportedInputExtension { extension } => {
                write!(f, "unsupported input extension {:?}", extension)
            }
            Self::LossyOutputExtension { extension } => write!(
                f,
                "refusing to write a lossy .{} output: it would destroy the watermark just embedded",
                extension
            ),
        }
    }
}

/// Hides and recovers short text messages inside raster images via a
/// DCT-domain watermark protected by Reed-Solomon and bit repetition.
#[derive(Parser)]
#[command(name = "stegotool")]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Hide a plaintext message inside an image.
    Encode {
        input: PathBuf,
        plaintext: String,
        output: PathBuf,
        /// Shared reference text; must be byte-identical to the one passed to `decode`.
        #[arg(long)]
        source: PathBuf,
    },
    /// Recover a message previously hidden with `encode`.
    Decode {
        input: PathBuf,
        /// Shared reference text; must be byte-identical to the one passed to `encode`.
        #[arg(long)]
        source: PathBuf,
    },
}

fn extension_of(path: &Path) -> String {
    path.extension().and_then(OsStr::to_str).unwrap_or("").to_lowercase()
}

fn load_rgb_image(path: &Path) -> Result<pipeline::RgbImage, Box<dyn Error>> {
    let extension = extension_of(path);
    if !SUPPORTED_INPUT_EXTENSIONS.contains(&extension.as_str()) {
        return Err(CliError::UnsupportedInputExtension { extension }.into());
    }

    let decoded = image::open(path)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    Ok(pipeline::RgbImage::new(width, height, rgb.into_raw()))
}

fn save_rgb_image(image: &pipeline::RgbImage, path: &Path) -> Result<(), Box<dyn Error>> {
    let extension = extension_of(path);
    if extension == "jpg" || extension == "jpeg" {
        return Err(CliError::LossyOutputExtension { extension }.into());
    }

    let buffer = image::RgbImage::from_raw(image.width() as u32, image.height() as u32, image.pixels().to_vec())
        .expect("pipeline::RgbImage dimensions always match its pixel buffer length");
    buffer.save(path)?;
    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let opts = Opts::parse();

    match opts.command {
        Command::Encode { input, plaintext, output, source } => {
            let image = load_rgb_image(&input)?;
            let reference = fs::read_to_string(&source)?;
            let watermarked = pipeline::encode(&image, &plaintext, &reference)?;
            save_rgb_image(&watermarked, &output)?;
            log::info!("wrote watermarked image to {}", output.display());
        }
        Command::Decode { input, source } => {
            let image = load_rgb_image(&input)?;
            let reference = fs::read_to_string(&source)?;
            let message = pipeline::decode(&image, &reference)?;
            println!("{}", message);
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    match run() {
        Err(e) => Err(e.to_string().into()),
        Ok(_) => Ok(()),
    }
}
