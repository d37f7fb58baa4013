use clap::{Parser, Subcommand};
use ean8_scan::decoder::digit::DigitDecoder;
use ean8_scan::detector::module_width::ModuleWidthEstimator;
use ean8_scan::detector::resample::Resampler;
use ean8_scan::detector::structure::SegmentExtractor;
use ean8_scan::encoder::{render_image, with_check_digit};
use ean8_scan::tools::{dataset_iter, dataset_root_from_env, load_gray, save_gray};
use ean8_scan::utils::binarization::{otsu_threshold, threshold_binarize};
use ean8_scan::{DecodedDigits, ScanConfig, Scanner};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ean8tool", version, about = "EAN-8 barcode CLI tools")]
struct Cli {
    /// Enable debug logging for every pipeline stage
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode the barcode on one row of an image
    Scan {
        #[arg(long)]
        image: PathBuf,
        /// Row to scan (default: EAN8_SCAN_ROW, then the middle row)
        #[arg(long)]
        row: Option<usize>,
        /// Fixed threshold (default: EAN8_THRESHOLD, then Otsu)
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Print every intermediate result of the pipeline
    Debug {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        row: Option<usize>,
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Write a synthetic EAN-8 image (7 digits get a check digit appended)
    Render {
        #[arg(long)]
        digits: String,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 3)]
        module_width: usize,
        #[arg(long, default_value_t = 60)]
        height: usize,
        /// White modules on each side
        #[arg(long, default_value_t = 10)]
        quiet: usize,
    },
    /// Scan every image under a directory and report the reading rate
    Dataset {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan {
            image,
            row,
            threshold,
        } => scan_cmd(&image, scan_config(row, threshold)),
        Command::Debug {
            image,
            row,
            threshold,
        } => debug_cmd(&image, scan_config(row, threshold)),
        Command::Render {
            digits,
            out,
            module_width,
            height,
            quiet,
        } => render_cmd(&digits, &out, module_width, height, quiet),
        Command::Dataset { root, limit } => dataset_cmd(root, limit),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn scan_config(row: Option<usize>, threshold: Option<u8>) -> ScanConfig {
    let mut config = ScanConfig::from_env();
    if let Some(row) = row {
        config = config.with_row(row);
    }
    if let Some(threshold) = threshold {
        config = config.with_threshold(threshold);
    }
    config
}

fn scan_cmd(image: &Path, config: ScanConfig) -> ExitCode {
    let (gray, width, height) = match load_gray(image) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return ExitCode::FAILURE;
        }
    };

    match Scanner::with_config(config).scan_grayscale(&gray, width, height) {
        Ok(report) => {
            println!("{}", report.digits);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}: {}", image.display(), err);
            ExitCode::FAILURE
        }
    }
}

fn debug_cmd(image: &Path, config: ScanConfig) -> ExitCode {
    let (gray, width, height) = match load_gray(image) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return ExitCode::FAILURE;
        }
    };
    println!("Image: {} ({}x{})", image.display(), width, height);
    if width == 0 || height == 0 {
        println!("Image has no pixels");
        return ExitCode::FAILURE;
    }

    let threshold = config.threshold.unwrap_or_else(|| otsu_threshold(&gray));
    let row = config.resolve_row(height);
    println!("Threshold: {}", threshold);
    println!("Row: {}", row);

    let scanline = threshold_binarize(&gray[row * width..(row + 1) * width], threshold);
    let module_width = ModuleWidthEstimator::estimate(&scanline);
    println!("Module width: {}", module_width);

    let bits = match Resampler::resample(&scanline, module_width) {
        Ok(bits) => bits,
        Err(err) => {
            println!("Resample failed: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let stream: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
    println!("Modules ({}): {}", bits.len(), stream);

    let segment = match SegmentExtractor::extract(bits) {
        Ok(segment) => segment,
        Err(err) => {
            println!("Structure: {}", err);
            return ExitCode::FAILURE;
        }
    };
    println!("Segment: {}", segment);
    println!("Segment start: {}", segment.start());
    println!("Segment middle: {}", segment.middle());
    println!("Segment end: {}", segment.end());

    match DigitDecoder::decode(&segment) {
        Ok(decoded) => {
            for (i, digit) in decoded.digits.iter().enumerate() {
                println!("Digit[{}]: {}", i, digit);
            }
            match decoded.verified() {
                Ok(_) => {
                    println!("Checksum: valid");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    println!("Checksum: {}", err);
                    ExitCode::FAILURE
                }
            }
        }
        Err(err) => {
            println!("Decode: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn parse_digits(text: &str) -> Option<[u8; 8]> {
    let values: Vec<u8> = text
        .trim()
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect::<Option<_>>()?;
    match values.len() {
        7 => {
            let mut payload = [0u8; 7];
            payload.copy_from_slice(&values);
            with_check_digit(&payload).ok()
        }
        8 => {
            let mut digits = [0u8; 8];
            digits.copy_from_slice(&values);
            Some(digits)
        }
        _ => None,
    }
}

fn render_cmd(
    text: &str,
    out: &Path,
    module_width: usize,
    height: usize,
    quiet: usize,
) -> ExitCode {
    let Some(digits) = parse_digits(text) else {
        eprintln!("Expected 7 or 8 decimal digits, got {:?}", text);
        return ExitCode::FAILURE;
    };

    let (pixels, width, height) = match render_image(&digits, module_width, quiet, height) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("Render failed: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = save_gray(out, &pixels, width, height) {
        eprintln!("Failed to write {}: {}", out.display(), err);
        return ExitCode::FAILURE;
    }

    println!(
        "Wrote {} ({}x{}): {}",
        out.display(),
        width,
        height,
        DecodedDigits::new(digits)
    );
    ExitCode::SUCCESS
}

fn dataset_cmd(root: Option<PathBuf>, limit: Option<usize>) -> ExitCode {
    let root = root.unwrap_or_else(dataset_root_from_env);
    let images: Vec<PathBuf> = dataset_iter(&root, limit).collect();
    if images.is_empty() {
        println!("No images found in {}", root.display());
        return ExitCode::FAILURE;
    }

    let scanner = Scanner::from_env();
    let started = Instant::now();
    let results: Vec<(PathBuf, Result<String, String>)> = images
        .par_iter()
        .map(|path| {
            let outcome = load_gray(path)
                .map_err(|err| err.to_string())
                .and_then(|(gray, width, height)| {
                    scanner
                        .scan_grayscale(&gray, width, height)
                        .map(|report| report.digits.to_string())
                        .map_err(|err| err.to_string())
                });
            (path.clone(), outcome)
        })
        .collect();
    let elapsed = started.elapsed();

    let mut decoded = 0usize;
    for (path, outcome) in &results {
        match outcome {
            Ok(digits) => {
                decoded += 1;
                println!("OK:   {} -> {}", path.display(), digits);
            }
            Err(err) => println!("FAIL: {} -> {}", path.display(), err),
        }
    }

    println!(
        "\nReading rate: {}/{} ({:.1}%) in {:.2?}",
        decoded,
        results.len(),
        100.0 * decoded as f64 / results.len() as f64,
        elapsed
    );
    ExitCode::SUCCESS
}
