// ============================================================================
// rustouch CLI — headless region editing via command-line arguments
// ============================================================================
//
// Usage examples:
//   rustouch --input photo.png --transform Negative --output out.png
//   rustouch -i photo.jpg -t Mirror -p 10,10 200,10 200,150 10,150 -o out.png
//   rustouch -i "shots/*.jpg" -t Pixelate --output-dir processed/
//   rustouch --list
//
// All processing runs synchronously on the current thread; with no --points
// the transform is applied to the whole image.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::io::{load_image, save_image};
use crate::ops::region::{Point, Selection};
use crate::session::EditSession;
use crate::{log_err, log_info};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// rustouch headless image processor.
///
/// Apply a region transform to image files without opening a UI.
#[derive(Parser, Debug)]
#[command(
    name = "rustouch",
    about = "rustouch headless region-transform image processor",
    long_about = "Apply one of the built-in pixel transforms to a rectangular\n\
                  region of each input image (or to the whole image when no\n\
                  points are given). Supports PNG, JPEG, WEBP, BMP, TGA, TIFF.\n\n\
                  Example:\n  \
                  rustouch -i photo.png -t Negative -p 10,10 200,10 200,150 10,150 -o out.png"
)]
pub struct CliArgs {
    /// Input file(s). Glob patterns accepted (e.g. "*.png", "shots/*.jpg").
    #[arg(short, long, num_args = 1.., required_unless_present = "list")]
    pub input: Vec<String>,

    /// Transform name, as printed by --list (e.g. "Mirror", "Show Borders").
    #[arg(short, long, value_name = "NAME", required_unless_present = "list")]
    pub transform: Option<String>,

    /// Four region corner points as X,Y pairs (any order — the transform is
    /// applied to their bounding box). Omit to process the whole image.
    #[arg(short, long, num_args = 4, value_name = "X,Y")]
    pub points: Option<Vec<String>>,

    /// Output file path. Only valid for single-file input.
    /// For batch input use --output-dir instead.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing.
    /// Files are written here with their original name.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JPEG quality (1–100, default 90).
    #[arg(short, long, default_value_t = 90, value_name = "1-100")]
    pub quality: u8,

    /// Print the available transform names and exit.
    #[arg(short, long)]
    pub list: bool,

    /// Print per-file timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run all CLI processing and return an OS exit code.
/// `0` = all files succeeded, `1` = one or more files failed.
pub fn run(args: CliArgs) -> ExitCode {
    if args.list {
        for name in EditSession::transform_names() {
            println!("{}", name);
        }
        return ExitCode::SUCCESS;
    }

    // required_unless_present guarantees this in non-list mode
    let transform = match args.transform.as_deref() {
        Some(t) => t,
        None => {
            eprintln!("error: --transform is required unless --list is given.");
            return ExitCode::FAILURE;
        }
    };

    let selection_points = match args.points.as_deref().map(parse_points).transpose() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let inputs = resolve_inputs(&args.input);
    if inputs.is_empty() {
        eprintln!("error: no input files matched the given pattern(s).");
        return ExitCode::FAILURE;
    }

    // Multiple inputs require --output-dir, not --output
    if inputs.len() > 1 && args.output.is_some() && args.output_dir.is_none() {
        eprintln!(
            "error: {} input files given but --output only accepts a single file path.\n\
             Use --output-dir to specify a destination directory for batch processing.",
            inputs.len()
        );
        return ExitCode::FAILURE;
    }

    if let Some(dir) = &args.output_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("error: cannot create output directory {}: {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    }

    let mut failures = 0usize;
    for input in &inputs {
        let started = Instant::now();
        match process_file(input, transform, selection_points, &args) {
            Ok(out_path) => {
                log_info!("{} -> {}", input.display(), out_path.display());
                if args.verbose {
                    println!(
                        "{} -> {} ({} ms)",
                        input.display(),
                        out_path.display(),
                        started.elapsed().as_millis()
                    );
                }
            }
            Err(e) => {
                failures += 1;
                log_err!("{}: {}", input.display(), e);
                eprintln!("error: {}: {}", input.display(), e);
            }
        }
    }

    if failures > 0 {
        eprintln!("{}/{} files failed.", failures, inputs.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load, transform, save one file. Returns the written output path.
fn process_file(
    input: &Path,
    transform: &str,
    points: Option<[Point; 4]>,
    args: &CliArgs,
) -> Result<PathBuf, String> {
    let image = load_image(input)?;

    let mut session = EditSession::new();
    session.load_fresh(image);

    let selection = match points {
        Some(pts) => Selection::new(pts),
        None => Selection::full_image(session.current().map_err(|e| e.to_string())?),
    };

    let result = session
        .apply_named(&selection, transform)
        .map_err(|e| e.to_string())?
        .clone();

    let out_path = output_path_for(input, args);
    save_image(&out_path, &result, args.quality)?;
    Ok(out_path)
}

/// Destination for one input: explicit --output, --output-dir with the
/// original file name, or a sibling `<stem>_edited.<ext>` next to the input.
fn output_path_for(input: &Path, args: &CliArgs) -> PathBuf {
    if let Some(out) = &args.output {
        return out.clone();
    }
    if let Some(dir) = &args.output_dir {
        return dir.join(input.file_name().unwrap_or_default());
    }
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
    let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("png");
    input.with_file_name(format!("{}_edited.{}", stem, ext))
}

/// Expand glob patterns / literal paths into concrete file paths,
/// preserving the order they were given.
fn resolve_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in patterns {
        let mut matched = false;
        if let Ok(paths) = glob::glob(pattern) {
            for path in paths.flatten() {
                if path.is_file() {
                    files.push(path);
                    matched = true;
                }
            }
        }
        // Not a pattern (or nothing matched): treat as a literal path so the
        // per-file error surfaces at load time.
        if !matched {
            let literal = PathBuf::from(pattern);
            if literal.exists() {
                files.push(literal);
            }
        }
    }
    files
}

/// Parse four "X,Y" arguments into selection points.
fn parse_points(raw: &[String]) -> Result<[Point; 4], String> {
    if raw.len() != 4 {
        return Err(format!("--points needs exactly 4 X,Y pairs, got {}", raw.len()));
    }
    let mut points = [Point::new(0, 0); 4];
    for (i, spec) in raw.iter().enumerate() {
        let (x, y) = spec
            .split_once(',')
            .ok_or_else(|| format!("point {:?} is not of the form X,Y", spec))?;
        let x: i32 = x.trim().parse().map_err(|_| format!("bad x coordinate in {:?}", spec))?;
        let y: i32 = y.trim().parse().map_err(|_| format!("bad y coordinate in {:?}", spec))?;
        points[i] = Point::new(x, y);
    }
    Ok(points)
}
