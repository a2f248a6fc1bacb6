use chirpgram::{
    decode, export, generate, AnalysisConfig, CancellationToken, SpectrogramError, WindowKind,
};
use chrono::Local;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "chirpgram")]
#[command(author, version, about = "Generate spectrograms from wildlife sound recordings")]
struct Args {
    /// Audio file or directory of recordings
    path: PathBuf,

    /// Directory for generated spectrograms (default: timestamped)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Png)]
    format: OutputFormat,

    /// Frame length in samples (power of two)
    #[arg(long, default_value_t = 2048)]
    fft_size: usize,

    /// Stride between frame starts (default: fft-size / 4)
    #[arg(long)]
    hop_size: Option<usize>,

    /// Window function: none, hann, or hamming
    #[arg(short, long, default_value = "none")]
    window: WindowKind,

    /// Number of parallel workers (default: number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Only show the summary
    #[arg(short, long)]
    quiet: bool,

    /// Show per-file analysis details
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Png,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Json => "json",
        }
    }
}

/// What happened to one input file.
enum Outcome {
    Written {
        output: PathBuf,
        duration_secs: f64,
        frame_count: usize,
        frequency_resolution: f64,
        time_resolution: f64,
    },
    TooShort,
    Stopped,
    Failed(anyhow::Error),
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = AnalysisConfig {
        fft_size: args.fft_size,
        hop_size: args.hop_size.unwrap_or(args.fft_size / 4),
        window: args.window,
    };

    // Set up thread pool
    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    // Supported audio formats
    let supported_extensions: std::collections::HashSet<&str> = [
        "flac", "wav", "wave", "aiff", "aif", "mp3", "m4a", "aac", "ogg", "opus",
    ]
    .iter()
    .cloned()
    .collect();

    // Collect audio files
    let files: Vec<PathBuf> = if args.path.is_dir() {
        WalkDir::new(&args.path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| supported_extensions.contains(ext.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect()
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        eprintln!("No audio files found (supported: wav, flac, mp3, m4a, aac, ogg, opus, aiff)");
        std::process::exit(1);
    }

    // Ctrl-C requests cooperative cancellation; files already in flight
    // finish as Stopped, nothing partial is written
    let token = CancellationToken::new();
    {
        let token = token.clone();
        if let Err(e) = ctrlc::set_handler(move || token.cancel()) {
            eprintln!("Warning: could not install Ctrl-C handler: {}", e);
        }
    }

    let out_dir = args.out_dir.clone().unwrap_or_else(|| {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!("spectrograms_{}", timestamp))
    });
    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        eprintln!("Failed to create {}: {}", out_dir.display(), e);
        std::process::exit(1);
    }

    if !args.quiet {
        eprintln!("\x1b[1mChirpgram - Spectrogram Generator\x1b[0m");
        eprintln!("{}", "─".repeat(70));
        eprintln!(
            "Found {} audio file(s); fft_size={}, hop_size={}, window={}\n",
            files.len(),
            config.fft_size,
            config.hop_size,
            config.window
        );
    }

    // Set up progress bar
    let pb = if !args.quiet && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Process files in parallel; each file's frames also fan out across the
    // same pool inside generate()
    let results: Vec<(PathBuf, Outcome)> = files
        .par_iter()
        .map(|path| {
            let out_path = output_path(&out_dir, path, args.format);
            let outcome = process_file(path, &config, &token, &out_path);
            if let Some(ref pb) = pb {
                pb.inc(1);
                pb.set_message(file_name(path));
            }
            (path.clone(), outcome)
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    // Print results
    if !args.quiet {
        for (path, outcome) in &results {
            match outcome {
                Outcome::Written {
                    output,
                    duration_secs,
                    frame_count,
                    frequency_resolution,
                    time_resolution,
                } => {
                    println!(
                        "\x1b[32m[ok]\x1b[0m    {:>6}  {:<30}  -> {}",
                        format_duration(*duration_secs),
                        file_name(path),
                        output.display()
                    );
                    if args.verbose {
                        eprintln!(
                            "    {} frames, {:.1} Hz/bin, {:.1} ms/frame",
                            frame_count,
                            frequency_resolution,
                            time_resolution * 1000.0
                        );
                    }
                }
                Outcome::TooShort => {
                    println!(
                        "\x1b[33m[short]\x1b[0m        {:<30}  recording shorter than one frame",
                        file_name(path)
                    );
                }
                Outcome::Stopped => {
                    println!("\x1b[90m[stop]\x1b[0m         {:<30}", file_name(path));
                }
                Outcome::Failed(e) => {
                    println!(
                        "\x1b[31m[fail]\x1b[0m         {:<30}  {}",
                        file_name(path),
                        e
                    );
                }
            }
        }
    }

    // Summary
    let ok_count = results
        .iter()
        .filter(|(_, o)| matches!(o, Outcome::Written { .. }))
        .count();
    let short_count = results
        .iter()
        .filter(|(_, o)| matches!(o, Outcome::TooShort))
        .count();
    let stopped_count = results
        .iter()
        .filter(|(_, o)| matches!(o, Outcome::Stopped))
        .count();
    let failed_count = results
        .iter()
        .filter(|(_, o)| matches!(o, Outcome::Failed(_)))
        .count();

    if !args.quiet {
        eprintln!("\n{}", "─".repeat(70));
        eprintln!("\x1b[1mSummary:\x1b[0m");
        eprintln!("  \x1b[32m✓ Written:\x1b[0m   {}", ok_count);
        if short_count > 0 {
            eprintln!("  \x1b[33m? Too short:\x1b[0m {}", short_count);
        }
        if stopped_count > 0 {
            eprintln!("  \x1b[90m∅ Stopped:\x1b[0m   {}", stopped_count);
        }
        if failed_count > 0 {
            eprintln!("  \x1b[31m✗ Failed:\x1b[0m    {}", failed_count);
        }
        eprintln!("\nOutput directory: {}", out_dir.display());
    }

    if stopped_count > 0 {
        std::process::exit(130);
    }
    if failed_count > 0 {
        std::process::exit(1);
    }
}

/// Decode, analyze, and export one recording.
fn process_file(
    path: &Path,
    config: &AnalysisConfig,
    token: &CancellationToken,
    out_path: &Path,
) -> Outcome {
    let buffer = match decode::decode_file(path) {
        Ok(b) => b,
        Err(e) => return Outcome::Failed(e.into()),
    };

    match generate(&buffer, config, token) {
        Ok(matrix) => {
            if let Err(e) = export::write(out_path, &matrix) {
                return Outcome::Failed(e.into());
            }
            Outcome::Written {
                output: out_path.to_path_buf(),
                duration_secs: matrix.duration_secs(),
                frame_count: matrix.frame_count(),
                frequency_resolution: matrix.frequency_resolution(),
                time_resolution: matrix.time_resolution(),
            }
        }
        Err(SpectrogramError::EmptyAudio) => Outcome::TooShort,
        Err(SpectrogramError::Cancelled) => Outcome::Stopped,
        Err(e) => Outcome::Failed(e.into()),
    }
}

fn output_path(out_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("spectrogram");
    out_dir.join(format!("{}.{}", stem, format.extension()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("?")
        .to_string()
}

/// Format a duration as `M:SS` for display.
fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
