//! Command-line interface for the classpic utility
//!
//! Reads class notation from a file or stdin, renders it, and writes a PNG.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use classpic::core::logging::init_logging;

/// Classpic - render plain-text class diagrams to PNG images
#[derive(Parser)]
#[command(name = "classpic")]
#[command(about = "Render a plain-text class diagram notation into a PNG image")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    /// Input file containing class notation (use - or omit for stdin)
    pub input: Option<PathBuf>,

    /// Output PNG file
    #[arg(short, long, default_value = "diagram.png")]
    pub output: PathBuf,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 768)]
    pub height: u32,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Read notation from the input path, `-` and absence meaning stdin
fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

pub fn run(args: Cli) -> Result<()> {
    if let Err(e) = init_logging(Some(args.log_level.as_str()), Some(args.log_format.as_str())) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    // The core treats a zero canvas as a contract violation; reject it
    // here with a friendlier message.
    if args.width == 0 || args.height == 0 {
        bail!("Canvas dimensions must be positive, got {}x{}", args.width, args.height);
    }

    let text = read_input(args.input.as_ref())?;

    let diagram = classpic::parse(&text);
    tracing::info!(
        classes = diagram.class_count(),
        relations = diagram.relation_count(),
        "parsed diagram"
    );

    let image = classpic::render(&diagram, args.width, args.height)?;
    let png = image.encode_png()?;
    fs::write(&args.output, png)
        .with_context(|| format!("Failed to write output file: {}", args.output.display()))?;

    tracing::info!(output = %args.output.display(), "wrote PNG");
    Ok(())
}
