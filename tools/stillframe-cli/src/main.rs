//! Stillframe CLI — encode raw pixel buffers and composite tiles to JPEG.
//!
//! Usage:
//!   stillframe encode [OPTIONS] <INPUT>       Encode one raw buffer
//!   stillframe composite [OPTIONS] <TILE>...  Composite tiles onto a canvas
//!   stillframe config [--init]                Show or write the config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stillframe_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "stillframe",
    about = "Incremental JPEG canvas for screen-capture tiles",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a single raw pixel buffer to JPEG
    Encode {
        /// Raw pixel file (width * height * channels bytes)
        input: PathBuf,

        /// Image width in pixels
        #[arg(long)]
        width: u32,

        /// Image height in pixels
        #[arg(long)]
        height: u32,

        /// Pixel layout: rgb, bgr, rgba, or bgra
        #[arg(long, default_value = "rgb")]
        format: String,

        /// JPEG quality (0-100)
        #[arg(short, long)]
        quality: Option<i32>,

        /// Smoothing factor (0-100)
        #[arg(long)]
        smoothing: Option<i32>,

        /// Output file
        #[arg(short, long, default_value = "out.jpg")]
        output: PathBuf,
    },

    /// Composite raw tiles onto a zeroed canvas and encode it
    Composite {
        /// Tiles as PATH:X:Y:W:H
        #[arg(required = true)]
        tiles: Vec<String>,

        /// Canvas width in pixels
        #[arg(long)]
        width: u32,

        /// Canvas height in pixels
        #[arg(long)]
        height: u32,

        /// Pixel layout of the tiles: rgb, bgr, rgba, or bgra
        #[arg(long, default_value = "rgb")]
        format: String,

        /// JPEG quality (0-100)
        #[arg(short, long)]
        quality: Option<i32>,

        /// Output file
        #[arg(short, long, default_value = "out.jpg")]
        output: PathBuf,
    },

    /// Show the effective configuration, or write it out with --init
    Config {
        /// Write the current configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    stillframe_common::logging::init_logging(&stillframe_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    let config = AppConfig::load();

    // Encode jobs run on the blocking pool; size it from the config so the
    // worker count is tunable without rebuilding.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .max_blocking_threads(config.encoder.workers.max(1))
        .build()?;
    let _guard = runtime.enter();

    match cli.command {
        Commands::Encode {
            input,
            width,
            height,
            format,
            quality,
            smoothing,
            output,
        } => {
            commands::encode::run(&config, input, width, height, format, quality, smoothing, output)
        }
        Commands::Composite {
            tiles,
            width,
            height,
            format,
            quality,
            output,
        } => commands::composite::run(&config, tiles, width, height, format, quality, output),
        Commands::Config { init } => commands::config::run(&config, init),
    }
}
