use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels exposed on the command line.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Scene {
    /// Random-sphere cover scene.
    Spheres,
    /// Cubes lit by an emissive panel.
    Cubes,
    /// Triangle mesh next to analytic primitives.
    Mesh,
}

/// Command line arguments.
#[derive(Parser)]
#[command(name = "lumina")]
#[command(about = "A small Monte-Carlo path tracer")]
pub struct Args {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100")]
    pub samples_per_pixel: u32,

    /// Maximum ray bounce depth
    #[arg(long, short = 'd', default_value = "50")]
    pub max_depth: u32,

    /// Scene to render
    #[arg(long, value_enum, default_value = "spheres")]
    pub scene: Scene,

    /// Seed the random generator for a reproducible render
    #[arg(long)]
    pub seed: Option<u64>,

    /// Send image to TEV for real-time visualization
    #[arg(long)]
    pub tev: bool,

    /// TEV client IP address and port (automatically enables --tev)
    #[arg(long)]
    pub tev_address: Option<String>,

    /// Output file path (.ppm plain text, .png 8-bit gamma, .exr HDR linear)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: String,
}
