//! Waterfall - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use waterfall::feed::{FeedContext, FeedSession};
use waterfall::model::AppError;
use waterfall::source::FilePageSource;
use waterfall::view::OutputFormat;

/// Waterfall - lay out a recorded feed in masonry columns
#[derive(Parser, Debug)]
#[command(name = "waterfall")]
#[command(version)]
#[command(about = "Lay out recorded feed pages in a masonry (waterfall) grid")]
pub struct Args {
    /// JSON Lines file, one API page response per line
    pub pages: PathBuf,

    /// Viewport width in pixels
    #[arg(short = 'w', long, default_value = "1440")]
    pub viewport_width: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Stop after this many pages (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: Option<u32>,

    /// Items requested per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Vertical gap between items in pixels
    #[arg(long)]
    pub gap: Option<f64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = waterfall::config::load_config_with_precedence(args.config.clone())
            .map_err(AppError::from)?;
        let merged = waterfall::config::merge_config(config_file).map_err(AppError::from)?;
        let with_env = waterfall::config::apply_env_overrides(merged);
        waterfall::config::apply_cli_overrides(
            with_env,
            args.gap,
            args.page_size.map(|n| n as usize),
        )
    };

    let _log_guard = waterfall::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let mut source = FilePageSource::open(&args.pages).map_err(AppError::from)?;

    let mut session = FeedSession::new(FeedContext::Home, config.layout, config.feed);
    session.set_viewport_width(args.viewport_width);

    waterfall::integration::load_all(
        &mut session,
        &mut source,
        args.max_pages.map(|n| n as usize),
    )
    .map_err(AppError::from)?;

    let stdout = std::io::stdout();
    waterfall::view::write_layout(&mut stdout.lock(), &session.layout().snapshot(), args.format)
        .map_err(AppError::from)?;

    Ok(())
}
