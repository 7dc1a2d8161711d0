mod canvas;
mod error;
mod input;
mod window;

use autotile_wizard::{config::LogConfig, Config, Session};
use clap::Parser;
use std::{fs::File, path::PathBuf, str::FromStr};

use error::AppError;
use window::EditorWindow;

#[derive(Parser, Debug)]
#[command(name = "wizard-window", version, about = "Pair tiles up into autotile adjacency rules")]
struct Args {
    /// Tileset description (.strf) to import
    #[arg(short, long, value_name = "FILE")]
    tileset: Option<PathBuf>,

    /// Image to slice into a grid of tiles, may be given more than once
    #[arg(short, long = "image", value_name = "FILE")]
    images: Vec<PathBuf>,

    /// Editor settings (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Edge length of a tile in pixels, overrides the config
    #[arg(long)]
    tile_size: Option<u32>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(tile_size) = args.tile_size {
        config.tile_size = tile_size;
    }
    init_logging(&config.log)?;

    let mut session = Session::new(config.tile_size);
    if let Some(path) = &args.tileset {
        if let Err(err) = session.load_tileset(path) {
            log::error!("{err}");
        }
    }
    for path in &args.images {
        if let Err(err) = session.load_image(path) {
            log::error!("{err}");
        }
    }
    if session.groups().is_empty() {
        log::warn!("nothing to edit, pass --tileset or --image");
    }

    let event_loop = winit::event_loop::EventLoop::new();
    let window = EditorWindow::new(&event_loop, &config.window, config.tile_size)?;
    window.run(event_loop, session)
}

fn init_logging(config: &LogConfig) -> Result<(), AppError> {
    use simplelog::{
        ColorChoice, CombinedLogger, LevelFilter, SharedLogger, TermLogger, TerminalMode,
        WriteLogger,
    };

    let level = LevelFilter::from_str(&config.level)?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));
    if let Some(path) = &config.file {
        let file = File::create(path).map_err(|source| AppError::LogFile {
            path: path.clone(),
            source,
        })?;
        loggers.push(WriteLogger::new(level, simplelog::Config::default(), file));
    }
    CombinedLogger::init(loggers)?;
    return Ok(());
}
