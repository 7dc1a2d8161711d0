use autotile_wizard::error::ConfigError;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid log level: {0}")]
    LogLevel(#[from] log::ParseLevelError),
    #[error("failed to create log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
    #[error("failed to open window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create pixel buffer: {0}")]
    Pixels(#[from] pixels::Error),
}
