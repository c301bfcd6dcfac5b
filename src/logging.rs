//! Logger setup.

use std::path::PathBuf;

use crate::{config::LogConfig, error::AppError};

/// Returns `<data dir>/campsite3d/campsite3d.log`.
pub fn default_log_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("campsite3d").join("campsite3d.log"))
}

/// Installs the global logger: stdout, plus a log file when enabled in the config.
pub fn setup_logger(config: &LogConfig) -> Result<(), AppError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(config.level_filter())
        .chain(std::io::stdout());

    if config.file {
        match default_log_file() {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| AppError::Logger(e.to_string()))?;
                }
                let file = fern::log_file(&path).map_err(|e| AppError::Logger(e.to_string()))?;
                dispatch = dispatch.chain(file);
            }
            None => eprintln!("No data directory found, logging to stdout only"),
        }
    }

    dispatch
        .apply()
        .map_err(|e| AppError::Logger(e.to_string()))
}
