mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, DashboardConfig, TasksConfig, TimerConfig};
pub use database::{Database, FocusDay};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `FOCUSBOARD_DATA_DIR` wins when set. Otherwise `~/.config/focusboard/`,
/// or `~/.config/focusboard-dev/` when `FOCUSBOARD_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("FOCUSBOARD_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusboard-dev")
            } else {
                base_dir.join("focusboard")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
