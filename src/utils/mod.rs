use std::{
    fs,
    path::{Path, PathBuf},
    sync::Once,
};

use crate::errors::WaterlogError;

const DIR_ENV: &str = "WATERLOG_DIR";
const APP_DIR: &str = "waterlog";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive("waterlog=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Base data directory: `$WATERLOG_DIR` when set, otherwise the platform
/// data dir plus an app folder.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn ensure_dir(path: &Path) -> Result<(), WaterlogError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
