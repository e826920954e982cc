use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("create log directory {} failed", .path.display())]
    CreateLogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("initialize tracing subscriber failed")]
    InitSubscriber {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub fn init_logging(default_filter: &str) -> Result<PathBuf, LoggingError> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir).map_err(|source| LoggingError::CreateLogDir {
        path: log_dir.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "jot.log");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|source| LoggingError::InitSubscriber { source })?;

    Ok(log_dir.join("jot.log"))
}

fn log_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("jot")
        .join("logs")
}
