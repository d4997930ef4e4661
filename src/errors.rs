use std::io;

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Parse(String),
    #[error("failed to load {what}: {source}")]
    Load {
        what: &'static str,
        #[source]
        source: Box<AppError>,
    },
    #[error("{0}")]
    Config(String),
    #[cfg(feature = "desktop")]
    #[error(transparent)]
    Tauri(#[from] tauri::Error),
}

impl AppError {
    pub fn load(what: &'static str, source: AppError) -> Self {
        AppError::Load {
            what,
            source: Box::new(source),
        }
    }
}
