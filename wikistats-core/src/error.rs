use std::path::PathBuf;
use thiserror::Error;
use wikistats_scanner::ScanError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("cannot test {url} for ambiguity: it has no links to other pages of the wiki")]
    NoWikiLinks { url: String },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        CoreError::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
