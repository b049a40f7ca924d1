use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("there is no such page on the wiki: {url} (code=404)")]
    NotFound { url: String },

    #[error("request to {url} failed: code={status}, reason={reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("unexpected page structure at {url}: {detail}")]
    Structure { url: String, detail: String },
}

impl ScanError {
    pub(crate) fn structure(url: impl Into<String>, detail: impl Into<String>) -> Self {
        ScanError::Structure {
            url: url.into(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
