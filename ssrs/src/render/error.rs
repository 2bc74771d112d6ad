use reqwest::StatusCode;
use thiserror::Error;

/// The reason a fetch failed. Callers are not expected to branch on this, it is kept so
/// the underlying cause survives in logs and `Error::source` chains.
#[derive(Error, Debug)]
pub enum FetchDetail {
    #[error("Unable to reach report server. {error}")]
    Transport {
        #[from]
        error: reqwest::Error,
    },
    #[error("Report server responded with {status}")]
    Status { status: StatusCode },
    #[error("{message}")]
    Other { message: String },
}

/// Any failure to fetch a rendered report: DNS, connection, TLS, timeout or a
/// non-success HTTP status all surface as this one error.
#[derive(Error, Debug)]
#[error("Unable to render report from {url}")]
pub struct FetchFailure {
    pub url: String,
    #[source]
    pub detail: FetchDetail,
}

impl FetchFailure {
    pub fn new(url: &str, detail: impl Into<FetchDetail>) -> Self {
        Self {
            url: url.to_string(),
            detail: detail.into(),
        }
    }

    pub fn status(url: &str, status: StatusCode) -> Self {
        Self::new(url, FetchDetail::Status { status })
    }

    pub fn other(url: &str, message: impl Into<String>) -> Self {
        Self::new(
            url,
            FetchDetail::Other {
                message: message.into(),
            },
        )
    }

    /// Status returned by the server, when the server answered at all.
    pub fn status_code(&self) -> Option<StatusCode> {
        match &self.detail {
            FetchDetail::Status { status } => Some(*status),
            FetchDetail::Transport { error } => error.status(),
            FetchDetail::Other { .. } => None,
        }
    }
}
