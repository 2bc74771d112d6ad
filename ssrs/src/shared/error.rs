use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No report server configured. Pass --server-url, set SSRS_SERVER_URL or add serverUrl to the profile.")]
    MissingServerUrl,
    #[error("Unable to read profile {path}. {error:?}")]
    IoError {
        path: String,
        #[source]
        error: std::io::Error,
    },
    #[error("Unable to parse profile {path}. {error}")]
    ProfileParseError {
        path: String,
        #[source]
        error: serde_yaml::Error,
    },
    #[error("Unable to parse duration `{value}`, expected e.g. 30s or 1500ms")]
    InvalidDuration { value: String },
    #[error("Unable to create HTTP client. {error}")]
    TransportError {
        #[source]
        error: reqwest::Error,
    },
}
