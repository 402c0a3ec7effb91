use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `save` was called on a configuration that was never given a location.
    #[error("Configuration has no file location")]
    NoLocation,

    #[error("No access token configured, run `feed-sync login <TOKEN>` or set `access_token` in the configuration file")]
    MissingAccessToken,

    #[error("Could not locate the home directory")]
    NoHomeDirectory,

    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Could not encode configuration: {0}")]
    Encode(String),
}
