//! Client configuration stored as YAML.
//!
//! Holds the bearer token handed over by the session, the feed service URL
//! and the request timeout. Lives in `~/.config/feed-sync/config.yml` unless
//! another directory is given.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY: &str = ".config/feed-sync";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub base_url: String,
    pub request_timeout_secs: u64,
    #[serde(skip)]
    file_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            access_token: None,
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
            file_path: None,
        }
    }
}

impl Config {
    /// Read the configuration from `dir`, or from the default directory when
    /// `dir` is `None`. The directory is created if needed; a missing file
    /// yields the defaults without an access token.
    ///
    pub fn load(dir: Option<&Path>) -> Result<Config, ConfigError> {
        let dir = match dir {
            Some(dir) => dir.to_path_buf(),
            None => default_directory()?,
        };
        fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDirectory {
            path: dir.clone(),
            source,
        })?;

        let file_path = dir.join(FILE_NAME);
        let mut config = if file_path.exists() {
            let contents =
                fs::read_to_string(&file_path).map_err(|source| ConfigError::Read {
                    path: file_path.clone(),
                    source,
                })?;
            serde_yaml::from_str::<Config>(&contents).map_err(|e| ConfigError::Parse {
                path: file_path.clone(),
                message: e.to_string(),
            })?
        } else {
            Config::default()
        };
        config.file_path = Some(file_path);
        Ok(config)
    }

    pub fn access_token(&self) -> Result<&str, ConfigError> {
        self.access_token
            .as_deref()
            .ok_or(ConfigError::MissingAccessToken)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Where `save` writes to, once known.
    ///
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Write the configuration back to the file it was loaded from.
    ///
    pub fn save(&self) -> Result<(), ConfigError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::NoLocation)?;
        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::Encode(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(file_path, contents).map_err(|source| ConfigError::Write {
            path: file_path.clone(),
            source,
        })
    }

    /// Replace the access token and persist it.
    ///
    pub fn save_token(&mut self, token: String) -> Result<(), ConfigError> {
        self.access_token = Some(token);
        if self.file_path.is_none() {
            self.file_path = Some(default_directory()?.join(FILE_NAME));
        }
        self.save()
    }
}

fn default_directory() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DIRECTORY))
        .ok_or(ConfigError::NoHomeDirectory)
}
