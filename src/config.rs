use crate::{error::ValidationError, github::api::Repository};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG_FILE_NAME: &str = "ghreleaser.yaml";
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Optional settings read from `ghreleaser.yaml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Reads `path`, or the default file when no path is given. Only an
    /// explicitly requested file has to exist.
    pub async fn load(path: Option<&Path>) -> Result<FileConfig> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE_NAME), false),
        };

        if !required && !tokio::fs::try_exists(path).await.unwrap_or(false) {
            log::debug!("no {} found, using defaults", path.display());
            return Ok(FileConfig::default());
        }

        let config_string = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read config file {}", path.display()))?;

        FileConfig::parse(&config_string)
            .with_context(|| format!("Cannot parse config file {}", path.display()))
    }

    pub fn parse(config_string: &str) -> Result<FileConfig> {
        if config_string.trim().is_empty() {
            return Ok(FileConfig::default());
        }

        let config = serde_yaml::from_str::<FileConfig>(config_string)?;

        Ok(config)
    }
}

/// Values given on the command line (or through the environment).
#[derive(Default)]
pub struct Overrides {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub base_url: Option<String>,
    pub token: Option<String>,
}

/// How to reach the API.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
}

pub struct Config {
    pub repository: Repository,
    pub client: ClientConfig,
}

impl Config {
    pub async fn load(path: Option<&Path>, overrides: Overrides) -> Result<Config> {
        let file = FileConfig::load(path).await?;

        Ok(Config::merge(file, overrides)?)
    }

    /// Command line values win over the file, the file over built-in defaults.
    pub fn merge(file: FileConfig, overrides: Overrides) -> Result<Config, ValidationError> {
        let owner = non_empty(overrides.owner.or(file.owner))
            .ok_or(ValidationError::MissingRepository("owner"))?;
        let repo = non_empty(overrides.repo.or(file.repo))
            .ok_or(ValidationError::MissingRepository("name"))?;
        let base_url = non_empty(overrides.base_url.or(file.base_url))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        Ok(Config {
            repository: Repository::new(owner, repo),
            client: ClientConfig {
                base_url,
                token: non_empty(overrides.token),
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
