use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;
use crate::error::{InstallError, Result};
use crate::fetcher::{FetchOptions, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS};
use crate::platform::HostIdentifiers;
use crate::release::{
    ReleaseCoordinate, DEFAULT_BASE_URL, DEFAULT_OWNER, DEFAULT_REPO, DEFAULT_VERSION,
};
use crate::utils;

pub const DEFAULT_INSTALL_DIR: &str = "bin";

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ReleaseConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub version: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct DownloadConfig {
    pub install_dir: Option<String>,
    /// Seconds
    pub timeout: Option<u64>,
    pub max_redirects: Option<usize>,
}

/// Everything one install invocation needs, after merging flags, file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: HostIdentifiers,
    pub coordinate: ReleaseCoordinate,
    pub fetch: FetchOptions,
    pub install_dir: PathBuf,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| InstallError::Config {
            path: path.to_path_buf(),
            message: format!("failed to read file: {e}"),
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| InstallError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("freeport-install.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/freeport-install.toml"))
    }

    /// Merge with command line arguments. Flags win over the file, the file over defaults.
    pub fn merge_with_args(&self, args: &Args) -> Settings {
        let release = &self.release;
        let download = &self.download;

        let owner = pick(&args.owner, &release.owner, DEFAULT_OWNER);
        let repo = pick(&args.repo, &release.repo, DEFAULT_REPO);
        let version = pick(&args.release_version, &release.version, DEFAULT_VERSION);
        let base_url = pick(&args.base_url, &release.base_url, DEFAULT_BASE_URL);
        let coordinate = ReleaseCoordinate::new(owner, repo, &version).with_base_url(base_url);

        let timeout = args
            .timeout
            .or(download.timeout)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let max_redirects = args
            .max_redirects
            .or(download.max_redirects)
            .unwrap_or(DEFAULT_MAX_REDIRECTS);
        let fetch = FetchOptions {
            timeout: Duration::from_secs(timeout),
            max_redirects,
        };

        let install_dir = pick(&args.install_dir, &download.install_dir, DEFAULT_INSTALL_DIR);

        Settings {
            host: args.host(),
            coordinate,
            fetch,
            install_dir: utils::expand_tilde(&install_dir),
        }
    }
}

fn pick(flag: &Option<String>, file: &Option<String>, default: &str) -> String {
    flag.clone()
        .or_else(|| file.clone())
        .unwrap_or_else(|| default.to_string())
}
