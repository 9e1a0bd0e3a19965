use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::platform::HostIdentifiers;

#[derive(Parser, Debug, Clone)]
#[clap(
    name = "freeport-install",
    version,
    about = "Download and install the prebuilt freeport binary for this machine",
    long_about = None
)]
pub struct Args {
    /// Directory to install the binary into [default: bin]
    #[clap(short = 'd', long, env = "FREEPORT_INSTALL_DIR")]
    pub install_dir: Option<String>,

    /// Host operating system identifier (e.g., linux, darwin, win32)
    #[clap(long, env = "FREEPORT_INSTALL_OS")]
    pub os: Option<String>,

    /// Host CPU architecture identifier (e.g., x64, arm64)
    #[clap(long, env = "FREEPORT_INSTALL_ARCH")]
    pub arch: Option<String>,

    /// Owner of the release repository [default: kzeitar]
    #[clap(long)]
    pub owner: Option<String>,

    /// Name of the release repository [default: freeport]
    #[clap(long)]
    pub repo: Option<String>,

    /// Release version to install (e.g., 0.1.0 or v0.1.0) [default: 0.1.0]
    #[clap(long, env = "FREEPORT_INSTALL_VERSION")]
    pub release_version: Option<String>,

    /// Release host base URL [default: https://github.com]
    #[clap(long, env = "FREEPORT_INSTALL_BASE_URL")]
    pub base_url: Option<String>,

    /// Download timeout in seconds [default: 60]
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Maximum number of redirects to follow [default: 5]
    #[clap(long)]
    pub max_redirects: Option<usize>,

    /// Configuration file path
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Print what would be downloaded and where, without touching network or disk
    #[clap(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[clap(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Host identifiers to resolve, defaulting to the running machine
    pub fn host(&self) -> HostIdentifiers {
        let current = HostIdentifiers::current();
        HostIdentifiers {
            os: self.os.clone().unwrap_or(current.os),
            arch: self.arch.clone().unwrap_or(current.arch),
        }
    }

    /// Configuration file to load
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }
}
