//! Release coordinates and artifact naming.

use std::path::{Path, PathBuf};

use crate::platform::PlatformTuple;

/// Name of the tool published in each release.
pub const TOOL_NAME: &str = "freeport";

pub const DEFAULT_OWNER: &str = "kzeitar";
pub const DEFAULT_REPO: &str = "freeport";
pub const DEFAULT_VERSION: &str = "0.1.0";
pub const DEFAULT_BASE_URL: &str = "https://github.com";

/// Where a release lives: `<base_url>/<owner>/<repo>`, tagged `v<version>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCoordinate {
    pub owner: String,
    pub repo: String,
    pub version: String,
    pub base_url: String,
}

impl ReleaseCoordinate {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, version: &str) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            version: version.trim_start_matches('v').to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn tag(&self) -> String {
        format!("v{}", self.version)
    }
}

impl Default for ReleaseCoordinate {
    fn default() -> Self {
        Self::new(DEFAULT_OWNER, DEFAULT_REPO, DEFAULT_VERSION)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    pub remote_file_name: String,
    pub download_url: String,
    pub local_file_name: String,
    pub local_path: PathBuf,
}

/// Build the download URL and local destination for a platform.
pub fn locate(
    tuple: PlatformTuple,
    coord: &ReleaseCoordinate,
    install_dir: &Path,
) -> ArtifactDescriptor {
    let suffix = tuple.os.exe_suffix();
    let remote_file_name = format!(
        "{TOOL_NAME}-{}-{}{suffix}",
        tuple.os.as_str(),
        tuple.arch.as_str()
    );
    let download_url = format!(
        "{}/{}/{}/releases/download/{}/{}",
        coord.base_url.trim_end_matches('/'),
        coord.owner,
        coord.repo,
        coord.tag(),
        remote_file_name
    );
    let local_file_name = format!("{TOOL_NAME}{suffix}");
    let local_path = install_dir.join(&local_file_name);

    ArtifactDescriptor {
        remote_file_name,
        download_url,
        local_file_name,
        local_path,
    }
}
