use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};
use crate::fetcher::Fetcher;
use crate::platform::{self, HostIdentifiers, PlatformTuple};
use crate::release::{self, ArtifactDescriptor, ReleaseCoordinate, TOOL_NAME};
use crate::utils;

/// Pipeline stage an install failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configuring,
    Resolving,
    Fetching,
    Installing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Configuring => "loading configuration",
            Stage::Resolving => "resolving platform",
            Stage::Fetching => "downloading",
            Stage::Installing => "installing",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct InstallFailure {
    pub stage: Stage,
    pub error: InstallError,
    /// File that may have been partially written when the failure happened.
    pub destination: Option<PathBuf>,
}

impl InstallFailure {
    pub fn new(stage: Stage, error: InstallError, destination: Option<&Path>) -> Self {
        Self {
            stage,
            error,
            destination: destination.map(Path::to_path_buf),
        }
    }
}

impl fmt::Display for InstallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.error)
    }
}

impl std::error::Error for InstallFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Path of the installed binary, or the stage and error that stopped the install.
pub type InstallResult = std::result::Result<PathBuf, InstallFailure>;

/// Resolved platform plus the artifact to fetch for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub platform: PlatformTuple,
    pub artifact: ArtifactDescriptor,
}

/// Resolve the host and compute where the artifact comes from and goes to.
///
/// Performs no I/O, so it is also what `--dry-run` prints.
pub fn plan(
    host: &HostIdentifiers,
    coord: &ReleaseCoordinate,
    install_dir: &Path,
) -> std::result::Result<InstallPlan, InstallFailure> {
    tracing::debug!("Resolving platform for {}-{}", host.os, host.arch);
    let platform = platform::resolve(&host.os, &host.arch)
        .map_err(|e| InstallFailure::new(Stage::Resolving, e, None))?;

    tracing::debug!("Locating {} {} for {}", TOOL_NAME, coord.version, platform);
    let artifact = release::locate(platform, coord, install_dir);

    Ok(InstallPlan { platform, artifact })
}

pub struct Installer {
    fetcher: Fetcher,
}

impl Installer {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Run the whole pipeline: resolve, locate, download, mark executable.
    pub async fn run(
        &self,
        host: &HostIdentifiers,
        coord: &ReleaseCoordinate,
        install_dir: &Path,
    ) -> InstallResult {
        println!("Resolving platform for {}-{}...", host.os, host.arch);
        let InstallPlan {
            platform,
            artifact: descriptor,
        } = plan(host, coord, install_dir)?;
        let dest = descriptor.local_path.as_path();

        println!("Downloading {} {} for {}...", TOOL_NAME, coord.version, platform);
        println!("URL: {}", descriptor.download_url);

        self.prepare_dir(dest)
            .await
            .map_err(|e| InstallFailure::new(Stage::Installing, e, None))?;

        self.download(&descriptor)
            .await
            .map_err(|e| InstallFailure::new(Stage::Fetching, e, Some(dest)))?;

        self.finalize(dest)
            .map_err(|e| InstallFailure::new(Stage::Installing, e, Some(dest)))?;

        println!("✓ Installed successfully");
        tracing::info!("Installed {} to {}", TOOL_NAME, dest.display());
        Ok(descriptor.local_path)
    }

    /// Download and finalize an already located artifact.
    pub async fn install(&self, descriptor: &ArtifactDescriptor) -> Result<PathBuf> {
        self.prepare_dir(&descriptor.local_path).await?;
        self.download(descriptor).await?;
        self.finalize(&descriptor.local_path)?;
        Ok(descriptor.local_path.clone())
    }

    /// Create the directory that will hold `dest`.
    async fn prepare_dir(&self, dest: &Path) -> Result<()> {
        if let Some(dir) = dest.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(|e| InstallError::io(dir, e))?;
            }
        }
        Ok(())
    }

    async fn download(&self, descriptor: &ArtifactDescriptor) -> Result<u64> {
        tracing::info!("Downloading {}", descriptor.download_url);
        self.fetcher
            .fetch(&descriptor.download_url, &descriptor.local_path)
            .await
    }

    fn finalize(&self, path: &Path) -> Result<()> {
        if let Err(e) = utils::make_executable(path) {
            utils::remove_partial(path);
            return Err(e);
        }
        Ok(())
    }
}
