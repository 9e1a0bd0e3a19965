//! Host platform resolution.
//!
//! Raw host identifiers are normalized to the `os`/`arch` names used by the
//! release artifacts (`freeport-linux-amd64`, `freeport-windows-amd64.exe`, ...).
//! Both the Node-style identifiers (`win32`, `x64`) and Rust's
//! `std::env::consts` identifiers (`windows`, `x86_64`) are accepted.

use std::fmt;

use crate::error::{InstallError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Darwin,
    Linux,
    Windows,
}

impl Os {
    fn from_host(id: &str) -> Option<Self> {
        match id {
            "darwin" | "macos" => Some(Os::Darwin),
            "linux" => Some(Os::Linux),
            "win32" | "windows" => Some(Os::Windows),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Darwin => "darwin",
            Os::Linux => "linux",
            Os::Windows => "windows",
        }
    }

    /// Suffix appended to executable file names on this OS.
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            Os::Windows => ".exe",
            Os::Darwin | Os::Linux => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Arch {
    fn from_host(id: &str) -> Option<Self> {
        match id {
            "x64" | "x86_64" | "amd64" => Some(Arch::Amd64),
            "arm64" | "aarch64" => Some(Arch::Arm64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTuple {
    pub os: Os,
    pub arch: Arch,
}

impl fmt::Display for PlatformTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.as_str(), self.arch.as_str())
    }
}

/// Platforms for which release artifacts are published.
pub const SUPPORTED_PLATFORMS: &[PlatformTuple] = &[
    PlatformTuple {
        os: Os::Darwin,
        arch: Arch::Amd64,
    },
    PlatformTuple {
        os: Os::Darwin,
        arch: Arch::Arm64,
    },
    PlatformTuple {
        os: Os::Linux,
        arch: Arch::Amd64,
    },
    PlatformTuple {
        os: Os::Linux,
        arch: Arch::Arm64,
    },
    PlatformTuple {
        os: Os::Windows,
        arch: Arch::Amd64,
    },
];

/// Raw, unnormalized identifiers describing the host to install for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentifiers {
    pub os: String,
    pub arch: String,
}

impl HostIdentifiers {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Identifiers of the machine this process runs on.
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }
}

/// Map raw host identifiers onto a supported [`PlatformTuple`].
pub fn resolve(host_os: &str, host_arch: &str) -> Result<PlatformTuple> {
    let unsupported = || InstallError::UnsupportedPlatform {
        host_os: host_os.to_string(),
        host_arch: host_arch.to_string(),
    };

    let os = Os::from_host(host_os).ok_or_else(unsupported)?;
    let arch = Arch::from_host(host_arch).ok_or_else(unsupported)?;
    let tuple = PlatformTuple { os, arch };

    if !SUPPORTED_PLATFORMS.contains(&tuple) {
        return Err(unsupported());
    }

    tracing::debug!("Resolved host {}-{} to {}", host_os, host_arch, tuple);
    Ok(tuple)
}
