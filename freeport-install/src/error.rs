use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Unsupported platform: {host_os}-{host_arch}")]
    UnsupportedPlatform { host_os: String, host_arch: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to download {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Timed out after {}s while downloading {url}", timeout.as_secs())]
    Timeout { url: String, timeout: Duration },

    #[error("Download failed for {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Redirect from {url} (HTTP {status}) has no usable Location header")]
    MissingLocation { url: String, status: u16 },

    #[error("Invalid download URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Too many redirects (more than {max}) while downloading {url}")]
    TooManyRedirects { url: String, max: usize },

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error at {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// Failure classes an install can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedPlatform,
    NetworkFailure,
    IoFailure,
    Config,
}

impl InstallError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InstallError::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
            InstallError::Io { .. } => ErrorKind::IoFailure,
            InstallError::Config { .. } => ErrorKind::Config,
            InstallError::Http(_)
            | InstallError::Request { .. }
            | InstallError::Timeout { .. }
            | InstallError::HttpStatus { .. }
            | InstallError::MissingLocation { .. }
            | InstallError::InvalidUrl { .. }
            | InstallError::TooManyRedirects { .. } => ErrorKind::NetworkFailure,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let unsupported = InstallError::UnsupportedPlatform {
            host_os: "win32".to_string(),
            host_arch: "arm64".to_string(),
        };
        assert_eq!(unsupported.kind(), ErrorKind::UnsupportedPlatform);
        assert_eq!(unsupported.to_string(), "Unsupported platform: win32-arm64");

        let status = InstallError::HttpStatus {
            url: "https://example.com/a".to_string(),
            status: 404,
        };
        assert_eq!(status.kind(), ErrorKind::NetworkFailure);

        let redirects = InstallError::TooManyRedirects {
            url: "https://example.com/a".to_string(),
            max: 5,
        };
        assert_eq!(redirects.kind(), ErrorKind::NetworkFailure);

        let io = InstallError::io(
            "/tmp/bin/freeport",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.kind(), ErrorKind::IoFailure);
        assert!(io.to_string().contains("/tmp/bin/freeport"));

        let config = InstallError::Config {
            path: PathBuf::from("freeport-install.toml"),
            message: "invalid type".to_string(),
        };
        assert_eq!(config.kind(), ErrorKind::Config);
        assert_eq!(
            config.to_string(),
            "Configuration error at freeport-install.toml: invalid type"
        );
    }

    #[test]
    fn test_timeout_message() {
        let err = InstallError::Timeout {
            url: "https://example.com/a".to_string(),
            timeout: Duration::from_secs(60),
        };
        assert_eq!(
            err.to_string(),
            "Timed out after 60s while downloading https://example.com/a"
        );
    }
}
