use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode, Url};
use tokio::io::AsyncWriteExt;

use crate::error::{InstallError, Result};
use crate::utils;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Limits applied to a single download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Downloads release assets, following redirects itself so the hop count stays bounded.
pub struct Fetcher {
    http_client: Client,
    options: FetchOptions,
}

impl Fetcher {
    pub fn new(options: FetchOptions) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("freeport-install/", env!("CARGO_PKG_VERSION")))
            .redirect(Policy::none())
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            http_client,
            options,
        })
    }

    /// Download `url` into `dest`, overwriting it. Returns the number of bytes written.
    ///
    /// On failure nothing is left at `dest`.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let result = match self.follow_redirects(url).await {
            Ok(response) => self.write_body(response, dest).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::debug!("Download of {} failed: {}", url, e);
            utils::remove_partial(dest);
        }

        result
    }

    async fn follow_redirects(&self, url: &str) -> Result<Response> {
        let mut current = Url::parse(url).map_err(|e| InstallError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let mut hops = 0;

        loop {
            tracing::debug!("GET {}", current);
            let response = self
                .http_client
                .get(current.clone())
                .send()
                .await
                .map_err(|e| self.request_error(current.as_str(), e))?;

            let status = response.status();
            if is_redirect(status) {
                if hops >= self.options.max_redirects {
                    return Err(InstallError::TooManyRedirects {
                        url: url.to_string(),
                        max: self.options.max_redirects,
                    });
                }

                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .ok_or_else(|| InstallError::MissingLocation {
                        url: current.to_string(),
                        status: status.as_u16(),
                    })?;

                // Location may be relative to the URL that produced it
                let next = current.join(location).map_err(|e| InstallError::InvalidUrl {
                    url: location.to_string(),
                    reason: e.to_string(),
                })?;

                hops += 1;
                tracing::debug!("Redirect {} ({}) -> {}", hops, status, next);
                current = next;
                continue;
            }

            if !status.is_success() {
                return Err(InstallError::HttpStatus {
                    url: current.to_string(),
                    status: status.as_u16(),
                });
            }

            return Ok(response);
        }
    }

    async fn write_body(&self, response: Response, dest: &Path) -> Result<u64> {
        let url = response.url().to_string();
        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| InstallError::io(dest, e))?;

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| self.request_error(&url, e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| InstallError::io(dest, e))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| InstallError::io(dest, e))?;
        tracing::debug!("Wrote {} bytes to {}", written, dest.display());

        Ok(written)
    }

    fn request_error(&self, url: &str, source: reqwest::Error) -> InstallError {
        if source.is_timeout() {
            InstallError::Timeout {
                url: url.to_string(),
                timeout: self.options.timeout,
            }
        } else {
            InstallError::Request {
                url: url.to_string(),
                source,
            }
        }
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}
