//! # freeport-install
//!
//! Installs the prebuilt `freeport` binary published on GitHub releases.
//!
//! ## Overview
//!
//! The installer resolves the host platform to a release artifact name,
//! downloads it from `https://github.com/<owner>/<repo>/releases/download/v<version>/`,
//! and places an executable copy in the install directory:
//!
//! ```text
//! resolve (os, arch) -> locate artifact -> fetch (bounded redirects) -> chmod 755
//! ```
//!
//! Any failure leaves no partial file behind and is reported together with a
//! manual installation command (`go install ...` or `brew install ...`).
//!
//! ## Usage
//!
//! ```bash
//! # Install for the current machine into ./bin
//! freeport-install
//!
//! # Install a specific version somewhere else
//! freeport-install --release-version 0.1.0 --install-dir ~/.local/bin
//!
//! # Show what would be downloaded
//! freeport-install --os linux --arch x64 --dry-run
//! ```
//!
//! ## Configuration
//!
//! Defaults can be set in `freeport-install.toml` under the user config
//! directory, or in a file passed with `--config`.

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration file handling and merging with command-line flags
pub mod config;

/// Error types and error handling utilities
pub mod error;

/// HTTP download with bounded redirect following
pub mod fetcher;

/// Install pipeline and its stages
pub mod installer;

/// Host platform resolution
pub mod platform;

/// Release coordinates and artifact naming
pub mod release;

/// Failure diagnostics and fallback instructions
pub mod report;

/// Filesystem helpers for permissions and cleanup
pub mod utils;
