//! Turns an [`InstallFailure`] into operator-facing output and an exit status.

use std::error::Error as _;
use std::io::Write;
use std::process::ExitCode;

use crate::error::{ErrorKind, InstallError};
use crate::installer::InstallFailure;
use crate::release::{ReleaseCoordinate, TOOL_NAME};
use crate::utils;

/// Exit status for every pipeline failure.
pub const FAILURE_EXIT_CODE: u8 = 1;

/// Alternative ways to get the tool when the prebuilt binary cannot be installed.
pub fn fallback_instructions(coord: &ReleaseCoordinate) -> Vec<String> {
    vec![
        format!(
            "go install github.com/{}/{}/cmd/{TOOL_NAME}@{}",
            coord.owner,
            coord.repo,
            coord.tag()
        ),
        format!("brew install {}/{TOOL_NAME}/{TOOL_NAME}", coord.owner),
    ]
}

/// Build the diagnostic lines for a failure.
pub fn render(failure: &InstallFailure, coord: &ReleaseCoordinate) -> Vec<String> {
    let mut lines = vec![format!("Error {}: {}", failure.stage, failure.error)];
    lines.extend(causes(&failure.error).into_iter().map(|c| format!("Caused by: {c}")));

    match failure.error.kind() {
        ErrorKind::UnsupportedPlatform => {
            let supported = crate::platform::SUPPORTED_PLATFORMS
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("Supported platforms: {supported}"));
        }
        ErrorKind::Config => {}
        ErrorKind::NetworkFailure | ErrorKind::IoFailure => {
            let mut instructions = fallback_instructions(coord).into_iter();
            if let Some(primary) = instructions.next() {
                lines.push(format!("Please install via: {primary}"));
            }
            for alternative in instructions {
                lines.push(format!("Or via: {alternative}"));
            }
        }
    }

    lines
}

/// Source chain of `error`, skipping causes already spelled out by the message above them.
fn causes(error: &InstallError) -> Vec<String> {
    let mut shown = error.to_string();
    let mut causes = Vec::new();
    let mut source = error.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !shown.contains(&text) {
            causes.push(text.clone());
        }
        shown = text;
        source = cause.source();
    }

    causes
}

/// Clean up after a failure, write the diagnostic to `out`, and return the exit status.
pub fn report<W: Write>(
    failure: &InstallFailure,
    coord: &ReleaseCoordinate,
    out: &mut W,
) -> ExitCode {
    if let Some(dest) = &failure.destination {
        utils::remove_partial(dest);
    }

    tracing::debug!(stage = %failure.stage, kind = ?failure.error.kind(), "{}", failure.error);

    for line in render(failure, coord) {
        // Nothing left to report to if the diagnostics channel itself is broken
        let _ = writeln!(out, "{line}");
    }

    ExitCode::from(FAILURE_EXIT_CODE)
}
