use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use freeport_install::cli::Args;
use freeport_install::config::Config;
use freeport_install::fetcher::Fetcher;
use freeport_install::installer::{self, InstallFailure, Installer, Stage};
use freeport_install::release::ReleaseCoordinate;
use freeport_install::report;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize tracing; --verbose only matters when RUST_LOG is unset
    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = args.config_path();
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            let failure = InstallFailure::new(Stage::Configuring, e, None);
            return Ok(report::report(
                &failure,
                &ReleaseCoordinate::default(),
                &mut std::io::stderr(),
            ));
        }
    };
    let settings = config.merge_with_args(&args);

    if args.dry_run {
        return match installer::plan(&settings.host, &settings.coordinate, &settings.install_dir) {
            Ok(plan) => {
                println!("Platform: {}", plan.platform);
                println!("URL: {}", plan.artifact.download_url);
                println!("Destination: {}", plan.artifact.local_path.display());
                Ok(ExitCode::SUCCESS)
            }
            Err(failure) => Ok(report::report(
                &failure,
                &settings.coordinate,
                &mut std::io::stderr(),
            )),
        };
    }

    let fetcher = Fetcher::new(settings.fetch.clone()).context("Failed to create HTTP client")?;
    let installer = Installer::new(fetcher);

    match installer
        .run(&settings.host, &settings.coordinate, &settings.install_dir)
        .await
    {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(failure) => Ok(report::report(
            &failure,
            &settings.coordinate,
            &mut std::io::stderr(),
        )),
    }
}
