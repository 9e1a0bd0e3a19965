use clap::Parser;
use freeport_install::cli::Args;
use freeport_install::config::Config;
use freeport_install::platform::HostIdentifiers;
use std::path::PathBuf;

#[test]
fn test_parse_no_flags() {
    let args = Args::try_parse_from(["freeport-install"]).unwrap();

    assert!(!args.dry_run);
    assert!(!args.verbose);
    assert!(args.config.is_none());
    assert_eq!(args.host().os, std::env::consts::OS);
}

#[test]
fn test_host_override() {
    let args =
        Args::try_parse_from(["freeport-install", "--os", "darwin", "--arch", "arm64"]).unwrap();

    assert_eq!(args.host(), HostIdentifiers::new("darwin", "arm64"));
}

#[test]
fn test_partial_host_override() {
    let args = Args::try_parse_from(["freeport-install", "--arch", "x64"]).unwrap();

    let host = args.host();
    assert_eq!(host.os, std::env::consts::OS);
    assert_eq!(host.arch, "x64");
}

#[test]
fn test_release_flags() {
    let args = Args::try_parse_from([
        "freeport-install",
        "--owner",
        "someone",
        "--repo",
        "fork",
        "--release-version",
        "v1.2.3",
        "--base-url",
        "http://localhost:9000",
        "-d",
        "/usr/local/bin",
    ])
    .unwrap();

    let settings = Config::default().merge_with_args(&args);
    assert_eq!(settings.coordinate.owner, "someone");
    assert_eq!(settings.coordinate.repo, "fork");
    assert_eq!(settings.coordinate.version, "1.2.3");
    assert_eq!(settings.coordinate.tag(), "v1.2.3");
    assert_eq!(settings.coordinate.base_url, "http://localhost:9000");
    assert_eq!(settings.install_dir, PathBuf::from("/usr/local/bin"));
}

#[test]
fn test_install_dir_expansion() {
    let args = Args::try_parse_from(["freeport-install", "--install-dir", "~/custom/bin"]).unwrap();

    let settings = Config::default().merge_with_args(&args);
    assert!(!settings.install_dir.to_string_lossy().starts_with('~'));
}

#[test]
fn test_invalid_timeout_rejected() {
    let result = Args::try_parse_from(["freeport-install", "--timeout", "soon"]);
    assert!(result.is_err());
}

#[test]
fn test_config_path_override() {
    let args = Args::try_parse_from(["freeport-install", "--config", "custom.toml"]).unwrap();
    assert_eq!(args.config_path(), PathBuf::from("custom.toml"));

    let args = Args::try_parse_from(["freeport-install"]).unwrap();
    assert_eq!(args.config_path(), Config::default_path());
}
