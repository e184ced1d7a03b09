use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use updoot::install::{Config, install};

/// updoot - Go toolchain updater
///
/// Downloads the latest stable Go release for this machine and installs it
/// over the configured GOROOT, replacing whatever was there before.
///
/// Invoked with no arguments it performs the full install-latest flow.
#[derive(Parser, Debug)]
#[command(author, version = env!("UPDOOT_VERSION"), about)]
struct Cli {
    /// Install root directory (overrides defaults; also via GOROOT)
    #[arg(
        long = "root",
        short = 'r',
        env = "GOROOT",
        value_name = "PATH"
    )]
    install_root: Option<PathBuf>,

    /// Go download site URL (defaults to https://go.dev)
    #[arg(long = "base-url", value_name = "URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let runtime = updoot::runtime::RealRuntime;

    let config = Config::new(cli.install_root, cli.base_url)?;
    install(&runtime, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_arguments() {
        let cli = Cli::try_parse_from(["updoot"]).unwrap();
        assert_eq!(cli.base_url, None);
    }

    #[test]
    fn test_cli_root_parsing() {
        let cli = Cli::try_parse_from(["updoot", "--root", "/opt/go"]).unwrap();
        assert_eq!(cli.install_root, Some(PathBuf::from("/opt/go")));

        let cli = Cli::try_parse_from(["updoot", "-r", "/opt/go"]).unwrap();
        assert_eq!(cli.install_root, Some(PathBuf::from("/opt/go")));
    }

    #[test]
    fn test_cli_base_url_parsing() {
        let cli = Cli::try_parse_from(["updoot", "--base-url", "http://localhost:8080"]).unwrap();
        assert_eq!(cli.base_url, Some("http://localhost:8080".to_string()));
    }

    #[test]
    fn test_cli_rejects_positional_arguments() {
        let result = Cli::try_parse_from(["updoot", "install-latest"]);
        assert!(result.is_err());
    }
}
