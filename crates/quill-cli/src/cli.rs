use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "quill",
    about = "Quill: article CRUD service over an embedded key-value store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum BackendArg {
    Disk,
    Memory,
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Listen address, e.g. 0.0.0.0:8080
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Directory holding the database file
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    #[arg(long)]
    pub backend: Option<BackendArg>,
    /// Report internal storage failures as 500 instead of 404
    #[arg(long)]
    pub strict_errors: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "quill",
            "serve",
            "--bind",
            "127.0.0.1:9000",
            "--data-dir",
            "/srv/quill",
            "--backend",
            "memory",
            "--strict-errors",
        ])
        .unwrap();
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind.unwrap().port(), 9000);
                assert_eq!(args.data_dir.unwrap(), PathBuf::from("/srv/quill"));
                assert!(matches!(args.backend, Some(BackendArg::Memory)));
                assert!(args.strict_errors);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["quill", "config", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        assert!(Cli::try_parse_from(["quill", "serve", "--bind", "nowhere"]).is_err());
    }
}
