use std::path::Path;

use colored::Colorize;
use quill_server::{QuillServer, ServerConfig, StatusPolicy, StorageBackend};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    Ok(match path {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    })
}

/// Apply command-line overrides on top of the file (or default) config.
fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = dir.clone();
    }
    if let Some(backend) = &args.backend {
        config.storage.backend = match backend {
            BackendArg::Disk => StorageBackend::Disk,
            BackendArg::Memory => StorageBackend::Memory,
        };
    }
    if args.strict_errors {
        config.error_status = StatusPolicy::Strict;
    }
    Ok(config)
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    println!(
        "{} Quill on {} (data: {})",
        "Starting".green().bold(),
        config.bind_addr.to_string().bold(),
        config.storage.data_dir.display()
    );
    QuillServer::new(config).serve().await?;
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn serve_args(argv: &[&str]) -> ServeArgs {
        let mut full = vec!["quill", "serve"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Serve(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn defaults_without_flags() {
        let config = resolve_config(&serve_args(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.toml");
        std::fs::write(
            &path,
            "bind_addr = \"127.0.0.1:7000\"\n[storage]\nbackend = \"memory\"\n",
        )
        .unwrap();
        let path_str = path.to_str().unwrap();

        let config = resolve_config(&serve_args(&["--config", path_str])).unwrap();
        assert_eq!(config.bind_addr.port(), 7000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);

        let config = resolve_config(&serve_args(&[
            "--config",
            path_str,
            "--bind",
            "127.0.0.1:7001",
            "--backend",
            "disk",
            "--strict-errors",
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 7001);
        assert_eq!(config.storage.backend, StorageBackend::Disk);
        assert_eq!(config.error_status, StatusPolicy::Strict);
    }

    #[test]
    fn missing_config_file_is_error() {
        assert!(resolve_config(&serve_args(&["--config", "/nonexistent/quill.toml"])).is_err());
    }
}
