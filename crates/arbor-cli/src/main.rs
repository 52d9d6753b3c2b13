//! arboradm binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use arbor_cli::{dispatch, ApiClient, Cli, CliError, Config, OutputFormat};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Completion runs offline.
    let (complete, tokens) = cli.completion_request();
    if complete {
        return match dispatch::complete(tokens, &mut io::stdout().lock()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = Config::load(&cli.overrides())?;
    let client = ApiClient::new(config)?;
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();
    dispatch::run_command(&cli.tokens, &client, &format, &mut stdout).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_config_file_fails() {
        let cli = Cli::parse_from([
            "arboradm",
            "--config",
            "/nonexistent/arboradm.json",
            "groups",
        ]);
        assert!(matches!(run(&cli).await, Err(CliError::Config(_))));
    }

    #[tokio::test]
    async fn unreachable_server_fails() {
        let cli = Cli::parse_from([
            "arboradm",
            "--api-url",
            "http://127.0.0.1:9/",
            "--timeout",
            "2",
            "environments",
            "list",
        ]);
        assert!(run(&cli).await.is_err());
    }
}
