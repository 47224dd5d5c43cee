//! pumpcap command-line application library

pub mod cli;
pub mod commands;

use std::process::ExitCode;

use anyhow::Context;
use pumpcap_core::{AppConfig, Error};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::CliArgs;

/// Run the CLI with parsed arguments
pub async fn run(args: CliArgs) -> ExitCode {
    init_tracing();

    match execute(&args).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = err
                .downcast_ref::<Error>()
                .map(|e| e.error_code())
                .unwrap_or("error");
            eprintln!("error [{}]: {:#}", code, err);
            ExitCode::FAILURE
        }
    }
}

async fn execute(args: &CliArgs) -> anyhow::Result<String> {
    let config = load_config(args)?;
    tracing::info!(
        network = %config.network,
        rpc = %config.rpc.url_for(config.network),
        "Starting pumpcap"
    );

    let report = commands::get_market_cap(&config, args)
        .await
        .with_context(|| format!("failed to price {}", args.mint))?;

    if args.json {
        serde_json::to_string_pretty(&report).context("failed to serialize report")
    } else {
        Ok(commands::format_report(&report))
    }
}

fn load_config(args: &CliArgs) -> anyhow::Result<AppConfig> {
    let config = match &args.config_path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    Ok(config.with_env_overrides())
}

/// Logs go to stderr so stdout stays machine-readable with `--json`
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}
