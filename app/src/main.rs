use clap::Parser;
use pumpcap_lib::cli::CliArgs;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    pumpcap_lib::run(CliArgs::parse()).await
}
