use anyhow::Context;
use chatgate::adapter::inbound::cli::command::{CheckCommand, Cli, Commands};
use chatgate::adapter::inbound::cli::{check, serve};
use clap::Parser;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve(args) => serve::execute(&args)
            .await
            .context("gateway exited with an error"),
        Commands::Check(CheckCommand::Config(arg)) => check::execute_config(&arg.config)
            .with_context(|| format!("invalid configuration in {}", arg.config.display())),
    }
}
