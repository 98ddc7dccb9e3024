use clap::Parser;
use policy_advisor::cli::{self, Cli, Command};
use policy_advisor::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Command::Serve => cli::serve::run(config).await,
        Command::Ask(args) => cli::ask::run(config, args).await,
    }
}
