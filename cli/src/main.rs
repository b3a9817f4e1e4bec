use anyhow::Result;
use clap::Parser;
use krishi::args::Cli;
use krishi::commands;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(level));

    let mut stdout = std::io::stdout().lock();
    commands::execute(cli, &mut stdout).await
}
