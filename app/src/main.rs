use clap::Parser;
use handlecheck_app::config::AppConfig;
use handlecheck_app::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load_with_env()?;

    run(cli, config).await
}
