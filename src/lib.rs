pub mod cli;
pub mod clients;
pub mod config;
pub mod domain;
pub mod fetch;
pub mod models;
pub mod screen;
pub mod services;
pub mod state;
pub mod store;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
pub use config::Config;
use config::GeneralConfig;
use tracing_subscriber::EnvFilter;

fn init_tracing(general: &GeneralConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let mut log_level = general.log_level.clone();
    if general.suppress_connection_errors {
        log_level.push_str(",reqwest=off,hyper_util=off");
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let json = general.log_format.eq_ignore_ascii_case("json");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .try_init()
        .context("Failed to initialize tracing")
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    init_tracing(&config.general)?;

    let cli = Cli::parse();
    cli::dispatch(config, cli.command).await
}
