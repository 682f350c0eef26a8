pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

use clap::Parser;
pub use config::Config;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = cli::Cli::parse();

    match args.command {
        cli::Commands::Add {
            name,
            imdb_link,
            status,
            last_watched,
            rating,
            notify,
        } => {
            cli::cmd_add_show(
                &config,
                &name,
                &imdb_link,
                status,
                last_watched,
                rating,
                notify,
            )
            .await
        }

        cli::Commands::Update {
            name,
            new_name,
            last_watched,
            rating,
            notify,
            status,
        } => {
            cli::cmd_update_show(&config, &name, new_name, last_watched, rating, notify, status)
                .await
        }

        cli::Commands::Remove { name } => cli::cmd_remove_show(&config, &name).await,

        cli::Commands::Catalog => cli::cmd_catalog(&config).await,

        cli::Commands::List => cli::cmd_list_episodes(&config).await,

        cli::Commands::Sync => cli::cmd_sync(&config).await,

        cli::Commands::Init => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }
    }
}
