//! Catalog admin CLI.
//!
//! This is the entry point for the `catadmin` binary. The session token is
//! kept in `<state-dir>/storage.json` between runs.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_admin_client::AdminClient;
use catalog_admin_core::{FileStorage, TokenStore};

use cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays machine-readable
    let default_filter = if args.debug {
        "warn,catalog_admin=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.client_config();
    let token_path = args.token_path();
    tracing::debug!(
        graphql_url = %config.graphql_url,
        token_path = %token_path.display(),
        "CLI configuration loaded"
    );

    let tokens = TokenStore::new(FileStorage::new(token_path));
    let client = AdminClient::new(&config, tokens)?;

    commands::run(&client, args.command).await
}
