use std::sync::Arc;

use clap::Parser;
use portal_core::Repository;
use portal_gateway::auth::BearerAuthenticator;
use portal_gateway::cli::{Cli, StorageBackendArg};
use portal_gateway::{App, AppState};
use portal_generator::RandomGenerator;
use portal_redirector::RedirectorService;
use portal_shortener::ShortenerService;
use portal_stats::StatsService;
use portal_storage::{InMemoryRepository, MySqlRepository};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let state = build_state(&cli).await?;

    let listener = tokio::net::TcpListener::bind(cli.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "starting gateway server");
    axum::serve(listener, App::router(state)).await?;

    Ok(())
}

async fn build_state(cli: &Cli) -> anyhow::Result<AppState> {
    match cli.storage {
        StorageBackendArg::InMemory => Ok(assemble(cli, InMemoryRepository::new())),
        StorageBackendArg::Mysql => {
            let dsn = cli
                .mysql_dsn
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("--mysql-dsn is required for the mysql backend"))?;
            let repository = MySqlRepository::connect(dsn).await?;
            Ok(assemble(cli, repository))
        }
    }
}

fn assemble<R>(cli: &Cli, repository: R) -> AppState
where
    R: Repository + Clone,
{
    let generator = RandomGenerator::new(usize::from(cli.code_length));
    let shortener = ShortenerService::new(repository.clone(), generator)
        .with_max_attempts(usize::from(cli.generation_attempts));
    let redirector = RedirectorService::new(repository.clone());
    let stats = StatsService::new(repository, &cli.public_base_url);

    AppState::new(
        Arc::new(shortener),
        Arc::new(redirector),
        Arc::new(stats),
        BearerAuthenticator::new(cli.stats_token.clone()),
        &cli.public_base_url,
        cli.default_expiration(),
    )
}
