use anyhow::Result;
use tracing::info;

use chamber_workflow::config::Config;
use chamber_workflow::logging::init_logging;

/// Prepares the database: loads configuration, connects and applies migrations.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_logging(&config.logging);

    info!("Starting chamber-workflow v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.database.pool_config()).await?;
    let stats = persistence::metrics::record_pool_metrics(&pool);
    info!(connections = stats.total, idle = stats.idle, "Connected to database");

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;

    info!(
        default_annual_days = config.leave.default_annual_days,
        "Database ready"
    );
    pool.close().await;
    Ok(())
}
