use dotenvy::dotenv;
use inventory_tracker::{
    bot,
    config::{database, settings},
    core::{catalog, movement::MovementEngine, staff},
    errors::{Error, Result},
};
use std::{env, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also come from the environment
    dotenv().ok();

    // 3. Load settings (seeds and engine tuning)
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {e}"))?;

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 5. Seed reference data
    let types = catalog::seed_product_types(&db, &settings.product_types).await?;
    let members = staff::seed_staff(&db, &settings.staff).await?;
    info!(types, staff = members, "Seeded reference data");

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    let timeout = Duration::from_secs(settings.engine.transaction_timeout_secs);
    bot::run_bot(token, MovementEngine::new(db, timeout)).await
}
