use anyhow::Context;

use crate::config;
use crate::database::{CastingStore, DatabaseManager, PgRepository};

pub async fn handle() -> anyhow::Result<()> {
    let config = config::config();
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let repository = PgRepository::new(pool);
    repository.migrate().await.context("failed to create tables")?;
    repository.pool().close().await;

    println!("Tables are up to date");
    Ok(())
}
