use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils, OutputFormat};
use crate::config;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create the database file and any missing tables (uses DATABASE_URL)")]
    Init,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DbCommands::Init => {
            let database = &config::config().database;
            let pool = DatabaseManager::connect(database)
                .await
                .with_context(|| format!("failed to open database {}", database.url))?;
            DatabaseManager::ensure_schema(&pool).await?;
            pool.close().await;

            let data = json!({ "database": database.url, "status": "ready" });
            utils::output(output_format, &data, |_| println!("Database ready: {}", database.url))
        }
    }
}
