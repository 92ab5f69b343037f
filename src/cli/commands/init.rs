use serde_json::json;

use crate::cli::{utils, OutputFormat};
use crate::database::DatabaseManager;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let database = utils::load_database_config()?;

    let pool = DatabaseManager::connect(&database).await?;
    let result = DatabaseManager::ensure_schema(&pool).await;
    DatabaseManager::disconnect(pool).await;
    result?;

    utils::output_success(
        &output_format,
        "Database schema is ready",
        Some(json!({ "database": DatabaseManager::redacted_url(&database.url)? })),
    )
}
