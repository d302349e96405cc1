use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::schema;
use crate::services::auth_service;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    schema::ensure_schema().await?;
    let admin = auth_service::ensure_bootstrap_admin().await?;

    output_success(
        output_format,
        "Tables ready",
        Some(json!({ "tables": schema::TABLES, "admin": admin })),
    )
}
