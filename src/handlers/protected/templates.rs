use axum::Json;
use serde::Deserialize;

use crate::composer::{templates_for, MessageKind, Template};
use crate::extract::ApiQuery;

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

/// GET /api/templates?type=meeting|certificate - Compiled-in template catalog
pub async fn get(ApiQuery(query): ApiQuery<TemplateQuery>) -> Json<&'static [Template]> {
    Json(templates_for(query.kind))
}
