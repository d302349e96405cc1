mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let res = common::get("/", None).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Dispatch Console API");
    assert!(res.body["endpoints"]["protected"].as_array().is_some());
    Ok(())
}

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let res = common::get("/health", None).await?;

    // OK with a database, SERVICE_UNAVAILABLE without one
    assert!(
        res.status == StatusCode::OK || res.status == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status
    );
    assert!(res.body["status"].is_string());
    Ok(())
}
