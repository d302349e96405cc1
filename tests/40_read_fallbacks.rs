mod common;

use anyhow::Result;
use axum::http::StatusCode;
use dispatch_console::database::models::Role;

// These pass with or without a database: reads degrade to placeholder bodies

#[tokio::test]
async fn logs_always_answer_with_rows() -> Result<()> {
    let token = common::token_for(Role::Operador);

    let res = common::get("/api/logs?limit=10", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    let rows = res.body.as_array().expect("array");
    assert!(rows.len() <= 10);
    Ok(())
}

#[tokio::test]
async fn bad_log_dates_are_rejected() -> Result<()> {
    let token = common::token_for(Role::Operador);

    let res = common::get("/api/logs?startDate=yesterday", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"]["startDate"].is_string());
    Ok(())
}

#[tokio::test]
async fn users_and_settings_degrade_to_empty() -> Result<()> {
    let token = common::token_for(Role::Supervisor);

    let res = common::get("/api/users", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.is_array());
    for user in res.body.as_array().unwrap() {
        assert!(user.get("password").is_none());
    }

    let res = common::get("/api/settings", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.is_object());
    Ok(())
}

#[tokio::test]
async fn whatsapp_status_is_always_reported() -> Result<()> {
    let token = common::token_for(Role::Operador);

    let res = common::get("/api/whatsapp/status", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    let status = res.body["status"].as_str().expect("status");
    assert!(status == "connected" || status == "disconnected");
    Ok(())
}

#[tokio::test]
async fn log_stats_always_cover_seven_days() -> Result<()> {
    let token = common::token_for(Role::Supervisor);

    let res = common::get("/api/logs/stats", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    let days = res.body["last7Days"].as_array().expect("days");
    assert_eq!(days.len(), 7);
    let today = chrono::Utc::now().date_naive().to_string();
    assert_eq!(days[6]["date"], today.as_str());

    let total = res.body["total"].as_u64().expect("total");
    let successful = res.body["successful"].as_u64().expect("successful");
    let failed = res.body["failed"].as_u64().expect("failed");
    assert_eq!(successful + failed, total);
    assert!(res.body["successRate"].as_u64().expect("rate") <= 100);

    let res = common::get("/api/logs/stats?startDate=soon", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"]["startDate"].is_string());
    Ok(())
}
