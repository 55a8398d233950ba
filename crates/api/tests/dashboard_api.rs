//! HTTP-level integration tests for the project dashboard.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_project, get_auth, login_as, post_json_auth};
use sqlx::PgPool;
use worktrack_core::access::Role;

async fn log(app: axum::Router, token: &str, project_id: i64, date: &str, hours: f64) {
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/work-logs"),
        serde_json::json!({ "date": date, "description": "work", "hours_worked": hours }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_dashboard(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let app = common::build_test_app(pool);
    let id = create_project(app.clone(), &alice, "Quiet").await;

    let response = get_auth(app, &format!("/api/v1/projects/{id}/dashboard"), &alice).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["total_hours"], 0.0);
    assert_eq!(data["active_days"], 0);
    assert_eq!(data["avg_daily_hours"], 0.0);
    assert!(data["workload_by_user"].as_array().unwrap().is_empty());
    assert!(data["daily_trend"].as_array().unwrap().is_empty());
    assert!(data["cumulative"].as_array().unwrap().is_empty());
    assert!(data["idle_days"].as_array().unwrap().is_empty());
    assert_eq!(data["days_left"], 15);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_aggregates_logs(pool: PgPool) {
    let (alice_id, alice) = login_as(&pool, "alice", Role::Employee).await;
    let (_, dana) = login_as(&pool, "dana", Role::Director).await;
    let app = common::build_test_app(pool);
    let id = create_project(app.clone(), &alice, "Busy").await;

    // Logged out of order on days 1, 3 and 7.
    log(app.clone(), &alice, id, "2024-06-07", 5.0).await;
    log(app.clone(), &alice, id, "2024-06-01", 2.0).await;
    log(app.clone(), &alice, id, "2024-06-03", 3.0).await;

    let response = get_auth(app, &format!("/api/v1/projects/{id}/dashboard"), &dana).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();

    assert_eq!(data["total_hours"], 10.0);
    assert_eq!(data["active_days"], 3);
    assert_eq!(data["avg_daily_hours"], 3.3);

    let workload = data["workload_by_user"].as_array().unwrap();
    assert_eq!(workload.len(), 1);
    assert_eq!(workload[0]["user_id"], alice_id);
    assert_eq!(workload[0]["username"], "alice");

    let cumulative: Vec<f64> = data["cumulative"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["cumulative"].as_f64().unwrap())
        .collect();
    assert_eq!(cumulative, vec![2.0, 5.0, 10.0]);

    assert_eq!(
        data["idle_days"],
        serde_json::json!([
            { "from": "2024-06-02", "to": "2024-06-02", "days": 1 },
            { "from": "2024-06-04", "to": "2024-06-06", "days": 3 },
        ])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_is_owner_or_director_only(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let (_, bob) = login_as(&pool, "bob", Role::Employee).await;
    let app = common::build_test_app(pool);
    let id = create_project(app.clone(), &alice, "Private").await;

    let response = get_auth(app, &format!("/api/v1/projects/{id}/dashboard"), &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
