//! HTTP-level integration tests for the `/projects` resource.
//!
//! Covers role gating, owner scoping, the draft/submitted lifecycle and the
//! timeline summary.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_project, delete_auth, get_auth, login_as, post_auth, post_json_auth,
    project_body, put_json_auth,
};
use sqlx::PgPool;
use worktrack_core::access::Role;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_employee_creates_project(pool: PgPool) {
    let (alice, token) = login_as(&pool, "alice", Role::Employee).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/v1/projects", project_body("Plant A"), &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Plant A");
    assert_eq!(json["data"]["owner_id"], alice);
    assert_eq!(json["data"]["is_submitted"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_director_cannot_create_project(pool: PgPool) {
    let (_, token) = login_as(&pool, "dana", Role::Director).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/v1/projects", project_body("Nope"), &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_invalid_fields(pool: PgPool) {
    let (_, token) = login_as(&pool, "alice", Role::Employee).await;
    let app = common::build_test_app(pool);

    let mut body = project_body("x");
    body["name"] = serde_json::json!("");
    let response = post_json_auth(app, "/api/v1/projects", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "name");
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_scoped_by_role(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let (_, bob) = login_as(&pool, "bob", Role::Employee).await;
    let (_, dana) = login_as(&pool, "dana", Role::Director).await;
    let app = common::build_test_app(pool);

    create_project(app.clone(), &alice, "A1").await;
    create_project(app.clone(), &alice, "A2").await;
    create_project(app.clone(), &bob, "B1").await;

    let json = body_json(get_auth(app.clone(), "/api/v1/projects", &alice).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get_auth(app.clone(), "/api/v1/projects", &bob).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = body_json(get_auth(app, "/api/v1/projects", &dana).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_query(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let app = common::build_test_app(pool);

    let wind = create_project(app.clone(), &alice, "Wind Farm").await;
    create_project(app.clone(), &alice, "Hydro Dam").await;
    post_auth(app.clone(), &format!("/api/v1/projects/{wind}/submit"), &alice).await;

    let json = body_json(get_auth(app.clone(), "/api/v1/projects?name=hydro", &alice).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Hydro Dam");

    let json =
        body_json(get_auth(app, "/api/v1/projects?is_submitted=true", &alice).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], wind);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_and_missing_projects_look_the_same(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let (_, bob) = login_as(&pool, "bob", Role::Employee).await;
    let app = common::build_test_app(pool);

    let id = create_project(app.clone(), &alice, "Private").await;

    let foreign = get_auth(app.clone(), &format!("/api/v1/projects/{id}"), &bob).await;
    let missing = get_auth(app, "/api/v1/projects/999999", &bob).await;

    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);
    assert_eq!(missing.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(foreign).await, body_json(missing).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_director_views_any_project(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let (_, dana) = login_as(&pool, "dana", Role::Director).await;
    let app = common::build_test_app(pool);

    let id = create_project(app.clone(), &alice, "Visible").await;
    let response = get_auth(app, &format!("/api/v1/projects/{id}"), &dana).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Visible");
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_updates_draft(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let app = common::build_test_app(pool);

    let id = create_project(app.clone(), &alice, "Old").await;
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{id}"),
        serde_json::json!({ "name": "New", "location": "Nagpur" }),
        &alice,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "New");
    assert_eq!(json["data"]["location"], "Nagpur");
    assert_eq!(json["data"]["company"], "Acme Power");
    assert_eq!(json["data"]["completion_date"], "2024-06-30");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_clears_completion_date_with_null(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let app = common::build_test_app(pool);

    let id = create_project(app.clone(), &alice, "Open-ended").await;
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}"),
        serde_json::json!({ "completion_date": null, "client_email": null }),
        &alice,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["completion_date"].is_null());
    assert!(json["data"]["client_email"].is_null());
    assert_eq!(json["data"]["name"], "Open-ended");

    let response = get_auth(app, &format!("/api/v1/projects/{id}/dashboard"), &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["days_left"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_owners_cannot_update(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let (_, bob) = login_as(&pool, "bob", Role::Employee).await;
    let (_, dana) = login_as(&pool, "dana", Role::Director).await;
    let app = common::build_test_app(pool);

    let id = create_project(app.clone(), &alice, "Mine").await;
    let uri = format!("/api/v1/projects/{id}");
    let body = serde_json::json!({ "name": "Theirs" });

    let response = put_json_auth(app.clone(), &uri, body.clone(), &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = put_json_auth(app, &uri, body, &dana).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_deletes_draft(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let app = common::build_test_app(pool);

    let id = create_project(app.clone(), &alice, "Doomed").await;
    let uri = format!("/api/v1/projects/{id}");

    let response = delete_auth(app.clone(), &uri, &alice).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &uri, &alice).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Submission lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submitted_project_is_read_only(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let app = common::build_test_app(pool);

    let id = create_project(app.clone(), &alice, "Done").await;
    let uri = format!("/api/v1/projects/{id}");

    let response = post_auth(app.clone(), &format!("{uri}/submit"), &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_submitted"], true);
    assert!(json["data"]["submission_date"].is_string());

    let response = put_json_auth(
        app.clone(),
        &uri,
        serde_json::json!({ "name": "Changed" }),
        &alice,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_auth(app.clone(), &format!("{uri}/submit"), &alice).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &alice).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Still readable.
    let response = get_auth(app, &uri, &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_director_may_submit_any_project(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let (_, dana) = login_as(&pool, "dana", Role::Director).await;
    let app = common::build_test_app(pool);

    let id = create_project(app.clone(), &alice, "Reviewed").await;
    let response = post_auth(app, &format!("/api/v1/projects/{id}/submit"), &dana).await;

    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_timeline_summarizes_visible_projects(pool: PgPool) {
    let (_, alice) = login_as(&pool, "alice", Role::Employee).await;
    let (_, bob) = login_as(&pool, "bob", Role::Employee).await;
    let app = common::build_test_app(pool);

    let id = create_project(app.clone(), &alice, "Tracked").await;
    create_project(app.clone(), &bob, "Someone else's").await;
    for (date, hours) in [("2024-06-10", 4.0), ("2024-06-12", 3.0)] {
        let response = post_json_auth(
            app.clone(),
            &format!("/api/v1/projects/{id}/work-logs"),
            serde_json::json!({ "date": date, "description": "site work", "hours_worked": hours }),
            &alice,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(app, "/api/v1/projects/timeline", &alice).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["project_id"], id);
    assert_eq!(entries[0]["total_hours"], 7.0);
    assert_eq!(entries[0]["active_days"], 2);
    assert_eq!(entries[0]["avg_daily_hours"], 3.5);
    // Completion 2024-06-30, today 2024-06-15.
    assert_eq!(entries[0]["days_left"], 15);
}
