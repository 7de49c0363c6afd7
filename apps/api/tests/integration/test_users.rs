use super::helpers::{
    ALICE, InMemoryUserRepository, MISSING_CITY, assert_status, expect_status, get, read_json,
    send, spawn_app, spawn_app_with, upload_csv,
};
use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn empty_table_lists_no_users() {
    let app = spawn_app();

    let res = expect_status(send(&app.app, get("/get_users")).await, StatusCode::OK).await;
    let users: Value = read_json(res).await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn inserted_rows_are_listed_with_their_values() {
    let app = spawn_app();
    expect_status(
        upload_csv(&app, &[ALICE, MISSING_CITY]).await,
        StatusCode::OK,
    )
    .await;

    let res = expect_status(send(&app.app, get("/get_users")).await, StatusCode::OK).await;
    let users: Value = read_json(res).await;
    assert_eq!(
        users,
        json!([{
            "user": "alice",
            "role": "admin",
            "street": "1 Main",
            "city": "X",
            "country1": "US",
            "pincode": "12345",
            "state": "CA",
            "country2": "US"
        }])
    );
}

#[tokio::test]
async fn listing_failure_is_a_server_error() {
    let app = spawn_app_with(InMemoryUserRepository::failing("Unknown database 'csvflask'"));

    let res = send(&app.app, get("/get_users")).await;
    assert_status(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Database error: Unknown database 'csvflask'");
}

#[tokio::test]
async fn health_reflects_database_reachability() {
    let app = spawn_app();
    let res = expect_status(send(&app.app, get("/health")).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "up");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let down = spawn_app_with(InMemoryUserRepository::failing("gone"));
    let res = send(&down.app, get("/health")).await;
    assert_status(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn docs_list_every_route() {
    let app = spawn_app();
    let res = expect_status(send(&app.app, get("/docs")).await, StatusCode::OK).await;
    let docs: Value = read_json(res).await;
    for path in ["/upload_csv", "/download_errors", "/get_users", "/health"] {
        assert!(docs["paths"].get(path).is_some(), "missing {path}");
    }
}
