use super::helpers::{
    ALICE, InMemoryUserRepository, MISSING_CITY, assert_status, expect_status, get, read_json,
    read_text, send, spawn_app, spawn_app_with, upload_csv, upload_request,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};

#[tokio::test]
async fn upload_form_is_served() {
    let app = spawn_app();

    let res = expect_status(send(&app.app, get("/upload_csv")).await, StatusCode::OK).await;
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "got {content_type}");
    let html = read_text(res).await;
    assert!(html.contains(r#"name="file""#));
    assert!(html.contains("multipart/form-data"));
}

#[tokio::test]
async fn valid_row_is_inserted_without_error_file() {
    let app = spawn_app();

    let res = expect_status(upload_csv(&app, &[ALICE]).await, StatusCode::OK).await;
    let summary: Value = read_json(res).await;
    assert_eq!(
        summary,
        json!({ "inserted_count": 1, "failed_count": 0, "error_file": null })
    );

    let rows = app.users.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user.as_deref(), Some("alice"));
    assert_eq!(rows[0].pincode.as_deref(), Some("12345"));
    assert!(!app.error_file.exists());
}

#[tokio::test]
async fn invalid_row_is_reported_in_error_file() {
    let app = spawn_app();

    let res = expect_status(
        upload_csv(&app, &[ALICE, MISSING_CITY]).await,
        StatusCode::OK,
    )
    .await;
    let summary: Value = read_json(res).await;
    assert_eq!(summary["inserted_count"], 1);
    assert_eq!(summary["failed_count"], 1);
    assert_eq!(
        summary["error_file"],
        app.error_file.display().to_string()
    );
    assert!(app.error_file.exists());
    assert_eq!(app.users.rows().len(), 1);
}

#[tokio::test]
async fn non_csv_payload_is_rejected_without_side_effects() {
    let app = spawn_app();
    let garbage = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\xff\xfe\xfd";

    let res = send(&app.app, upload_request("file", Some("photo.png"), garbage)).await;
    assert_status(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    let message = body["error"].as_str().expect("error message");
    assert!(
        message.starts_with("Invalid CSV file: "),
        "unexpected message: {message}"
    );
    assert!(app.users.rows().is_empty());
    assert!(!app.error_file.exists());
}

#[tokio::test]
async fn rejected_upload_leaves_previous_error_file_untouched() {
    let app = spawn_app();
    expect_status(upload_csv(&app, &[MISSING_CITY]).await, StatusCode::OK).await;
    let before = std::fs::read(&app.error_file).expect("error file written");

    let res = send(
        &app.app,
        upload_request("file", Some("users.csv"), b"user,role\nalice,admin,extra\n"),
    )
    .await;
    assert_status(res.status(), StatusCode::BAD_REQUEST);

    let after = std::fs::read(&app.error_file).expect("error file still present");
    assert_eq!(before, after);
}

#[tokio::test]
async fn missing_file_part_is_rejected() {
    let app = spawn_app();

    let res = send(&app.app, upload_request("document", Some("users.csv"), b"user\n")).await;
    assert_status(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn blank_filename_is_rejected() {
    let app = spawn_app();

    for filename in [Some(""), Some("   "), None] {
        let res = send(&app.app, upload_request("file", filename, b"user\n")).await;
        assert_status(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_json(res).await;
        assert_eq!(body["error"], "Empty filename", "filename {filename:?}");
    }
}

#[tokio::test]
async fn database_failure_is_a_server_error_but_errors_are_still_reported() {
    let app = spawn_app_with(InMemoryUserRepository::failing("Can't connect to MySQL server"));

    let res = upload_csv(&app, &[ALICE, MISSING_CITY]).await;
    assert_status(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = read_json(res).await;
    assert_eq!(
        body["error"],
        "Database error: Can't connect to MySQL server"
    );
    assert!(app.error_file.exists());
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = spawn_app();

    let res = send(&app.app, get("/upload_csv")).await;
    let headers = res.headers();
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(
        headers[header::REFERRER_POLICY],
        "strict-origin-when-cross-origin"
    );
}

#[tokio::test]
async fn short_row_is_reported_and_other_rows_are_inserted() {
    let app = spawn_app();

    let res = expect_status(
        upload_csv(&app, &[ALICE, "bob,user,2 Side"]).await,
        StatusCode::OK,
    )
    .await;
    let summary: Value = read_json(res).await;
    assert_eq!(summary["inserted_count"], 1);
    assert_eq!(summary["failed_count"], 1);
    assert!(app.error_file.exists());

    let rows = app.users.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user.as_deref(), Some("alice"));
}

#[tokio::test]
async fn non_multipart_post_is_a_json_bad_request() {
    let app = spawn_app();

    for content_type in [None, Some("multipart/form-data"), Some("text/csv")] {
        let mut req = Request::builder().method("POST").uri("/upload_csv");
        if let Some(value) = content_type {
            req = req.header(header::CONTENT_TYPE, value);
        }
        let req = req.body(Body::empty()).expect("failed to build request");

        let res = send(&app.app, req).await;
        assert_status(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_json(res).await;
        assert_eq!(body["error"], "No file uploaded", "content type {content_type:?}");
    }
    assert!(app.users.rows().is_empty());
}
