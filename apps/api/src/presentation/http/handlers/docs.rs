use axum::Json;

pub async fn api_docs() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "openapi": "3.0.0",
        "info": {
            "title": "User Import API",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/health": { "get": { "summary": "Health check" } },
            "/upload_csv": {
                "get": { "summary": "HTML upload form" },
                "post": { "summary": "Import users from a CSV file (multipart field `file`)" }
            },
            "/download_errors": { "get": { "summary": "Download the invalid rows of the last upload" } },
            "/get_users": { "get": { "summary": "List imported users" } },
            "/docs": { "get": { "summary": "OpenAPI summary" } }
        }
    }))
}
