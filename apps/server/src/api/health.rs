use std::sync::Arc;

use crate::{
    main_lib::AppState,
    models::{HealthResponse, IndexResponse},
};
use axum::{response::Html, routing::get, Json, Router};
use chrono::Utc;

const DOCS_PAGE: &str = r##"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Investment Goals API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.ui = SwaggerUIBundle({
        url: "/openapi.json",
        dom_id: "#swagger-ui",
        docExpansion: "full",
        deepLinking: false,
      });
    </script>
  </body>
</html>
"##;

/// Liveness check.
#[utoipa::path(get, path = "/health", responses((status = 200, body = HealthResponse)))]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
    })
}

#[utoipa::path(get, path = "/", responses((status = 200, body = IndexResponse)))]
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Investment Goals API".to_string(),
        docs: "/docs".to_string(),
        health: "/health".to_string(),
    })
}

async fn docs() -> Html<&'static str> {
    Html(DOCS_PAGE)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/docs", get(docs))
}
