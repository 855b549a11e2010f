use axum::{
    body::Bytes,
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use crate::server::AppState;
use crate::tools::ToolName;
use crate::Error;
use std::sync::Arc;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: String,
    pub input_schema: Value,
}

#[derive(Serialize)]
pub struct ToolResponse {
    pub tool: String,
    pub text: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: error.into() }))
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn list_tools() -> Json<Vec<ToolInfo>> {
    let tools = ToolName::all()
        .iter()
        .map(|tool| ToolInfo {
            name: tool.as_str(),
            description: tool.description(),
            input_schema: tool.input_schema(),
        })
        .collect();
    Json(tools)
}

pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolResponse>, ApiError> {
    let args: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e)))?
    };

    let tool = name.clone();
    let text = tokio::task::spawn_blocking(move || state.call_tool(&tool, args))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| match e {
            Error::UnknownTool(_) => api_error(StatusCode::NOT_FOUND, e.to_string()),
            Error::InvalidArguments(_) => api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            _ => api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok(Json(ToolResponse { tool: name, text }))
}

/// Token of a `Bearer` authorization value; the scheme is case-insensitive
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim_start();
    (!token.is_empty()).then_some(token)
}

/// Reject requests without the configured bearer token
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.auth_token.as_deref() else {
        return next.run(request).await;
    };

    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    if presented == Some(expected) {
        return next.run(request).await;
    }

    tracing::warn!("Bearer token missing or invalid, request denied");
    api_error(StatusCode::UNAUTHORIZED, "invalid or missing bearer token").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::router;
    use crate::storage::SqliteStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request as HttpRequest;
    use tower::ServiceExt;

    fn state(token: Option<&str>) -> Arc<AppState> {
        Arc::new(AppState::new(
            SqliteStore::open_in_memory().unwrap(),
            "919876543210",
            token.map(String::from),
        ))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, token: Option<&str>, body: &str) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_open() {
        let app = router(state(Some("secret")));
        let response = app
            .oneshot(HttpRequest::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_tools_require_token() {
        let app = router(state(Some("secret")));

        let response = app
            .clone()
            .oneshot(post("/tools/validate", None, ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(post("/tools/validate", Some("wrong"), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(post("/tools/validate", Some("secret"), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["text"], "919876543210");
    }

    #[test]
    fn test_bearer_scheme_case_insensitive() {
        assert_eq!(bearer_token("Bearer secret"), Some("secret"));
        assert_eq!(bearer_token("bearer secret"), Some("secret"));
        assert_eq!(bearer_token("BEARER  secret"), Some("secret"));
        assert_eq!(bearer_token("Basic secret"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearersecret"), None);
    }

    #[tokio::test]
    async fn test_lowercase_scheme_accepted() {
        let app = router(state(Some("s")));
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/tools/marketplace_stats")
            .header(header::AUTHORIZATION, "bearer s")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unauthenticated_write_is_rejected() {
        let state = state(Some("secret"));
        let app = router(state.clone());
        let response = app
            .oneshot(post(
                "/tools/register_seeker",
                None,
                r#"{"user_id": "c1", "seeker_name": "Priya", "phone": "1", "location": "Powai", "city": "Mumbai"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let profile = state.call_tool("view_profile", serde_json::json!({ "user_id": "c1" })).unwrap();
        assert!(profile.starts_with("No Profile Found"));
    }

    #[tokio::test]
    async fn test_list_tools() {
        let app = router(state(None));
        let response = app
            .oneshot(HttpRequest::get("/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let tools = body_json(response).await;
        assert_eq!(tools.as_array().unwrap().len(), ToolName::all().len());
    }

    #[tokio::test]
    async fn test_call_tool_find_providers() {
        let app = router(state(None));
        let response = app
            .oneshot(post(
                "/tools/find_providers",
                None,
                r#"{"user_id": "c1", "service_needed": "painter"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let text = body["text"].as_str().unwrap();
        assert!(text.starts_with("Found 1 job providers for painter:"));
        assert!(text.contains("Amit Sharma"));
    }

    #[tokio::test]
    async fn test_unknown_tool_and_bad_args() {
        let app = router(state(None));

        let response = app
            .clone()
            .oneshot(post("/tools/drop_tables", None, "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(post("/tools/view_profile", None, "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = app
            .oneshot(post("/tools/view_profile", None, "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
