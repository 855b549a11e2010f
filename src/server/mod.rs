use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::market::Marketplace;
use crate::storage::SqliteStore;
use crate::tools::{self, ToolName};

pub mod mcp;
pub mod routes;

/// Server state shared by both transports
pub struct AppState {
    market: Mutex<Marketplace<SqliteStore>>,
    /// Returned by the `validate` tool
    pub identity: String,
    /// Bearer token required on HTTP tool routes; `None` only when
    /// authentication was disabled with `--no-auth`
    pub auth_token: Option<String>,
}

impl AppState {
    pub fn new(store: SqliteStore, identity: impl Into<String>, auth_token: Option<String>) -> Self {
        Self {
            market: Mutex::new(Marketplace::new(store)),
            identity: identity.into(),
            auth_token,
        }
    }

    /// Resolve a tool by name and run it against the marketplace
    pub fn call_tool(&self, name: &str, args: Value) -> crate::Result<String> {
        let tool: ToolName = name.parse()?;
        let market = self.market.lock().unwrap_or_else(PoisonError::into_inner);
        tools::invoke(&market, &self.identity, tool, args)
    }
}

/// Build the HTTP router. Tool routes sit behind bearer authentication;
/// `/health` does not.
pub fn router(state: Arc<AppState>) -> Router {
    let tool_routes = Router::new()
        .route("/tools", get(routes::list_tools))
        .route("/tools/{name}", post(routes::call_tool))
        .route_layer(middleware::from_fn_with_state(state.clone(), routes::require_bearer));

    Router::new()
        .route("/health", get(routes::health))
        .merge(tool_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    if state.auth_token.is_none() {
        tracing::warn!("Authentication disabled; tool routes are open");
    }
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
