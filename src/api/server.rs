use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::api::routes::AppState;
use crate::api::{auth, routes, websocket};

/// The console API server: HTTP endpoints plus a live WebSocket feed,
/// guarded by the API-key middleware.
pub struct ConsoleApiServer {
    state: AppState,
    bind_addr: String,
}

impl ConsoleApiServer {
    pub fn new(state: AppState, bind_addr: String) -> Self {
        Self { state, bind_addr }
    }

    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let state = self.state.clone();
        let api_key = state.api_key.clone();

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .route("/api/honeytrap/status", get(routes::get_status))
            .route("/api/honeytrap/stats", get(routes::get_stats))
            .route("/api/honeytrap/attacks", get(routes::get_attacks))
            .route(
                "/api/honeytrap/logins",
                get(routes::get_logins).post(routes::record_login),
            )
            .route("/api/honeytrap/templates", get(routes::get_templates))
            .route("/api/honeytrap/live", get(websocket::live_feed_handler))
            .route("/api/honeytrap/server/start", post(routes::start_server))
            .route("/api/honeytrap/server/stop", post(routes::stop_server))
            .route("/api/honeytrap/server/logs", get(routes::get_server_logs))
            .route(
                "/api/honeytrap/server/template",
                get(routes::get_server_template).post(routes::select_template),
            )
            .route(
                "/api/honeytrap/server/vulnerabilities",
                get(routes::get_vulnerabilities),
            )
            .route(
                "/api/honeytrap/server/vulnerabilities/{kind}",
                put(routes::set_vulnerability),
            )
            .route(
                "/api/honeytrap/config",
                get(routes::get_config).put(routes::update_config),
            )
            .layer(middleware::from_fn_with_state(
                api_key,
                auth::auth_middleware,
            ))
            .layer(cors)
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(&self.bind_addr).await?;
        info!("Console API listening on {}", self.bind_addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
