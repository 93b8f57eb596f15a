use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::analytics::aggregator::compute_statistics;
use crate::config::settings::Settings;
use crate::generator::attack::random_token;
use crate::models::attack::{AttackAttempt, LoginAttempt};
use crate::models::webapp::{builtin_templates, VulnKind};
use crate::simulation::feed::{ActivityFeed, LoginFeed};
use crate::simulation::server::HoneypotSim;

/// Shared state handed to every console handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub dataset: Arc<Vec<AttackAttempt>>,
    pub activity: Arc<ActivityFeed>,
    pub logins: Arc<LoginFeed>,
    pub server: Arc<HoneypotSim>,
    pub start_time: Instant,
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct RecordLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectTemplateRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SetVulnerabilityRequest {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequest {
    pub name: Option<String>,
    pub log_level: Option<String>,
    pub port: Option<u16>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "server_status": state.server.status().to_string(),
        "template": state.server.template().id,
        "dataset_size": state.dataset.len(),
        "activity_feed_size": state.activity.len(),
        "login_feed_size": state.logins.len(),
    }))
}

/// Summary statistics over the initial dataset, recomputed per request.
pub async fn get_stats(State(state): State<AppState>) -> Json<Value> {
    let stats = compute_statistics(&state.dataset);
    let rate = stats.success_rate();

    let mut value = serde_json::to_value(&stats).unwrap_or_else(|_| json!({}));
    if let Some(obj) = value.as_object_mut() {
        obj.insert("successRate".to_string(), json!(rate));
    }
    Json(value)
}

pub async fn get_attacks(State(state): State<AppState>) -> Json<Value> {
    let attacks = state.activity.entries();
    Json(json!({
        "count": attacks.len(),
        "attacks": attacks,
    }))
}

pub async fn get_logins(State(state): State<AppState>) -> Json<Value> {
    let logins = state.logins.entries();
    Json(json!({
        "count": logins.len(),
        "logins": logins,
    }))
}

/// Record a credential pair submitted through the fake login portal. The
/// attempt always fails; nothing is authenticated or persisted.
pub async fn record_login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RecordLoginRequest>,
) -> Json<Value> {
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let attempt = LoginAttempt {
        id: random_token(&mut rand::rng()),
        timestamp: Utc::now(),
        username: req.username,
        password: req.password,
        ip: "127.0.0.1".to_string(),
        user_agent,
        success: false,
    };
    state.logins.record(attempt.clone());

    Json(json!({
        "recorded": true,
        "attempt": attempt,
    }))
}

pub async fn get_templates() -> Json<Value> {
    Json(json!({ "templates": builtin_templates() }))
}

pub async fn start_server(State(state): State<AppState>) -> Json<Value> {
    state.server.start();
    Json(json!({
        "status": state.server.status().to_string(),
        "message": format!(
            "Server is now running on port {} emulating {}",
            state.server.port(),
            state.server.template().name
        ),
    }))
}

pub async fn stop_server(State(state): State<AppState>) -> Json<Value> {
    state.server.stop();
    Json(json!({
        "status": state.server.status().to_string(),
        "message": "Server has been shut down",
    }))
}

pub async fn get_server_logs(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": state.server.status().to_string(),
        "logs": state.server.logs(),
    }))
}

pub async fn get_server_template(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "template": state.server.template() }))
}

pub async fn select_template(
    State(state): State<AppState>,
    Json(req): Json<SelectTemplateRequest>,
) -> impl IntoResponse {
    if state.server.select_template(&req.id) {
        let template = state.server.template();
        (
            StatusCode::OK,
            Json(json!({
                "template": template.id,
                "message": format!(
                    "Now emulating {} with corresponding vulnerabilities",
                    template.name
                ),
            })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Unknown template: {}", req.id) })),
        )
    }
}

pub async fn get_vulnerabilities(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "vulnerabilities": state.server.vulnerabilities() }))
}

pub async fn set_vulnerability(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(req): Json<SetVulnerabilityRequest>,
) -> impl IntoResponse {
    match VulnKind::from_str_name(&kind) {
        Some(kind) => {
            state.server.set_vulnerability(kind, req.enabled);
            (
                StatusCode::OK,
                Json(json!({
                    "vulnerability": kind.to_string(),
                    "enabled": req.enabled,
                })),
            )
        }
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Unknown vulnerability kind: {}", kind) })),
        ),
    }
}

pub async fn get_config(State(state): State<AppState>) -> Json<Value> {
    let sim = &state.settings.simulation;
    Json(json!({
        "name": state.server.name(),
        "log_level": state.server.log_level(),
        "port": state.server.port(),
        "template": state.server.template().id,
        "simulation": {
            "initial_attacks": sim.initial_attacks,
            "activity_interval_secs": sim.activity_interval_secs,
            "login_interval_secs": sim.login_interval_secs,
            "attack_min_interval_secs": sim.attack_min_interval_secs,
            "attack_max_interval_secs": sim.attack_max_interval_secs,
            "feed_capacity": sim.feed_capacity,
            "log_capacity": sim.log_capacity,
        },
    }))
}

pub async fn update_config(
    State(state): State<AppState>,
    Json(req): Json<UpdateConfigRequest>,
) -> Json<Value> {
    state
        .server
        .update_config(req.name, req.log_level, req.port);
    Json(json!({
        "saved": true,
        "name": state.server.name(),
        "log_level": state.server.log_level(),
        "port": state.server.port(),
    }))
}
