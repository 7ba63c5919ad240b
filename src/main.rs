//! Backroom server binary.
//!
//! Wires config → authority adapter → application services → routers and
//! serves them. Page navigation goes through the edge gate; the JSON API
//! lives under `/auth` and `/users` with the route guard on the protected
//! parts.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use backroom::adapters::auth::{SupabaseAuthority, SupabaseConfig};
use backroom::adapters::http::middleware::{edge_gate, GateState};
use backroom::adapters::http::{auth_router, profile_router, AuthAppState, ProfileAppState};
use backroom::application::RefreshRotator;
use backroom::config::AppConfig;
use backroom::edge::Gatekeeper;
use backroom::ports::CredentialAuthority;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.server.log_level)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let authority: Arc<dyn CredentialAuthority> = Arc::new(SupabaseAuthority::new(
        SupabaseConfig::new(
            config.auth.authority_url.clone(),
            config.auth.api_key.clone(),
        )
        .with_request_timeout(config.auth.request_timeout()),
    )?);

    let secure_cookies = config.cookies.secure_for(config.is_production());
    let refresh_ttl_days = config.cookies.refresh_ttl_days;

    let auth_state = AuthAppState::new(authority.clone(), refresh_ttl_days, secure_cookies);
    let profile_state = ProfileAppState::new();

    let gate_state = GateState {
        gatekeeper: Gatekeeper::new(RefreshRotator::new(authority.clone())),
        refresh_ttl_days,
        secure_cookies,
    };

    let api = Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_router(auth_state.clone()))
        .nest(
            "/users",
            profile_router(profile_state, auth_state.validator.clone()),
        );

    // Page navigation goes through the edge gate; the JSON API above does
    // not (its protected routes carry the guard instead). Page composition
    // itself is out of scope, so admitted navigations land on a shell.
    let pages = Router::new()
        .fallback(page_shell)
        .layer(middleware::from_fn_with_state(gate_state, edge_gate));

    let mut app = api
        .merge(pages)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    if let Some(cors) = cors_layer(&config.server.cors_origins_list()) {
        app = app.layer(cors);
    }

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "backroom listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Browser clients send the session cookies cross-origin, so CORS must
/// allow credentials — which rules out a wildcard origin. No configured
/// origins means no CORS layer (same-origin deployments).
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PATCH])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn page_shell() -> axum::response::Html<&'static str> {
    axum::response::Html("<!doctype html><html><head><title>backroom</title></head><body></body></html>")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown signal handler");
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_configured_origins_means_no_cors_layer() {
        assert!(cors_layer(&[]).is_none());
    }

    #[test]
    fn configured_origins_produce_a_cors_layer() {
        let origins = vec!["http://localhost:5173".to_string()];
        assert!(cors_layer(&origins).is_some());
    }

    #[test]
    fn unparseable_origins_are_skipped() {
        let origins = vec!["\u{7f}not a header value".to_string()];
        assert!(cors_layer(&origins).is_none());
    }
}
