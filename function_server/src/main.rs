mod handler;

use anyhow::Result;
use axum::{body::Bytes, extract::State, http::StatusCode, response::Json, Router};
use common::{config::ServingConfig, LinearModel};
use std::{sync::Arc, time::Instant};
use tower_http::trace::TraceLayer;
use tracing::info;

// Application state
struct AppState {
    model: LinearModel,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter("function_server=info,tower_http=info")
        .init();

    info!("======================================================================");
    info!("Regression Function Server - Starting");
    info!("======================================================================");

    let config = ServingConfig::resolve()?;

    // The invocation host assigns the listening port through PORT
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(config.port);

    info!("Model artifact: {}", config.model_path);

    // Load model
    let start_time = Instant::now();
    let model = LinearModel::load(&config.model_path)?;

    info!("✓ Model loaded in {:.2}ms", start_time.elapsed().as_secs_f64() * 1000.0);
    info!("");
    info!("Function entry point ready on http://{}:{}", config.host, port);
    info!("======================================================================");

    let state = Arc::new(AppState { model });

    let app = app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), port)).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// Every path and method funnels into the single entry point, as under a
// managed function-invocation host.
fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(invoke)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn invoke(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    let (status, payload) = handler::handle(&state.model, &body);
    (status, Json(payload))
}
