use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use common::{
    config::ServingConfig, model::PredictError, ErrorResponse, HealthResponse, InfoResponse,
    LinearModel, PredictRequest, PredictResponse,
};
use serde_json::json;
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Instant,
};
use sysinfo::System;
use tower_http::trace::TraceLayer;
use tracing::info;

// Application state
struct AppState {
    model: LinearModel,
    model_path: String,
    model_load_time_ms: f64,
    total_requests: AtomicU64,
    system: Arc<tokio::sync::Mutex<System>>,
}

// Error handling
enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });

        (status, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter("api_server=info,tower_http=info")
        .init();

    info!("======================================================================");
    info!("Regression API Server - Starting");
    info!("======================================================================");

    let config = ServingConfig::resolve()?;
    info!("Model artifact: {}", config.model_path);

    // Load model
    let start_time = Instant::now();
    let model = LinearModel::load(&config.model_path)?;
    let model_load_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    info!("✓ Model loaded in {:.2}ms", model_load_time_ms);
    info!("  Input dimension: {}", model.input_dim());
    info!("");
    info!("Server ready on http://{}:{}", config.host, config.port);
    info!("======================================================================");

    // Create application state
    let state = Arc::new(AppState {
        model,
        model_path: config.model_path.clone(),
        model_load_time_ms,
        total_requests: AtomicU64::new(0),
        system: Arc::new(tokio::sync::Mutex::new(System::new_all())),
    });

    let app = app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// Build router
fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/info", get(info_handler))
        .route("/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "service": "Linear Regression API Server",
        "status": "running",
        "endpoints": {
            "health": "/health",
            "info": "/info",
            "predict": "/predict (POST)"
        }
    }))
}

async fn health(State(_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

async fn info_handler(State(state): State<Arc<AppState>>) -> Result<Json<InfoResponse>, AppError> {
    let mut system = state.system.lock().await;
    system.refresh_all();

    let pid = sysinfo::get_current_pid().map_err(|e| AppError::Internal(e.to_string()))?;
    let process = system
        .process(pid)
        .ok_or_else(|| AppError::Internal("current process not found".to_string()))?;
    let memory_rss_mb = process.memory() as f64 / 1024.0 / 1024.0;
    let cpu_percent = process.cpu_usage();

    let cpu_count = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    Ok(Json(InfoResponse {
        framework: "axum".to_string(),
        model_path: state.model_path.clone(),
        input_dim: state.model.input_dim(),
        model_load_time_ms: state.model_load_time_ms,
        total_requests: state.total_requests.load(Ordering::Relaxed),
        cpu_count,
        memory_rss_mb,
        cpu_percent,
    }))
}

async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    tracing::debug!("Predict request with {} features", request.features.len());

    // Shape/type violations are rejected by the Json extractor before this
    // point; the model still validates the dimension itself.
    let prediction = state.model.predict(&request.features)?;

    state.total_requests.fetch_add(1, Ordering::Relaxed);

    Ok(Json(PredictResponse { prediction }))
}
