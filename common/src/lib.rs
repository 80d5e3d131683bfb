pub mod config;
pub mod dataset;
pub mod http;
pub mod model;

pub use config::ServingConfig;
pub use dataset::Dataset;
pub use http::{ErrorResponse, HealthResponse, InfoResponse, PredictRequest, PredictResponse};
pub use model::LinearModel;
