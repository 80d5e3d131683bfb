use anyhow::Result;
use common::config::DEFAULT_MODEL_PATH;
use common::{Dataset, LinearModel};
use std::time::Instant;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter("trainer=info")
        .init();

    info!("======================================================================");
    info!("Trainer - Fitting linear regression model");
    info!("======================================================================");

    let model_path =
        std::env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());

    let dataset = Dataset::house_prices();
    info!("Training samples: {}", dataset.len());
    info!("Input dimension: {}", dataset.input_dim());

    let start_time = Instant::now();
    let model = LinearModel::fit(&dataset)?;
    info!("✓ Model fitted in {:.2}ms", start_time.elapsed().as_secs_f64() * 1000.0);
    info!("  Coefficients: {:?}", model.coefficients);
    info!("  Intercept: {:.6}", model.intercept);

    model.save(&model_path)?;
    info!("✓ Model artifact written to {}", model_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use common::{Dataset, LinearModel};

    #[test]
    fn test_trained_artifact_serves_predictions() {
        let path = std::env::temp_dir().join(format!("trainer-artifact-{}.json", std::process::id()));

        let model = LinearModel::fit(&Dataset::house_prices()).unwrap();
        model.save(&path).unwrap();

        let loaded = LinearModel::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let prediction = loaded.predict(&[1750.0]).unwrap();
        assert!((prediction - 525_000.0).abs() < 1e-3);
    }
}
