use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

#[derive(Debug, PartialEq, Eq)]
pub enum PredictError {
    DimensionMismatch { got: usize, expected: usize },
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictError::DimensionMismatch { got, expected } => {
                write!(f, "dimension mismatch: got {got} features, expected {expected}")
            }
        }
    }
}

impl std::error::Error for PredictError {}

#[derive(Debug, PartialEq, Eq)]
pub enum TrainError {
    Underdetermined { samples: usize, needed: usize },
    Degenerate(&'static str),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::Underdetermined { samples, needed } => {
                write!(f, "{samples} samples cannot determine {needed} parameters")
            }
            TrainError::Degenerate(msg) => write!(f, "degenerate design matrix: {msg}"),
        }
    }
}

impl std::error::Error for TrainError {}

/// A fitted linear function `y = w · x + b`. Immutable once constructed;
/// servers load it at startup and share it read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Least-squares fit via SVD of the bias-augmented design matrix.
    pub fn fit(dataset: &Dataset) -> Result<Self, TrainError> {
        let n = dataset.len();
        let dim = dataset.input_dim();
        if n < dim + 1 {
            return Err(TrainError::Underdetermined { samples: n, needed: dim + 1 });
        }

        let mut design = DMatrix::zeros(n, dim + 1);
        for (i, row) in dataset.features().iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                design[(i, j)] = *value;
            }
            design[(i, dim)] = 1.0;
        }
        let targets = DVector::from_column_slice(dataset.targets());

        let svd = design.svd(true, true);
        let tol = svd.singular_values.max() * 1e-9;
        if svd.rank(tol) < dim + 1 {
            return Err(TrainError::Degenerate("design matrix is rank-deficient"));
        }
        let theta = svd.solve(&targets, tol).map_err(TrainError::Degenerate)?;

        Ok(Self {
            coefficients: theta.as_slice()[..dim].to_vec(),
            intercept: theta[dim],
        })
    }

    /// Single shared inference entry point: validates the feature-vector
    /// length, then evaluates the dot product plus intercept.
    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        if features.len() != self.coefficients.len() {
            return Err(PredictError::DimensionMismatch {
                got: features.len(),
                expected: self.coefficients.len(),
            });
        }
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        Ok(dot + self.intercept)
    }

    pub fn input_dim(&self) -> usize {
        self.coefficients.len()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), contents)
            .with_context(|| format!("failed to write artifact {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read artifact {}", path.as_ref().display()))?;
        let model: LinearModel = serde_json::from_str(&contents)?;
        Ok(model)
    }
}
