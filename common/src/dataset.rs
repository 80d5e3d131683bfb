use std::fmt;

/// Errors produced while constructing a training dataset.
#[derive(Debug, PartialEq, Eq)]
pub enum DatasetError {
    Empty,
    LengthMismatch { rows: usize, targets: usize },
    RaggedRow { row: usize, got: usize, expected: usize },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Empty => write!(f, "dataset has no samples"),
            DatasetError::LengthMismatch { rows, targets } => {
                write!(f, "{rows} feature rows but {targets} targets")
            }
            DatasetError::RaggedRow { row, got, expected } => {
                write!(f, "row {row} has {got} features, expected {expected}")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

/// Paired feature rows and regression targets, validated on construction so
/// the fitting code can assume a rectangular, non-empty design matrix.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    targets: Vec<f64>,
}

impl Dataset {
    pub fn new(features: Vec<Vec<f64>>, targets: Vec<f64>) -> Result<Self, DatasetError> {
        if features.is_empty() {
            return Err(DatasetError::Empty);
        }
        if features.len() != targets.len() {
            return Err(DatasetError::LengthMismatch {
                rows: features.len(),
                targets: targets.len(),
            });
        }
        let expected = features[0].len();
        for (row, values) in features.iter().enumerate() {
            if values.len() != expected {
                return Err(DatasetError::RaggedRow {
                    row,
                    got: values.len(),
                    expected,
                });
            }
        }
        Ok(Self { features, targets })
    }

    /// House sizes (sq ft) against sale prices. The sample data the trainer
    /// fits by default; swap in any other `Dataset` for testing.
    pub fn house_prices() -> Self {
        Self {
            features: vec![
                vec![1000.0],
                vec![1500.0],
                vec![2000.0],
                vec![2500.0],
            ],
            targets: vec![300_000.0, 450_000.0, 600_000.0, 750_000.0],
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn input_dim(&self) -> usize {
        self.features[0].len()
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_prices_fixture() {
        let dataset = Dataset::house_prices();

        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.input_dim(), 1);
        assert_eq!(dataset.targets()[0], 300_000.0);
    }

    #[test]
    fn test_rejects_empty() {
        let result = Dataset::new(vec![], vec![]);

        assert_eq!(result.unwrap_err(), DatasetError::Empty);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let result = Dataset::new(vec![vec![1.0], vec![2.0]], vec![1.0]);

        assert_eq!(
            result.unwrap_err(),
            DatasetError::LengthMismatch { rows: 2, targets: 1 }
        );
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = Dataset::new(vec![vec![1.0], vec![2.0, 3.0]], vec![1.0, 2.0]);

        assert_eq!(
            result.unwrap_err(),
            DatasetError::RaggedRow { row: 1, got: 2, expected: 1 }
        );
    }
}
