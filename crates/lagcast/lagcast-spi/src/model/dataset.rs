//! Supervised dataset model

/// Lag-feature rows and their labels
///
/// `features[i]` holds the `window` observations preceding `labels[i]`,
/// most recent first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SupervisedDataset {
    /// Feature rows, each of length `window`
    pub features: Vec<Vec<f64>>,
    /// Label for each feature row
    pub labels: Vec<f64>,
    /// Lag window the rows were built with
    pub window: usize,
}

impl SupervisedDataset {
    /// An empty dataset for the given window
    pub fn empty(window: usize) -> Self {
        Self {
            features: Vec::new(),
            labels: Vec::new(),
            window,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rows selected by index, in the given order
    ///
    /// # Panics
    ///
    /// Panics if any index is `>= self.len()`.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            window: self.window,
        }
    }
}
