/// Sparse row produced by a vectorizer. Entries are sorted by column and
/// every column is below `width`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    width: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    pub(crate) fn from_sorted(width: usize, entries: Vec<(usize, f64)>) -> Self {
        debug_assert!(entries.windows(2).all(|pair| pair[0].0 < pair[1].0));
        debug_assert!(entries.iter().all(|(col, _)| *col < width));
        Self { width, entries }
    }

    pub fn zeros(width: usize) -> Self {
        Self {
            width,
            entries: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Dot product with a dense weight row of the same width.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(col, value)| weights[*col] * value)
            .sum()
    }
}
