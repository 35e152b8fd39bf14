//! Common test utilities for usability-inference tests

/// Means of Likert-style scores, the shape of data the analysis feeds the tests
pub fn likert_means(raw: &[u8], per_mean: usize) -> Vec<f64> {
    raw.chunks(per_mean)
        .map(|chunk| chunk.iter().map(|&v| v as f64).sum::<f64>() / chunk.len() as f64)
        .collect()
}

/// Apply a strictly increasing transformation to every value
pub fn monotone(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.exp() + 3.0 * v).collect()
}
