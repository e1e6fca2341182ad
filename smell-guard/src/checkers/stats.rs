//! Small numeric helpers shared by the statistical checkers.

/// Linear interpolation quantile of sorted values, `q` in `[0, 1]`.
///
/// Matches the default method of most dataframe libraries: the quantile
/// sits at position `q * (n - 1)` and neighbouring values are interpolated.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Mean and sum of squared deviations.
pub(crate) fn mean_and_m2(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / n;
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (mean, m2)
}
