//! Aggregation helpers shared by the live snapshot and the session summary.

/// Divisor mapping mean pedal gradient (percent per second) to smoothness
/// points.
pub const SMOOTHNESS_DIVISOR: f64 = 5.0;

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Nearest-rank percentile of an ascending slice.
///
/// Picks index `floor(percentile * len)`, clamped to the last element.
/// Returns `0.0` for an empty slice.
///
/// # Example
///
/// ```
/// use trailbrake_scoring::percentile;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&sorted, 0.5), 3.0);
/// assert_eq!(percentile(&sorted, 0.95), 4.0);
/// ```
pub fn percentile(sorted: &[f64], percentile: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return 0.0;
    };
    let percentile = if percentile.is_nan() {
        0.0
    } else {
        percentile.clamp(0.0, 1.0)
    };
    let index = ((sorted.len() as f64 * percentile) as usize).min(last);
    sorted.get(index).copied().unwrap_or_default()
}

/// Smoothness score from per-channel pedal gradients.
///
/// `clamp(100 - mean_gradient / 5, 0, 100)`, where the mean gradient is the
/// average of the throttle mean and the brake mean. No gradients at all means
/// the input has not moved yet, which scores 100.
pub fn smoothness(throttle_gradients: &[f64], brake_gradients: &[f64]) -> f64 {
    if throttle_gradients.is_empty() && brake_gradients.is_empty() {
        return 100.0;
    }
    let mean_gradient = (mean(throttle_gradients) + mean(brake_gradients)) / 2.0;
    (100.0 - mean_gradient / SMOOTHNESS_DIVISOR).clamp(0.0, 100.0)
}

/// The last `window` entries of `values`.
pub(crate) fn recent<T>(values: &[T], window: usize) -> &[T] {
    let start = values.len().saturating_sub(window);
    values.get(start..).unwrap_or_default()
}
