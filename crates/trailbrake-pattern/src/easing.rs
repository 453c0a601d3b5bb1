//! Keyframe easing.
//!
//! Segments do not ramp linearly: progress through a segment is shaped by a
//! quadratic ease-in-out so pedal applications start and finish gently.

/// Quadratic ease-in-out over `progress` in `[0, 1]`.
///
/// Quadratic ease-in for the first half, the mirrored ease-out for the second.
/// `ease_in_out(0.0) == 0.0`, `ease_in_out(0.5) == 0.5`, `ease_in_out(1.0) == 1.0`.
///
/// # Example
///
/// ```
/// use trailbrake_pattern::ease_in_out;
///
/// assert!(ease_in_out(0.25) < 0.25);
/// assert!(ease_in_out(0.75) > 0.75);
/// ```
#[inline]
pub fn ease_in_out(progress: f64) -> f64 {
    if progress < 0.5 {
        2.0 * progress * progress
    } else {
        1.0 - (-2.0 * progress + 2.0).powi(2) / 2.0
    }
}

/// Interpolate one keyframe pair at `progress` through its segment.
///
/// The eased weight is applied in `start * (1 - k) + end * k` form so both
/// endpoints are reproduced exactly.
///
/// # Example
///
/// ```
/// use trailbrake_pattern::interpolate;
///
/// assert_eq!(interpolate(80.0, 20.0, 0.0), 80.0);
/// assert_eq!(interpolate(80.0, 20.0, 1.0), 20.0);
/// assert_eq!(interpolate(80.0, 20.0, 0.5), 50.0);
/// ```
#[inline]
pub fn interpolate(start: f64, end: f64, progress: f64) -> f64 {
    let weight = ease_in_out(progress);
    start * (1.0 - weight) + end * weight
}
