//! Per-sample deviation and timing policy.
//!
//! What counts as an error depends on which reference channel is active. A
//! channel is active when its reference value is above [`ACTIVE_THRESHOLD`].
//!
//! | Throttle active | Brake active | Weighted deviation                        |
//! |-----------------|--------------|-------------------------------------------|
//! | yes             | yes          | mean of both raw deviations (trail brake) |
//! | no              | yes          | brake deviation only                      |
//! | yes             | no           | throttle deviation only                   |
//! | no              | no           | mean of the player's own pedal values     |
//!
//! When nothing is commanded there is no reference to diff against, so any
//! pedal input at all is the error.

use trailbrake_pattern::PedalInput;

/// Reference level above which a channel is considered active, in percent.
pub const ACTIVE_THRESHOLD: f64 = 10.0;

/// Magnitude of the timing signal for an early or late brake.
pub const TIMING_ERROR_MAGNITUDE: f64 = 50.0;

/// True if `value` is above [`ACTIVE_THRESHOLD`].
#[inline]
pub fn is_active(value: f64) -> bool {
    value > ACTIVE_THRESHOLD
}

/// Context-weighted deviation of one frame.
///
/// # Example
///
/// ```
/// use trailbrake_pattern::PedalInput;
/// use trailbrake_scoring::weighted_deviation;
///
/// // Brake zone: the throttle mismatch is ignored.
/// let deviation = weighted_deviation(PedalInput::new(30.0, 50.0), PedalInput::new(0.0, 50.0));
/// assert_eq!(deviation, 0.0);
/// ```
pub fn weighted_deviation(player: PedalInput, reference: PedalInput) -> f64 {
    let throttle_error = (player.throttle - reference.throttle).abs();
    let brake_error = (player.brake - reference.brake).abs();

    match (is_active(reference.throttle), is_active(reference.brake)) {
        (true, true) => (throttle_error + brake_error) / 2.0,
        (false, true) => brake_error,
        (true, false) => throttle_error,
        (false, false) => (player.throttle.abs() + player.brake.abs()) / 2.0,
    }
}

/// Coarse braking-timing signal of one frame.
///
/// `-50` when the player brakes while the reference does not (early), `+50`
/// for the reverse (late), `0` otherwise. This is a direction indicator only;
/// it does not estimate the actual lag.
pub fn timing_error(player: PedalInput, reference: PedalInput) -> f64 {
    match (is_active(player.brake), is_active(reference.brake)) {
        (true, false) => -TIMING_ERROR_MAGNITUDE,
        (false, true) => TIMING_ERROR_MAGNITUDE,
        _ => 0.0,
    }
}
