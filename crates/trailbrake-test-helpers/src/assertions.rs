//! Assertion macros for pedal values and scores.

/// Assert that two floating-point values are within `tolerance` of each other.
///
/// # Example
///
/// ```rust
/// use trailbrake_test_helpers::assert_close;
///
/// assert_close!(43.75, 43.7501, 0.001);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left: f64 = $left;
        let right: f64 = $right;
        let tolerance: f64 = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {
        let left: f64 = $left;
        let right: f64 = $right;
        let tolerance: f64 = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`: {}",
                left, right, diff, tolerance, format_args!($($arg)+)
            );
        }
    };
}

/// Assert that a value lies in a range.
///
/// # Example
///
/// ```rust
/// use trailbrake_test_helpers::assert_in_range;
///
/// assert_in_range!(42.0, 0.0..=100.0);
/// ```
#[macro_export]
macro_rules! assert_in_range {
    ($value:expr, $range:expr $(,)?) => {
        let value = $value;
        let range = $range;
        if !range.contains(&value) {
            panic!("assertion failed: value {:?} is not in range {:?}", value, range);
        }
    };
    ($value:expr, $range:expr, $($arg:tt)+) => {
        let value = $value;
        let range = $range;
        if !range.contains(&value) {
            panic!("assertion failed: value {:?} is not in range {:?}: {}", value, range, format_args!($($arg)+));
        }
    };
}

/// Assert that both channels of a pedal value are inside `[0, 100]`.
///
/// Works on anything with `throttle` and `brake` fields.
///
/// # Example
///
/// ```rust
/// use trailbrake_test_helpers::assert_pedal_range;
///
/// struct Pedals { throttle: f64, brake: f64 }
/// assert_pedal_range!(Pedals { throttle: 100.0, brake: 0.0 });
/// ```
#[macro_export]
macro_rules! assert_pedal_range {
    ($pedals:expr $(,)?) => {
        let pedals = &$pedals;
        if !(0.0..=100.0).contains(&pedals.throttle) || !(0.0..=100.0).contains(&pedals.brake) {
            panic!(
                "assertion failed: pedal value out of [0, 100]: throttle {:?}, brake {:?}",
                pedals.throttle, pedals.brake
            );
        }
    };
    ($pedals:expr, $($arg:tt)+) => {
        let pedals = &$pedals;
        if !(0.0..=100.0).contains(&pedals.throttle) || !(0.0..=100.0).contains(&pedals.brake) {
            panic!(
                "assertion failed: pedal value out of [0, 100]: throttle {:?}, brake {:?}: {}",
                pedals.throttle, pedals.brake, format_args!($($arg)+)
            );
        }
    };
}
