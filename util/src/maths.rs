//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::{Float, FloatConst};

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `lhs` is much smaller than `rhs.abs()` in
/// magnitude and `lhs < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

/// Wrap an angle into the range (-pi, pi].
pub fn wrap_pi<T>(angle: T) -> T
where
    T: Float + FloatConst
{
    let wrapped = rem_euclid(angle + T::PI(), T::TAU()) - T::PI();

    // rem_euclid gives [-pi, pi), and may round up to pi, fold the lower
    // bound onto the upper one.
    if wrapped <= -T::PI() {
        wrapped + T::TAU()
    }
    else {
        wrapped
    }
}

/// Shift `angle` by whole turns so that it lies within (-pi, pi] of
/// `reference`.
///
/// Used to pick the shortest rotation towards a bearing when the heading is
/// not wrapped, e.g. a heading of 3.0 rad and a bearing of -3.0 rad gives
/// -3.0 + 2pi.
pub fn unwrap_near<T>(angle: T, reference: T) -> T
where
    T: Float + FloatConst
{
    reference + wrap_pi(angle - reference)
}
