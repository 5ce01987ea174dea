//! Integer helpers shared by the simplifiers.

/// Computes the greatest common divisor of `a` and `b` with the Euclidean algorithm.
///
/// The result is never negative, and `gcd(0, 0)` is `0`.
pub fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Clamps a wide intermediate result into the range of an [`i64`].
pub fn saturate(n: i128) -> i64 {
    n.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// Raises `base` to the non-negative power `exp`.
///
/// The exact result is used when it fits in an [`i64`]. Otherwise, the power is computed in
/// floating point and rounded to the nearest integer, saturating at the bounds of [`i64`].
pub fn pow_rounded(base: i64, exp: i64) -> i64 {
    debug_assert!(exp >= 0, "negative exponent passed to `pow_rounded`");

    match base {
        0 => return if exp == 0 { 1 } else { 0 },
        1 => return 1,
        -1 => return if exp % 2 == 0 { 1 } else { -1 },
        _ => {},
    }

    if let Ok(exp) = u32::try_from(exp) {
        if let Some(value) = base.checked_pow(exp) {
            return value;
        }
    }

    let value = (base as f64).powf(exp as f64).round();
    if value.is_nan() {
        0
    } else {
        // float to int casts saturate
        value as i64
    }
}
