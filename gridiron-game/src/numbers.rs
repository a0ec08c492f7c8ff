//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Round a f64 and clamp it to the u32 range, returning 0 for non-finite or negative values.
#[must_use]
pub fn round_f64_to_u32(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    cast::<f64, u32>(value.min(max).round()).unwrap_or(0)
}

/// Round a f64 into a `u8` rating domain, clamped to `[0, max]`.
#[must_use]
pub fn round_f64_to_u8(value: f64, max: u8) -> u8 {
    let rounded = round_f64_to_i32(value).clamp(0, i32::from(max));
    u8::try_from(rounded).unwrap_or(max)
}

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Convert a u32 count to f64.
#[must_use]
pub fn u32_to_f64(value: u32) -> f64 {
    f64::from(value)
}

/// Saturating conversion for small counters stored as `u16`.
#[must_use]
pub fn usize_to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Saturating conversion for box-score counters.
#[must_use]
pub fn u32_to_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Saturating conversion for indices stored as `u32`.
#[must_use]
pub fn usize_to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f64_to_i32(1.6), 2);
        assert_eq!(round_f64_to_i32(f64::NAN), 0);
        assert_eq!(round_f64_to_i32(f64::from(i32::MAX) * 2.0), i32::MAX);
    }

    #[test]
    fn unsigned_rounding_floors_at_zero() {
        assert_eq!(round_f64_to_u32(-4.2), 0);
        assert_eq!(round_f64_to_u32(f64::INFINITY), 0);
        assert_eq!(round_f64_to_u32(7.5), 8);
    }

    #[test]
    fn rating_rounding_respects_ceiling() {
        assert_eq!(round_f64_to_u8(120.0, 99), 99);
        assert_eq!(round_f64_to_u8(-3.0, 99), 0);
        assert_eq!(round_f64_to_u8(42.4, 99), 42);
    }

    #[test]
    fn counters_saturate() {
        assert_eq!(usize_to_u16(70_000), u16::MAX);
        assert!((usize_to_f64(3) - 3.0).abs() < f64::EPSILON);
    }
}
