//! Scale constants and value normalisation.
//!
//! Two different "default" constants exist on purpose:
//! * [`FALLBACK_DEFAULT_SCALE`] is what a read returns when the file has no default.
//! * [`SEED_DEFAULT_SCALE`] is what a write seeds into a table that has no default.
//!
//! They disagree. Both are kept as-is because existing preference files were
//! produced with exactly these values.

/// Returned by [`crate::ScalePreferenceStore::get_default_scale`] when nothing is persisted.
pub const FALLBACK_DEFAULT_SCALE: f64 = 4.00;

/// Default entry inserted into a table being prepared for a write.
pub const SEED_DEFAULT_SCALE: f64 = 1.00;

/// Smallest value ever written to disk.
pub const MIN_SCALE: f64 = 0.01;

/// Step applied per scroll notch.
pub const COARSE_STEP: f64 = 0.1;

/// Step applied per scroll notch while Shift is held.
pub const FINE_STEP: f64 = 0.01;

/// Scale the session starts from before any surface has been opened.
pub const INITIAL_SESSION_SCALE: f64 = 2.0;

/// Clamp a value to something the store may persist.
///
/// Non-finite values and anything below [`MIN_SCALE`] become [`MIN_SCALE`].
pub fn sanitize(value: f64) -> f64 {
    if !value.is_finite() || value < MIN_SCALE {
        MIN_SCALE
    } else {
        value
    }
}

/// Round to the two decimals the file format keeps.
///
/// Goes through [`format2`] so the stored value is exactly what gets written.
pub fn round2(value: f64) -> f64 {
    format2(value).parse().unwrap_or(value)
}

/// Render a value the way it appears in the preference file (`"2.50"`).
pub fn format2(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_corrects_out_of_range() {
        assert_eq!(sanitize(-3.0), MIN_SCALE);
        assert_eq!(sanitize(0.0), MIN_SCALE);
        assert_eq!(sanitize(0.004), MIN_SCALE);
        assert_eq!(sanitize(f64::NAN), MIN_SCALE);
        assert_eq!(sanitize(f64::INFINITY), MIN_SCALE);
        assert_eq!(sanitize(2.5), 2.5);
    }

    #[test]
    fn two_decimal_rendering() {
        assert_eq!(format2(4.0), "4.00");
        assert_eq!(format2(0.5), "0.50");
        assert_eq!(format2(12.3456), "12.35");
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(2.5), 2.5);
    }

    #[test]
    fn rounding_follows_rendering() {
        // Exact binary values just below the half-way point round down.
        for (value, text) in [(2.675, "2.67"), (1.115, "1.11"), (0.125, "0.12")] {
            assert_eq!(format2(value), text);
            assert_eq!(round2(value), text.parse::<f64>().unwrap());
        }
    }

    #[test]
    fn huge_values_stay_finite() {
        assert!(round2(1e307).is_finite());
        assert_eq!(round2(1e307), 1e307);
        assert!(round2(f64::MAX).is_finite());
    }

    #[test]
    fn fallback_constants_are_distinct() {
        // Known quirk: reads fall back to 4.00, writes seed 1.00.
        assert_eq!(FALLBACK_DEFAULT_SCALE, 4.00);
        assert_eq!(SEED_DEFAULT_SCALE, 1.00);
        assert_ne!(FALLBACK_DEFAULT_SCALE, SEED_DEFAULT_SCALE);
    }
}
