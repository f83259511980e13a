//! Number formatting shared by titles, legends and file names.

/// Round to `decimals` places using the exact binary value, ties to even.
///
/// `0.125` becomes `0.12` and `0.375` becomes `0.38`, because both are exact
/// ties. `2.675` is stored just below the tie and becomes `2.67`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() || decimals < 0 {
        let scale = 10f64.powi(decimals);
        return (value * scale).round() / scale;
    }
    let precision = decimals as usize;
    format!("{value:.precision$}").parse().unwrap_or(value)
}

/// Shortest decimal form, keeping a trailing `.0` on integral values ("5.0", "0.25").
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// `format_number` after rounding, for legend and title text.
pub fn format_rounded(value: f64, decimals: i32) -> String {
    format_number(round_to(value, decimals))
}

/// Split expressed as a whole percentage ("30% Unknown").
pub fn percent_label(split: f64) -> String {
    format!("{}% Unknown", (split * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_keep_decimal_point() {
        assert_eq!(format_number(5.0), "5.0");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-3.0), "-3.0");
    }

    #[test]
    fn rounding_matches_title_precision() {
        assert_eq!(format_rounded(0.8333, 2), "0.83");
        assert_eq!(format_rounded(0.999, 2), "1.0");
        assert_eq!(format_rounded(4.46, 1), "4.5");
    }

    #[test]
    fn rounding_works_on_the_stored_value() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(1.0 / 3.0, 2), 0.33);
        assert_eq!(round_to(-0.125, 2), -0.12);
    }

    #[test]
    fn percent_label_uses_whole_percent() {
        assert_eq!(percent_label(0.1), "10% Unknown");
        assert_eq!(percent_label(0.3), "30% Unknown");
    }
}
