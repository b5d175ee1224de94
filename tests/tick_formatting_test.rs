// tests/tick_formatting_test.rs

use fig_session::plot_framework::format_tick;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values_drop_trailing_zeros() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(1.0), "1");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(2.25), "2.25");
        assert_eq!(format_tick(-1.5), "-1.5");
        assert_eq!(format_tick(100.0), "100");
    }

    #[test]
    fn test_precision_is_limited_to_three_decimals() {
        assert_eq!(format_tick(1.0 / 3.0), "0.333");
        assert_eq!(format_tick(0.2 + 0.1), "0.3");
    }

    #[test]
    fn test_extreme_magnitudes_use_scientific_notation() {
        assert_eq!(format_tick(123456.0), "1.2e5");
        assert_eq!(format_tick(0.0001), "1.0e-4");
        assert_eq!(format_tick(-250000.0), "-2.5e5");
    }

    #[test]
    fn test_signed_zero_and_small_negatives() {
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(-0.00049), "-4.9e-4");
    }
}
