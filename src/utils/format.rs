/// Two-decimal rounding for display. Stored totals stay unrounded; this is
/// applied only when building responses.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_hours(8.5), 8.5);
        assert_eq!(round_hours(7.999_9), 8.0);
        assert_eq!(round_hours(0.126), 0.13);
        assert_eq!(round_hours(0.0), 0.0);
    }
}
