// Utility functions for matching-engine

/// Parse a "HH:MM" clock string into minutes since midnight.
pub fn parse_hhmm(value: &str) -> Option<u16> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: u16 = hours.parse().ok()?;
    let minutes: u16 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Format minutes since midnight as a zero-padded "HH:MM" string.
pub fn format_hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Round to 4 decimal places for exported scores.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("07:00"), Some(420));
        assert_eq!(parse_hhmm("22:30"), Some(1350));
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(parse_hhmm("noon"), None);
    }

    #[test]
    fn test_format_hhmm() {
        assert_eq!(format_hhmm(420), "07:00");
        assert_eq!(format_hhmm(1350), "22:30");
        assert_eq!(format_hhmm(5), "00:05");
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(-0.99995), -1.0);
        assert_eq!(round4(2.0), 2.0);
    }
}
