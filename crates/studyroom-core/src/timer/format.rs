//! Clock-style formatting of second counts.

use crate::error::ValidationError;

/// Format seconds as `HH:MM:SS`.
///
/// Every field is padded to at least two digits; hours keep growing past 99.
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Parse a session length given as plain seconds (`"5400"`), `MM:SS` or
/// `HH:MM:SS`.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] for anything else, including
/// minute or second fields of 60 or more.
pub fn parse_duration(input: &str) -> Result<u64, ValidationError> {
    let input = input.trim();
    let bad = || ValidationError::invalid("duration", format!("cannot parse '{input}'"));

    let fields = input
        .split(':')
        .map(|f| f.parse::<u64>().map_err(|_| bad()))
        .collect::<Result<Vec<_>, _>>()?;

    match fields.as_slice() {
        [secs] => Ok(*secs),
        [m, s] if *s < 60 => Ok(m * 60 + s),
        [h, m, s] if *m < 60 && *s < 60 => Ok(h * 3600 + m * 60 + s),
        _ => Err(bad()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reference_values() {
        assert_eq!(format_time(7200), "02:00:00");
        assert_eq!(format_time(0), "00:00:00");
        assert_eq!(format_time(59), "00:00:59");
        assert_eq!(format_time(3661), "01:01:01");
    }

    #[test]
    fn hours_field_grows_past_two_digits() {
        assert_eq!(format_time(100 * 3600 + 5), "100:00:05");
    }

    #[test]
    fn parses_supported_shapes() {
        assert_eq!(parse_duration("7200"), Ok(7200));
        assert_eq!(parse_duration("25:00"), Ok(1500));
        assert_eq!(parse_duration("02:00:00"), Ok(7200));
        assert_eq!(parse_duration(" 1:01:01 "), Ok(3661));
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("1:60").is_err());
        assert!(parse_duration("1:00:75").is_err());
        assert!(parse_duration("1:2:3:4").is_err());
    }
}
