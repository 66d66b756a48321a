//! Elapsed/total time labels

/// Format a count of seconds as `MM:SS`
///
/// Both fields are zero-padded. Minutes keep counting past 59 rather than
/// rolling into hours.
pub fn format_duration(seconds: u64) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        assert_eq!(format_duration(0), "00:00");
    }

    #[test]
    fn pads_both_fields() {
        assert_eq!(format_duration(42), "00:42");
        assert_eq!(format_duration(65), "01:05");
        assert_eq!(format_duration(600), "10:00");
    }

    #[test]
    fn minutes_do_not_wrap_into_hours() {
        assert_eq!(format_duration(3599), "59:59");
        assert_eq!(format_duration(3725), "62:05");
    }
}
