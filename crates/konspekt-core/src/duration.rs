//! Duration notation codec.
//!
//! The backend reports video durations in an ISO-8601 subset
//! ("PT1H2M3S") while concept timestamps use clock notation
//! ("1:02:03" or "12:34"). Both parse to whole seconds; anything
//! unparsable degrades to the unknown sentinel (`None`) instead of
//! an error.

/// Parse a duration string in either notation into whole seconds.
/// Returns `None` for input matching neither form.
pub fn parse_duration(spec: &str) -> Option<u64> {
    let spec = spec.trim();
    match spec.strip_prefix('P') {
        Some(rest) => parse_iso(rest),
        None => parse_clock(spec),
    }
}

/// Format seconds for display: `H:MM:SS` when hours are present,
/// `M:SS` otherwise. `None` renders as `"Unknown"`.
pub fn format_seconds(seconds: Option<u64>) -> String {
    let Some(total) = seconds else {
        return "Unknown".to_string();
    };
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Body of an ISO-8601-style duration after the leading 'P': an
/// optional days field, an optional 'T' separator, then hour/minute/
/// second fields. Missing fields default to zero; at least one field
/// must be present.
fn parse_iso(body: &str) -> Option<u64> {
    let mut total: u64 = 0;
    let mut digits = String::new();
    let mut fields = 0;

    for ch in body.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            'T' if digits.is_empty() => {}
            'D' | 'H' | 'M' | 'S' => {
                let value: u64 = digits.parse().ok()?;
                let unit = match ch {
                    'D' => 86_400,
                    'H' => 3_600,
                    'M' => 60,
                    _ => 1,
                };
                total += value * unit;
                digits.clear();
                fields += 1;
            }
            _ => return None,
        }
    }

    if fields == 0 || !digits.is_empty() {
        return None;
    }
    Some(total)
}

/// Colon-delimited clock form: "M:SS" or "H:MM:SS".
fn parse_clock(spec: &str) -> Option<u64> {
    let parts: Vec<u64> = spec
        .split(':')
        .map(|part| {
            if part.is_empty() {
                None
            } else {
                part.parse().ok()
            }
        })
        .collect::<Option<_>>()?;

    match parts[..] {
        [mins, secs] => Some(mins * 60 + secs),
        [hours, mins, secs] => Some(hours * 3600 + mins * 60 + secs),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_durations() {
        assert_eq!(parse_duration("PT1H2M3S"), Some(3723));
        assert_eq!(parse_duration("PT4M13S"), Some(253));
        assert_eq!(parse_duration("PT45S"), Some(45));
        assert_eq!(parse_duration("PT2H"), Some(7200));
        assert_eq!(parse_duration("P1DT2H"), Some(93_600));
        assert_eq!(parse_duration("PT0S"), Some(0));
    }

    #[test]
    fn parses_clock_durations() {
        assert_eq!(parse_duration("12:34"), Some(754));
        assert_eq!(parse_duration("1:02:03"), Some(3723));
        assert_eq!(parse_duration("0:07"), Some(7));
    }

    #[test]
    fn malformed_input_degrades_to_unknown() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("PT"), None);
        assert_eq!(parse_duration("P"), None);
        assert_eq!(parse_duration("PT1X"), None);
        assert_eq!(parse_duration("PT90"), None);
        assert_eq!(parse_duration("not a duration"), None);
        assert_eq!(parse_duration("1:2:3:4"), None);
        assert_eq!(parse_duration("::"), None);
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_seconds(Some(3723)), "1:02:03");
        assert_eq!(format_seconds(Some(754)), "12:34");
        assert_eq!(format_seconds(Some(65)), "1:05");
        assert_eq!(format_seconds(Some(7)), "0:07");
        assert_eq!(format_seconds(Some(0)), "0:00");
        assert_eq!(format_seconds(None), "Unknown");
    }

    #[test]
    fn iso_round_trips_to_clock_form() {
        for (iso, clock) in [
            ("PT1H2M3S", "1:02:03"),
            ("PT10M5S", "10:05"),
            ("PT59S", "0:59"),
        ] {
            let secs = parse_duration(iso);
            assert_eq!(format_seconds(secs), clock);
            assert_eq!(parse_duration(clock), secs);
        }
    }
}
