use thiserror::Error;

use super::parser::ParsedFilename;

/// Date-confidence modifiers a filename may carry.
pub const VALID_MODIFIERS: [char; 5] = ['A', 'B', 'C', 'E', 'F'];

/// Day bound per month, January first. February is capped at 29 for every
/// year — the naming convention does no leap-year arithmetic.
const DAYS_IN_MONTH: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A single rule violation found in a [`ParsedFilename`].
///
/// Violations carry the offending value(s) and render the allowed
/// range/rule in their `Display` output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Invalid modifier: '{0}' (must be one of: A, B, C, E, F)")]
    Modifier(char),

    #[error("Invalid month value: {0} (must be 00-12)")]
    MonthRange(u8),

    #[error("Invalid day value: {day} for month {month} (must be 00-{max})")]
    DayRangeForMonth { day: u8, month: u8, max: u8 },

    #[error("Invalid day value: {0} (must be 00-31)")]
    DayRange(u8),

    #[error("Invalid hour value: {0} (must be 00-23)")]
    HourRange(u8),

    #[error("Invalid minute value: {0} (must be 00-59)")]
    MinuteRange(u8),

    #[error("Invalid second value: {0} (must be 00-59)")]
    SecondRange(u8),

    #[error("Invalid date: month is 00 but day is {0:02} (when month=00, day must also be 00)")]
    DayWithoutMonth(u8),

    #[error(
        "Invalid date: month is 00 but time is {hour:02}:{minute:02}:{second:02} \
         (when month=00, time must be 00:00:00)"
    )]
    TimeWithoutMonth { hour: u8, minute: u8, second: u8 },

    #[error(
        "Invalid date: day is 00 but time is {hour:02}:{minute:02}:{second:02} \
         (when day=00, time must be 00:00:00)"
    )]
    TimeWithoutDay { hour: u8, minute: u8, second: u8 },

    #[error(
        "Invalid time: hour is 00 but minutes/seconds are {minute:02}:{second:02} \
         (when hour=00, minutes and seconds must also be 00)"
    )]
    MinutesSecondsWithoutHour { minute: u8, second: u8 },

    #[error("Invalid time: minute is 00 but second is {0:02} (when minute=00, second must also be 00)")]
    SecondWithoutMinute(u8),
}

/// Check a parsed filename against the naming convention rules.
///
/// Returns every violation found, in a fixed order: modifier membership,
/// date ranges, time ranges, then the precision cascade. Rules are evaluated
/// independently — an out-of-range month does not suppress the day or cascade
/// checks — so one pass yields the complete diagnostic.
///
/// An empty result means the record is valid.
///
/// # Example
///
/// ```rust
/// use naming_exif::naming::{parse, validate};
///
/// let parsed = parse("1950.06.15.12.30.45.E.FAM.POR.000001.jpg").unwrap();
/// assert!(validate(&parsed).is_empty());
///
/// let parsed = parse("1950.02.30.00.00.00.E.FAM.POR.000002.tiff").unwrap();
/// assert_eq!(validate(&parsed).len(), 1);
/// ```
pub fn validate(parsed: &ParsedFilename) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !VALID_MODIFIERS.contains(&parsed.modifier) {
        violations.push(Violation::Modifier(parsed.modifier));
    }

    validate_date(parsed, &mut violations);
    validate_time(parsed, &mut violations);
    validate_cascade(parsed, &mut violations);

    violations
}

fn validate_date(parsed: &ParsedFilename, violations: &mut Vec<Violation>) {
    if parsed.month > 12 {
        violations.push(Violation::MonthRange(parsed.month));
    }

    // The month-specific bound only applies when the month itself is usable;
    // otherwise fall back to the loose 31-day bound.
    if (1..=12).contains(&parsed.month) {
        let max = DAYS_IN_MONTH[(parsed.month - 1) as usize];
        if parsed.day > max {
            violations.push(Violation::DayRangeForMonth {
                day: parsed.day,
                month: parsed.month,
                max,
            });
        }
    } else if parsed.day > 31 {
        violations.push(Violation::DayRange(parsed.day));
    }
}

fn validate_time(parsed: &ParsedFilename, violations: &mut Vec<Violation>) {
    if parsed.hour > 23 {
        violations.push(Violation::HourRange(parsed.hour));
    }
    if parsed.minute > 59 {
        violations.push(Violation::MinuteRange(parsed.minute));
    }
    if parsed.second > 59 {
        violations.push(Violation::SecondRange(parsed.second));
    }
}

/// Once a field is marked unknown (00), every finer-grained field must be
/// unknown too: month=00 forces day and time to 00, day=00 forces time to 00,
/// hour=00 forces minutes/seconds to 00, minute=00 forces seconds to 00.
fn validate_cascade(parsed: &ParsedFilename, violations: &mut Vec<Violation>) {
    let time_known = parsed.hour != 0 || parsed.minute != 0 || parsed.second != 0;

    if parsed.month == 0 {
        if parsed.day != 0 {
            violations.push(Violation::DayWithoutMonth(parsed.day));
        }
        if time_known {
            violations.push(Violation::TimeWithoutMonth {
                hour: parsed.hour,
                minute: parsed.minute,
                second: parsed.second,
            });
        }
    }

    if parsed.day == 0 && time_known {
        violations.push(Violation::TimeWithoutDay {
            hour: parsed.hour,
            minute: parsed.minute,
            second: parsed.second,
        });
    }

    if parsed.hour == 0 && (parsed.minute != 0 || parsed.second != 0) {
        violations.push(Violation::MinutesSecondsWithoutHour {
            minute: parsed.minute,
            second: parsed.second,
        });
    }

    if parsed.minute == 0 && parsed.second != 0 {
        violations.push(Violation::SecondWithoutMinute(parsed.second));
    }
}
