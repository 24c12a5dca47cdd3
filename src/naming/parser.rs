/// Components extracted from a structured photo filename.
///
/// Numeric fields are captured as-is and are *not* range-checked here —
/// `0000.99.99...` parses fine. Run the result through
/// [`validate`](crate::naming::validate) before trusting the values.
///
/// A value of `0` in a date/time field means "unknown" at that precision,
/// e.g. `1950.06.00` is "June 1950, exact day unknown".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Date-confidence tag, normalized to uppercase (`E` = exact, `C` = circa, ...).
    pub modifier: char,
    /// Categorical group label, case preserved.
    pub group: String,
    /// Categorical subgroup label, case preserved.
    pub subgroup: String,
    /// Sequence number as a digit string, leading zeros preserved.
    pub sequence: String,
    /// File extension, normalized to lowercase.
    pub extension: String,
}

/// Parse a structured photo filename into its components.
///
/// Expected format: `YYYY.MM.DD.HH.NN.SS.X.GGG.SSS.NNNNNN.ext`
///
/// The first ten dot-separated fields are mandatory: six digit groups, a
/// single-letter modifier, two free-form labels, and a digit-string sequence
/// number. Any further fields before the extension are processing-history
/// suffixes (`.A`, `.RAW`, `.WEB`, ...) and are ignored. The final field is
/// the extension and must be letters only.
///
/// Returns `None` if the filename does not match the format — a partially
/// filled result never escapes.
///
/// # Example
///
/// ```rust
/// use naming_exif::naming::parse;
///
/// let parsed = parse("1950.06.15.12.30.45.E.FAM.POR.000001.jpg").unwrap();
/// assert_eq!(parsed.year, 1950);
/// assert_eq!(parsed.modifier, 'E');
/// assert_eq!(parsed.sequence, "000001");
///
/// assert!(parse("invalid.jpg").is_none());
/// ```
pub fn parse(filename: &str) -> Option<ParsedFilename> {
    let fields: Vec<&str> = filename.split('.').collect();

    // Ten mandatory fields plus the extension; empty fields never match.
    if fields.len() < 11 || fields.iter().any(|f| f.is_empty()) {
        return None;
    }

    let year = digits::<u16>(fields[0])?;
    let month = digits::<u8>(fields[1])?;
    let day = digits::<u8>(fields[2])?;
    let hour = digits::<u8>(fields[3])?;
    let minute = digits::<u8>(fields[4])?;
    let second = digits::<u8>(fields[5])?;
    let modifier = single_letter(fields[6])?;
    let group = fields[7].to_string();
    let subgroup = fields[8].to_string();
    let sequence = digit_string(fields[9])?;
    // fields[10..len-1] are ignored suffixes
    let extension = letters(fields[fields.len() - 1])?;

    Some(ParsedFilename {
        year,
        month,
        day,
        hour,
        minute,
        second,
        modifier: modifier.to_ascii_uppercase(),
        group,
        subgroup,
        sequence,
        extension: extension.to_lowercase(),
    })
}

/// Convert a digit group to an integer. Non-digits and overflow both fail.
fn digits<T: std::str::FromStr>(field: &str) -> Option<T> {
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Accept exactly one ASCII letter.
fn single_letter(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
        _ => None,
    }
}

/// Accept a digit string verbatim (leading zeros matter, so no conversion).
fn digit_string(field: &str) -> Option<String> {
    if field.bytes().all(|b| b.is_ascii_digit()) {
        Some(field.to_string())
    } else {
        None
    }
}

/// Accept an ASCII-letters-only field.
fn letters(field: &str) -> Option<&str> {
    if field.bytes().all(|b| b.is_ascii_alphabetic()) {
        Some(field)
    } else {
        None
    }
}
