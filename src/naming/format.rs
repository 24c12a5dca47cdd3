use uuid::Uuid;

use super::parser::ParsedFilename;

/// Modifier marking an exact date. Only exact dates get full-precision
/// timestamp fields — every other modifier means the time cannot be trusted.
pub const EXACT_DATE_MODIFIER: char = 'E';

/// Format a date-only string at whatever precision the record carries.
///
/// Degrades progressively: `YYYY-MM-DD`, then `YYYY-MM` when the day is
/// unknown, then `YYYY` when the month is unknown. Returns `None` only when
/// the year itself is unknown. Never includes a time component.
pub fn format_partial_date(parsed: &ParsedFilename) -> Option<String> {
    if parsed.year == 0 {
        return None;
    }
    if parsed.month == 0 {
        return Some(format!("{:04}", parsed.year));
    }
    if parsed.day == 0 {
        return Some(format!("{:04}-{:02}", parsed.year, parsed.month));
    }
    Some(format!(
        "{:04}-{:02}-{:02}",
        parsed.year, parsed.month, parsed.day
    ))
}

/// Format an ISO-style `YYYY-MM-DDThh:mm:ss` timestamp.
///
/// Defined only for exact dates (`modifier == 'E'`); every other modifier
/// yields `None` no matter how complete the numeric fields are. When defined,
/// the time component is always present — `T00:00:00` included — taken
/// literally from the record.
pub fn format_full_datetime(parsed: &ParsedFilename) -> Option<String> {
    if parsed.modifier != EXACT_DATE_MODIFIER {
        return None;
    }
    Some(format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        parsed.year, parsed.month, parsed.day, parsed.hour, parsed.minute, parsed.second
    ))
}

/// Format a colon-delimited `YYYY:MM:DD hh:mm:ss` timestamp, the layout EXIF
/// date tags use. Gated on `modifier == 'E'` exactly like
/// [`format_full_datetime`].
pub fn format_numeric_datetime(parsed: &ParsedFilename) -> Option<String> {
    if parsed.modifier != EXACT_DATE_MODIFIER {
        return None;
    }
    Some(format!(
        "{:04}:{:02}:{:02} {:02}:{:02}:{:02}",
        parsed.year, parsed.month, parsed.day, parsed.hour, parsed.minute, parsed.second
    ))
}

/// Generate a fresh opaque identifier (UUIDv4).
///
/// Independent of any record; safe to call from concurrent contexts.
pub fn new_identifier() -> String {
    Uuid::new_v4().to_string()
}

/// The metadata field values derived from one validated record, keyed the way
/// the writer and the logs name them.
///
/// `identifier` is always present; the date fields follow their own precision
/// gates, so any of them may be absent.
#[derive(Debug, Clone)]
pub struct MetadataFields {
    /// `XMP:Identifier` — fresh UUID per formatting pass.
    pub identifier: String,
    /// `EXIF:DateTimeOriginal` — exact dates only.
    pub date_time_original: Option<String>,
    /// `XMP:Iptc4xmpCore:DateCreated` — date-only, partial precision.
    pub date_created: Option<String>,
    /// `XMP:photoshop:DateCreated` — exact dates only, full precision.
    pub photoshop_date_created: Option<String>,
}

impl MetadataFields {
    /// Derive all output fields from a validated record.
    ///
    /// # Example
    ///
    /// ```rust
    /// use naming_exif::naming::{parse, MetadataFields};
    ///
    /// let parsed = parse("1950.06.15.12.30.45.E.FAM.POR.000001.jpg").unwrap();
    /// let fields = MetadataFields::from_parsed(&parsed);
    /// assert_eq!(fields.date_created.as_deref(), Some("1950-06-15"));
    /// assert_eq!(fields.photoshop_date_created.as_deref(), Some("1950-06-15T12:30:45"));
    /// ```
    pub fn from_parsed(parsed: &ParsedFilename) -> Self {
        Self {
            identifier: new_identifier(),
            date_time_original: format_numeric_datetime(parsed),
            date_created: format_partial_date(parsed),
            photoshop_date_created: format_full_datetime(parsed),
        }
    }

    /// Present fields as `(tag name, value)` pairs in a stable order, for
    /// logging and for handing to the metadata writer.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = vec![("XMP:Identifier", self.identifier.as_str())];
        if let Some(ref value) = self.date_time_original {
            entries.push(("EXIF:DateTimeOriginal", value));
        }
        if let Some(ref value) = self.date_created {
            entries.push(("XMP:Iptc4xmpCore:DateCreated", value));
        }
        if let Some(ref value) = self.photoshop_date_created {
            entries.push(("XMP:photoshop:DateCreated", value));
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::parse;

    fn parsed(name: &str) -> ParsedFilename {
        parse(name).unwrap()
    }

    // ── Partial-precision date ───────────────────────────────────────

    #[test]
    fn partial_date_full() {
        let record = parsed("1950.06.15.12.00.00.E.FAM.POR.000001.tiff");
        assert_eq!(format_partial_date(&record).as_deref(), Some("1950-06-15"));
    }

    #[test]
    fn partial_date_year_month() {
        let record = parsed("1950.06.00.00.00.00.C.FAM.POR.000002.jpg");
        assert_eq!(format_partial_date(&record).as_deref(), Some("1950-06"));
    }

    #[test]
    fn partial_date_year_only() {
        let record = parsed("1950.00.00.00.00.00.C.TRV.LND.000003.tiff");
        assert_eq!(format_partial_date(&record).as_deref(), Some("1950"));
    }

    #[test]
    fn partial_date_absent() {
        let record = parsed("0000.00.00.00.00.00.A.UNK.000.000001.jpg");
        assert_eq!(format_partial_date(&record), None);
    }

    #[test]
    fn partial_date_zero_pads() {
        let record = parsed("850.6.5.0.0.0.E.FAM.POR.000001.tiff");
        assert_eq!(format_partial_date(&record).as_deref(), Some("0850-06-05"));
    }

    // ── Full-precision date-time ─────────────────────────────────────

    #[test]
    fn full_datetime_exact_with_time() {
        let record = parsed("1950.06.15.12.30.45.E.FAM.POR.000001.tiff");
        assert_eq!(
            format_full_datetime(&record).as_deref(),
            Some("1950-06-15T12:30:45")
        );
    }

    #[test]
    fn full_datetime_exact_no_time() {
        // Time is always included for exact dates, even midnight.
        let record = parsed("1950.06.15.00.00.00.E.FAM.POR.000001.tiff");
        assert_eq!(
            format_full_datetime(&record).as_deref(),
            Some("1950-06-15T00:00:00")
        );
    }

    #[test]
    fn full_datetime_absent_for_non_exact() {
        for name in [
            "1950.06.00.00.00.00.C.FAM.POR.000002.jpg",
            "1950.00.00.00.00.00.C.TRV.LND.000003.tiff",
            "0000.00.00.00.00.00.A.UNK.000.000001.jpg",
        ] {
            assert_eq!(format_full_datetime(&parsed(name)), None, "{name}");
        }
    }

    // ── Numeric date-time ────────────────────────────────────────────

    #[test]
    fn numeric_datetime_exact() {
        let record = parsed("1950.06.15.12.30.00.E.FAM.POR.000001.tiff");
        assert_eq!(
            format_numeric_datetime(&record).as_deref(),
            Some("1950:06:15 12:30:00")
        );
    }

    #[test]
    fn numeric_datetime_absent_for_non_exact() {
        let record = parsed("1950.06.15.12.30.00.C.FAM.POR.000001.tiff");
        assert_eq!(format_numeric_datetime(&record), None);
    }

    // ── Gate exclusivity ─────────────────────────────────────────────

    #[test]
    fn timestamp_gates_depend_only_on_modifier() {
        // Calendar-complete record: both timestamp outputs exist iff E.
        for modifier in ['A', 'B', 'C', 'F', 'X'] {
            let mut record = parsed("1950.06.15.12.30.45.E.FAM.POR.000001.tiff");
            record.modifier = modifier;
            assert_eq!(format_full_datetime(&record), None, "{modifier}");
            assert_eq!(format_numeric_datetime(&record), None, "{modifier}");
            // The date-only field is modifier-blind.
            assert_eq!(format_partial_date(&record).as_deref(), Some("1950-06-15"));
        }
    }

    // ── Identifier ───────────────────────────────────────────────────

    #[test]
    fn identifiers_are_unique() {
        let a = new_identifier();
        let b = new_identifier();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    // ── Field assembly ───────────────────────────────────────────────

    #[test]
    fn fields_for_exact_date() {
        let record = parsed("1950.06.15.12.30.00.E.FAM.POR.000001.tiff");
        let fields = MetadataFields::from_parsed(&record);

        assert_eq!(
            fields.date_time_original.as_deref(),
            Some("1950:06:15 12:30:00")
        );
        assert_eq!(fields.date_created.as_deref(), Some("1950-06-15"));
        assert_eq!(
            fields.photoshop_date_created.as_deref(),
            Some("1950-06-15T12:30:00")
        );

        let names: Vec<&str> = fields.entries().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "XMP:Identifier",
                "EXIF:DateTimeOriginal",
                "XMP:Iptc4xmpCore:DateCreated",
                "XMP:photoshop:DateCreated",
            ]
        );
    }

    #[test]
    fn fields_for_circa_date() {
        let record = parsed("1950.06.00.00.00.00.C.FAM.POR.000002.jpg");
        let fields = MetadataFields::from_parsed(&record);

        assert_eq!(fields.date_time_original, None);
        assert_eq!(fields.date_created.as_deref(), Some("1950-06"));
        assert_eq!(fields.photoshop_date_created, None);
    }

    #[test]
    fn fields_for_absent_date() {
        let record = parsed("0000.00.00.00.00.00.A.UNK.000.000001.jpg");
        let fields = MetadataFields::from_parsed(&record);

        assert!(!fields.identifier.is_empty());
        assert_eq!(fields.date_time_original, None);
        assert_eq!(fields.date_created, None);
        assert_eq!(fields.photoshop_date_created, None);
        assert_eq!(fields.entries().len(), 1);
    }

    #[test]
    fn each_formatting_pass_gets_a_fresh_identifier() {
        let record = parsed("1950.06.15.12.30.00.E.FAM.POR.000001.tiff");
        let first = MetadataFields::from_parsed(&record);
        let second = MetadataFields::from_parsed(&record);
        assert_ne!(first.identifier, second.identifier);
    }
}
