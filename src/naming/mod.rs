//! Structured-filename parsing, validation, and metadata formatting.
//!
//! This module is the computational core of the crate and is pure: no I/O,
//! no shared state, every function safe to call concurrently.
//!
//! - [`parse`] — turn a filename into a [`ParsedFilename`], or reject it
//! - [`validate`] — collect every rule [`Violation`] in one pass
//! - [`MetadataFields`] and the `format_*` functions — derive the metadata
//!   strings written into the image

mod format;
mod parser;
mod validator;

pub use format::{
    EXACT_DATE_MODIFIER, MetadataFields, format_full_datetime, format_numeric_datetime,
    format_partial_date, new_identifier,
};
pub use parser::{ParsedFilename, parse};
pub use validator::{VALID_MODIFIERS, Violation, validate};
