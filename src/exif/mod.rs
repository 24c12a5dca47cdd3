//! EXIF and XMP metadata writing.
//!
//! One entry point: [`write_metadata`] — persist the fields derived from a
//! filename into the image, in place. JPEG and TIFF are supported; the
//! writer preserves whatever metadata the file already carries and refuses
//! to touch files whose EXIF it cannot read back.

mod writer;

pub use writer::write_metadata;
