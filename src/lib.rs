//! # naming-exif
//!
//! Extracts date and categorical metadata encoded in structured photo
//! filenames (`YYYY.MM.DD.HH.NN.SS.X.GGG.SSS.NNNNNN.ext`), validates it, and
//! writes the derived date fields into the image's EXIF/XMP metadata before
//! filing the photo away under a `processed/` directory.
//!
//! A `00` date or time component means "unknown at this precision":
//! `1950.06.00` is "June 1950, exact day unknown". The single-letter
//! modifier records how trustworthy the date is — only exact dates (`E`)
//! get full timestamp fields; circa dates get a date-only field at whatever
//! precision they carry.
//!
//! ## Quick Start
//!
//! The simplest way to use the library is through the pipeline module,
//! which handles the full collect → admit → write → relocate flow:
//!
//! ```rust,no_run
//! use naming_exif::config::Config;
//! use naming_exif::pipeline::{collect_files, run};
//! use naming_exif::plugin::{FileProcessorPlugin, NamingExifPlugin};
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Some("config.json".as_ref()))?;
//!
//!     let mut plugin = NamingExifPlugin::new();
//!     if !plugin.initialize(&config) {
//!         anyhow::bail!("Plugin failed to initialize");
//!     }
//!
//!     let files = collect_files(&[PathBuf::from("./scans")]);
//!     let summary = run(&plugin, &files, &config);
//!
//!     println!(
//!         "{} processed, {} skipped, {} failed",
//!         summary.processed.len(),
//!         summary.skipped.len(),
//!         summary.failed.len()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! The parsing, validation, and formatting core is pure and can be used on
//! its own:
//!
//! ```rust
//! use naming_exif::naming::{parse, validate, MetadataFields};
//!
//! let parsed = parse("1950.06.15.12.30.45.E.FAM.POR.000001.jpg").unwrap();
//! assert!(validate(&parsed).is_empty());
//!
//! let fields = MetadataFields::from_parsed(&parsed);
//! assert_eq!(fields.date_created.as_deref(), Some("1950-06-15"));
//! assert_eq!(
//!     fields.photoshop_date_created.as_deref(),
//!     Some("1950-06-15T12:30:45")
//! );
//! ```
//!
//! ## Modules
//!
//! - [`naming`] — filename grammar parser, semantic validator, metadata formatter
//! - [`exif`] — EXIF/XMP writing into JPEG and TIFF files
//! - [`plugin`] — the file-processor plugin contract and its implementation
//! - [`pipeline`] — file collection and the batch run loop
//! - [`config`] — configuration types and loading/saving

pub mod config;
pub mod exif;
pub mod naming;
pub mod pipeline;
pub mod plugin;
