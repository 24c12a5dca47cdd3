use anyhow::{Context, Result};
use img_parts::Bytes;
use img_parts::ImageEXIF;
use img_parts::jpeg::{Jpeg, JpegSegment};
use little_exif::endian::Endian;
use little_exif::exif_tag::{ExifTag, ExifTagGroup};
use little_exif::exif_tag_format::ExifTagFormat;
use little_exif::filetype::FileExtension;
use little_exif::metadata::Metadata;
use std::path::Path;

use crate::naming::MetadataFields;

// TIFF stores the XMP packet as an IFD0 tag rather than a separate segment
const TAG_XMP_PACKET: u16 = 0x02BC;

// little_exif as_u8_vec(JPEG) returns: [APP1 marker 2B][length 2B][Exif\0\0 6B][TIFF data]
// img-parts set_exif() expects just the TIFF data (after Exif\0\0)
const JPEG_EXIF_OVERHEAD: usize = 10; // 2 + 2 + 6

const XMP_HEADER: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";

/// Write the derived metadata fields into the image file, in place.
///
/// JPEG gets the EXIF timestamp merged into its existing EXIF (all other
/// tags preserved) plus an XMP APP1 packet; TIFF gets both written through
/// the EXIF layer, with the XMP packet embedded as IFD0 tag 0x02BC.
///
/// Fails, leaving the file untouched, when the format is unsupported or
/// when the file carries EXIF data that cannot be parsed, rather than risk
/// discarding it on rewrite.
pub fn write_metadata(path: &Path, fields: &MetadataFields) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => write_jpeg(path, fields),
        "tif" | "tiff" => write_tiff(path, fields),
        other => anyhow::bail!("Unsupported image format: .{other}"),
    }
}

/// Load existing EXIF metadata from a file path using little_exif.
/// Returns None if there is nothing parseable there.
fn load_existing_metadata(path: &Path) -> Option<Metadata> {
    let path_owned = path.to_path_buf();
    // Suppress panics from little_exif
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));
    let result = std::panic::catch_unwind(move || Metadata::new_from_path(&path_owned));
    std::panic::set_hook(prev_hook);

    match result {
        Ok(Ok(metadata)) => {
            if metadata.data().is_empty() {
                None
            } else {
                log::debug!(
                    "little_exif loaded {} existing EXIF tags",
                    metadata.data().len()
                );
                Some(metadata)
            }
        }
        Ok(Err(e)) => {
            log::debug!("little_exif could not parse EXIF: {e}");
            None
        }
        Err(_) => {
            log::debug!("little_exif panicked parsing EXIF");
            None
        }
    }
}

/// Write metadata into a JPEG, preserving every existing segment.
fn write_jpeg(path: &Path, fields: &MetadataFields) -> Result<()> {
    let file_bytes = std::fs::read(path).context("Failed to read image file")?;

    let mut jpeg = Jpeg::from_bytes(Bytes::from(file_bytes))
        .map_err(|e| anyhow::anyhow!("Failed to parse JPEG: {e}"))?;

    if let Some(ref datetime) = fields.date_time_original {
        let orig_exif_pos = find_exif_segment_pos(jpeg.segments());
        let has_existing_exif = !jpeg.exif().unwrap_or_default().is_empty();

        let mut metadata = match load_existing_metadata(path) {
            Some(metadata) => metadata,
            None if has_existing_exif => {
                // Rebuilding from scratch here would drop tags we never saw.
                anyhow::bail!("Existing EXIF data could not be parsed; refusing to rewrite it");
            }
            None => Metadata::new(),
        };
        metadata.set_tag(ExifTag::DateTimeOriginal(datetime.clone()));

        let exif_bytes = metadata.as_u8_vec(FileExtension::JPEG);
        if exif_bytes.len() > JPEG_EXIF_OVERHEAD {
            jpeg.set_exif(Some(Bytes::from(exif_bytes[JPEG_EXIF_OVERHEAD..].to_vec())));

            // set_exif() inserts at position 3, which may be after the XMP
            // APP1. Move the EXIF segment back so EXIF stays first.
            if let Some(new_pos) = find_exif_segment_pos(jpeg.segments()) {
                let target_pos = orig_exif_pos.unwrap_or(1);
                if target_pos < new_pos {
                    let segments = jpeg.segments_mut();
                    let segment = segments.remove(new_pos);
                    segments.insert(target_pos, segment);
                }
            }
        }
    }

    update_xmp_segment(&mut jpeg, fields);

    let output = jpeg.encoder().bytes();
    std::fs::write(path, &output).context("Failed to write JPEG file")?;

    Ok(())
}

/// Write metadata into a TIFF through little_exif: the timestamp as a
/// regular EXIF tag, the XMP packet as IFD0 tag 0x02BC.
fn write_tiff(path: &Path, fields: &MetadataFields) -> Result<()> {
    let mut metadata = load_existing_metadata(path).unwrap_or_else(Metadata::new);

    if let Some(ref datetime) = fields.date_time_original {
        metadata.set_tag(ExifTag::DateTimeOriginal(datetime.clone()));
    }

    let packet = build_xmp_packet(fields).into_bytes();
    let xmp_tag = ExifTag::from_u16_with_data(
        TAG_XMP_PACKET,
        &ExifTagFormat::INT8U,
        &packet,
        &Endian::Little,
        &ExifTagGroup::IFD0,
    )
    .map_err(|e| anyhow::anyhow!("Failed to build XMP tag: {e}"))?;
    metadata.set_tag(xmp_tag);

    metadata
        .write_to_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to write TIFF metadata: {e}"))?;

    Ok(())
}

/// Find the position of the EXIF APP1 segment in a JPEG.
/// EXIF segments have marker 0xE1 and contents starting with "Exif\0\0".
fn find_exif_segment_pos(segments: &[JpegSegment]) -> Option<usize> {
    const EXIF_PREFIX: &[u8] = b"Exif\0\0";
    segments
        .iter()
        .position(|s| s.marker() == 0xE1 && s.contents().starts_with(EXIF_PREFIX))
}

/// Find the XMP APP1 segment position in a JPEG.
fn find_xmp_segment_pos(segments: &[JpegSegment]) -> Option<usize> {
    segments
        .iter()
        .position(|s| s.marker() == 0xE1 && s.contents().starts_with(XMP_HEADER))
}

/// Replace or insert the XMP APP1 segment with our fields injected.
fn update_xmp_segment(jpeg: &mut Jpeg, fields: &MetadataFields) {
    let xmp_pos = find_xmp_segment_pos(jpeg.segments());
    let existing_xmp = xmp_pos.map(|pos| {
        let contents = jpeg.segments()[pos].contents();
        String::from_utf8_lossy(&contents[XMP_HEADER.len()..]).to_string()
    });

    let new_xmp = match existing_xmp {
        Some(ref xmp) => inject_into_xmp(xmp, fields),
        None => build_xmp_packet(fields),
    };

    let mut contents = Vec::with_capacity(XMP_HEADER.len() + new_xmp.len());
    contents.extend_from_slice(XMP_HEADER);
    contents.extend_from_slice(new_xmp.as_bytes());
    let new_segment = JpegSegment::new_with_contents(0xE1, Bytes::from(contents));

    let segments = jpeg.segments_mut();
    if let Some(pos) = xmp_pos {
        segments[pos] = new_segment;
    } else {
        // Insert after the EXIF APP1 if there is one
        let insert_pos = find_exif_segment_pos(segments)
            .map(|p| p + 1)
            .unwrap_or(1)
            .min(segments.len());
        segments.insert(insert_pos, new_segment);
    }
}

/// The rdf:Description body elements for our fields.
fn xmp_field_elements(fields: &MetadataFields) -> String {
    let mut elements = String::new();
    elements.push_str(&format!(
        "  <xmp:Identifier><rdf:Bag><rdf:li>{}</rdf:li></rdf:Bag></xmp:Identifier>\n",
        fields.identifier
    ));
    if let Some(ref date) = fields.date_created {
        elements.push_str(&format!(
            "  <Iptc4xmpCore:DateCreated>{date}</Iptc4xmpCore:DateCreated>\n"
        ));
    }
    if let Some(ref datetime) = fields.photoshop_date_created {
        elements.push_str(&format!(
            "  <photoshop:DateCreated>{datetime}</photoshop:DateCreated>\n"
        ));
    }
    elements
}

/// Build a fresh XMP packet carrying only our fields.
fn build_xmp_packet(fields: &MetadataFields) -> String {
    let mut xmp = String::new();
    xmp.push_str("<?xpacket begin=\"\u{feff}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n");
    xmp.push_str("<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">\n");
    xmp.push_str("<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">\n");
    xmp.push_str("<rdf:Description rdf:about=\"\"\n");
    xmp.push_str("  xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\"\n");
    xmp.push_str("  xmlns:Iptc4xmpCore=\"http://iptc.org/std/Iptc4xmpCore/1.0/xmlns/\"\n");
    xmp.push_str("  xmlns:photoshop=\"http://ns.adobe.com/photoshop/1.0/\">\n");
    xmp.push_str(&xmp_field_elements(fields));
    xmp.push_str("</rdf:Description>\n");
    xmp.push_str("</rdf:RDF>\n");
    xmp.push_str("</x:xmpmeta>\n");
    xmp.push_str("<?xpacket end=\"w\"?>");
    xmp
}

/// Inject our fields into an existing XMP packet, replacing earlier values
/// of the same elements and leaving everything else in place.
fn inject_into_xmp(xmp: &str, fields: &MetadataFields) -> String {
    let mut result = xmp.to_string();

    for (prefix, uri) in [
        ("xmp", "http://ns.adobe.com/xap/1.0/"),
        ("Iptc4xmpCore", "http://iptc.org/std/Iptc4xmpCore/1.0/xmlns/"),
        ("photoshop", "http://ns.adobe.com/photoshop/1.0/"),
    ] {
        ensure_namespace(&mut result, prefix, uri);
    }

    // A self-closing rdf:Description has no body to insert into; open it up.
    if !result.contains("</rdf:Description>") {
        if let Some(desc_start) = result.find("<rdf:Description") {
            if let Some(close_pos) = result[desc_start..].find("/>") {
                let abs_close = desc_start + close_pos;
                result.replace_range(abs_close..abs_close + 2, ">");
                if let Some(rdf_end) = result.find("</rdf:RDF>") {
                    result.insert_str(rdf_end, "</rdf:Description>\n");
                }
            }
        }
    }

    for element in [
        "xmp:Identifier",
        "Iptc4xmpCore:DateCreated",
        "photoshop:DateCreated",
    ] {
        remove_xml_element(&mut result, element);
    }

    if let Some(pos) = result.find("</rdf:Description>") {
        result.insert_str(pos, &xmp_field_elements(fields));
    }

    result
}

/// Declare a namespace on the rdf:Description if it is missing.
fn ensure_namespace(xmp: &mut String, prefix: &str, uri: &str) {
    if xmp.contains(&format!("xmlns:{prefix}=")) {
        return;
    }
    if let Some(pos) = xmp.find("rdf:about=\"\"") {
        let insert_at = pos + "rdf:about=\"\"".len();
        xmp.insert_str(insert_at, &format!("\n  xmlns:{prefix}=\"{uri}\""));
    }
}

/// Remove an XML element and its contents from a string.
fn remove_xml_element(xml: &mut String, tag: &str) {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    if let Some(start) = xml.find(&open) {
        if let Some(end) = xml[start..].find(&close) {
            let mut end_abs = start + end + close.len();
            if xml.as_bytes().get(end_abs) == Some(&b'\n') {
                end_abs += 1;
            }
            xml.replace_range(start..end_abs, "");
        }
    }
}
