// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and EXIF fixtures.
//!
//! Float assertions come from the `approx` crate. Fixture images are
//! synthesised in memory: an EXIF block encoded with `kamadak-exif`'s writer,
//! wrapped in the smallest JPEG container the reader accepts.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

use exif::{Field, In, Rational, Tag, Value};
use std::io::Cursor;
use std::path::Path;

/// A DMS value of three whole-number rationals.
pub fn rational_dms(degrees: u32, minutes: u32, seconds: u32) -> Value {
    Value::Rational(vec![
        Rational {
            num: degrees,
            denom: 1,
        },
        Rational {
            num: minutes,
            denom: 1,
        },
        Rational {
            num: seconds,
            denom: 1,
        },
    ])
}

fn ascii(text: &str) -> Value {
    Value::Ascii(vec![text.as_bytes().to_vec()])
}

fn primary(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

/// The four positioning tags for a whole-second DMS position.
pub fn gps_fields(
    latitude: (u32, u32, u32),
    latitude_ref: &str,
    longitude: (u32, u32, u32),
    longitude_ref: &str,
) -> Vec<Field> {
    vec![
        primary(Tag::GPSLatitudeRef, ascii(latitude_ref)),
        primary(Tag::GPSLatitude, rational_dms(latitude.0, latitude.1, latitude.2)),
        primary(Tag::GPSLongitudeRef, ascii(longitude_ref)),
        primary(Tag::GPSLongitude, rational_dms(longitude.0, longitude.1, longitude.2)),
    ]
}

/// Encodes `fields` as a JPEG holding only an APP1 EXIF segment.
pub fn exif_jpeg(fields: &[Field]) -> Vec<u8> {
    let mut writer = exif::experimental::Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).expect("failed to encode EXIF");
    let tiff = tiff.into_inner();

    let segment_len = u16::try_from(2 + 6 + tiff.len()).expect("EXIF segment too large");
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Writes `bytes` to `path`, creating parent directories.
pub fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    std::fs::write(path, bytes).expect("failed to write fixture");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exif_jpeg_is_readable() {
        let bytes = exif_jpeg(&gps_fields((1, 2, 3), "N", (4, 5, 6), "E"));
        let exif = exif::Reader::new()
            .read_from_container(&mut Cursor::new(bytes))
            .expect("fixture should parse");
        let field = exif
            .get_field(Tag::GPSLatitude, In::PRIMARY)
            .expect("latitude present");
        assert!(matches!(
            &field.value,
            Value::Rational(v) if v.len() == 3 && v[0].num == 1 && v[2].num == 3
        ));
    }
}
