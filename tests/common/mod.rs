// SPDX-License-Identifier: MPL-2.0
//! Shared fixtures for integration tests.

use exif::{Field, In, Rational, Tag, Value};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn rational_dms((d, m, s): (u32, u32, u32)) -> Value {
    Value::Rational(
        [d, m, s]
            .into_iter()
            .map(|num| Rational { num, denom: 1 })
            .collect(),
    )
}

fn primary(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

/// JPEG bytes carrying only an EXIF segment with `fields`.
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

/// JPEG bytes with a GPS position.
pub fn gps_jpeg(
    latitude: (u32, u32, u32),
    latitude_ref: &str,
    longitude: (u32, u32, u32),
    longitude_ref: &str,
) -> Vec<u8> {
    exif_jpeg(&[
        primary(Tag::GPSLatitudeRef, Value::Ascii(vec![latitude_ref.into()])),
        primary(Tag::GPSLatitude, rational_dms(latitude)),
        primary(Tag::GPSLongitudeRef, Value::Ascii(vec![longitude_ref.into()])),
        primary(Tag::GPSLongitude, rational_dms(longitude)),
    ])
}

/// JPEG bytes with EXIF camera info but no GPS IFD.
pub fn camera_only_jpeg() -> Vec<u8> {
    exif_jpeg(&[primary(Tag::Make, Value::Ascii(vec![b"Canon".to_vec()]))])
}

/// A throwaway repository with the default `data/` and `public/images/` layout.
pub struct Site {
    _dir: TempDir,
    pub root: PathBuf,
}

impl Site {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join("data")).expect("data dir");
        fs::create_dir_all(root.join("public/images")).expect("images dir");
        Self { _dir: dir, root }
    }

    pub fn document(&self) -> PathBuf {
        self.root.join("data/imagesMeta.json")
    }

    pub fn write_document(&self, text: &str) {
        fs::write(self.document(), text).expect("failed to write document");
    }

    pub fn read_document(&self) -> String {
        fs::read_to_string(self.document()).expect("failed to read document")
    }

    pub fn write_image(&self, relative: impl AsRef<Path>, bytes: &[u8]) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create image dir");
        }
        fs::write(path, bytes).expect("failed to write image");
    }
}
