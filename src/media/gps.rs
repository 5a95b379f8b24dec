// SPDX-License-Identifier: MPL-2.0
//! GPS tag extraction from image EXIF data.
//!
//! Reads the embedded EXIF block with `kamadak-exif`, collects the GPS fields
//! needed for positioning into a [`GpsTagBlock`], and resolves that block to
//! [`GpsCoordinates`].

use crate::domain::metadata::{Axis, ConversionError, Dms, DmsComponent, GpsCoordinates};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// =============================================================================
// GpsTag
// =============================================================================

/// GPS tags consumed by the backfill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GpsTag {
    LatitudeRef,
    Latitude,
    LongitudeRef,
    Longitude,
}

/// Tag table: our tag, the EXIF tag, and its conventional name.
const GPS_TAG_TABLE: [(GpsTag, exif::Tag, &str); 4] = [
    (GpsTag::LatitudeRef, exif::Tag::GPSLatitudeRef, "GPSLatitudeRef"),
    (GpsTag::Latitude, exif::Tag::GPSLatitude, "GPSLatitude"),
    (GpsTag::LongitudeRef, exif::Tag::GPSLongitudeRef, "GPSLongitudeRef"),
    (GpsTag::Longitude, exif::Tag::GPSLongitude, "GPSLongitude"),
];

impl GpsTag {
    pub const ALL: [GpsTag; 4] = [
        GpsTag::LatitudeRef,
        GpsTag::Latitude,
        GpsTag::LongitudeRef,
        GpsTag::Longitude,
    ];

    /// Looks up an EXIF tag in the table.
    pub fn from_exif(tag: exif::Tag) -> Option<Self> {
        GPS_TAG_TABLE
            .iter()
            .find(|(_, exif_tag, _)| *exif_tag == tag)
            .map(|(gps_tag, _, _)| *gps_tag)
    }

    pub fn exif_tag(self) -> exif::Tag {
        GPS_TAG_TABLE[self.index()].1
    }

    pub fn name(self) -> &'static str {
        GPS_TAG_TABLE[self.index()].2
    }

    fn index(self) -> usize {
        match self {
            GpsTag::LatitudeRef => 0,
            GpsTag::Latitude => 1,
            GpsTag::LongitudeRef => 2,
            GpsTag::Longitude => 3,
        }
    }
}

impl fmt::Display for GpsTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Failure to obtain an EXIF block from a file.
#[derive(Debug, Clone, PartialEq)]
pub enum ExifReadError {
    /// The file could not be opened.
    Io(String),

    /// The container is valid but carries no EXIF block.
    NoExif,

    /// Unknown format or corrupted EXIF data.
    Unreadable(String),
}

impl fmt::Display for ExifReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExifReadError::Io(msg) => write!(f, "I/O error: {msg}"),
            ExifReadError::NoExif => write!(f, "no EXIF data"),
            ExifReadError::Unreadable(msg) => write!(f, "unreadable EXIF: {msg}"),
        }
    }
}

impl std::error::Error for ExifReadError {}

/// Failure to resolve a [`GpsTagBlock`] to coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum GpsBlockError {
    /// A required tag is absent or empty.
    Missing(GpsTag),
    Conversion(ConversionError),
}

impl fmt::Display for GpsBlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsBlockError::Missing(tag) => write!(f, "missing GPS tag {tag}"),
            GpsBlockError::Conversion(err) => write!(f, "{err}"),
        }
    }
}

impl From<ConversionError> for GpsBlockError {
    fn from(err: ConversionError) -> Self {
        GpsBlockError::Conversion(err)
    }
}

// =============================================================================
// GpsTagBlock
// =============================================================================

/// Raw GPS values of the primary image, keyed by [`GpsTag`].
#[derive(Debug, Clone, Default)]
pub struct GpsTagBlock {
    values: HashMap<GpsTag, exif::Value>,
}

impl GpsTagBlock {
    /// Collects GPS fields of the primary image.
    ///
    /// Returns `None` when the EXIF data has no GPS IFD at all.
    pub fn from_exif(exif: &exif::Exif) -> Option<Self> {
        let mut has_gps_ifd = false;
        let mut values = HashMap::new();

        for field in exif.fields() {
            if field.ifd_num != exif::In::PRIMARY || field.tag.context() != exif::Context::Gps {
                continue;
            }
            has_gps_ifd = true;
            if let Some(tag) = GpsTag::from_exif(field.tag) {
                values.insert(tag, field.value.clone());
            }
        }

        has_gps_ifd.then_some(Self { values })
    }

    pub fn insert(&mut self, tag: GpsTag, value: exif::Value) {
        self.values.insert(tag, value);
    }

    pub fn get(&self, tag: GpsTag) -> Option<&exif::Value> {
        self.values.get(&tag)
    }

    /// Resolves the block to decimal degrees.
    ///
    /// All four tags must be present and non-empty before any conversion is
    /// attempted.
    pub fn coordinates(&self) -> Result<GpsCoordinates, GpsBlockError> {
        let lat = self.dms_components(GpsTag::Latitude)?;
        let lat_ref = self.reference(GpsTag::LatitudeRef, Axis::Latitude)?;
        let lon = self.dms_components(GpsTag::Longitude)?;
        let lon_ref = self.reference(GpsTag::LongitudeRef, Axis::Longitude)?;

        let lat = Dms::from_components(&lat?)?;
        let lon = Dms::from_components(&lon?)?;
        GpsCoordinates::from_dms(&lat, &lat_ref?, &lon, &lon_ref?).map_err(GpsBlockError::from)
    }

    /// Outer error: tag missing. Inner error: value present but unusable.
    fn dms_components(
        &self,
        tag: GpsTag,
    ) -> Result<Result<Vec<DmsComponent>, ConversionError>, GpsBlockError> {
        let value = self.get(tag).ok_or(GpsBlockError::Missing(tag))?;
        match dms_components(value) {
            Ok(components) if components.is_empty() => Err(GpsBlockError::Missing(tag)),
            other => Ok(other),
        }
    }

    fn reference(
        &self,
        tag: GpsTag,
        axis: Axis,
    ) -> Result<Result<String, ConversionError>, GpsBlockError> {
        let value = self.get(tag).ok_or(GpsBlockError::Missing(tag))?;
        match value {
            exif::Value::Ascii(strings) => {
                let text = strings
                    .first()
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                    .unwrap_or_default();
                if text.trim_matches(|c: char| c.is_whitespace() || c == '\0').is_empty() {
                    Err(GpsBlockError::Missing(tag))
                } else {
                    Ok(Ok(text))
                }
            }
            other => Ok(Err(ConversionError::InvalidReference {
                axis,
                reference: format!("{other:?}"),
            })),
        }
    }
}

/// Splits an EXIF value into DMS components.
fn dms_components(value: &exif::Value) -> Result<Vec<DmsComponent>, ConversionError> {
    use exif::Value;

    let components = match value {
        Value::Rational(v) => v
            .iter()
            .map(|r| DmsComponent::Ratio {
                numerator: i64::from(r.num),
                denominator: i64::from(r.denom),
            })
            .collect(),
        Value::SRational(v) => v
            .iter()
            .map(|r| DmsComponent::Ratio {
                numerator: i64::from(r.num),
                denominator: i64::from(r.denom),
            })
            .collect(),
        Value::Double(v) => v.iter().copied().map(DmsComponent::Number).collect(),
        Value::Float(v) => v.iter().map(|x| DmsComponent::Number(f64::from(*x))).collect(),
        Value::Byte(v) => v.iter().map(|x| DmsComponent::Number(f64::from(*x))).collect(),
        Value::Short(v) => v.iter().map(|x| DmsComponent::Number(f64::from(*x))).collect(),
        Value::Long(v) => v.iter().map(|x| DmsComponent::Number(f64::from(*x))).collect(),
        Value::SByte(v) => v.iter().map(|x| DmsComponent::Number(f64::from(*x))).collect(),
        Value::SShort(v) => v.iter().map(|x| DmsComponent::Number(f64::from(*x))).collect(),
        Value::SLong(v) => v.iter().map(|x| DmsComponent::Number(f64::from(*x))).collect(),
        other => {
            return Err(ConversionError::MalformedDms(format!(
                "non-numeric value {other:?}"
            )))
        }
    };
    Ok(components)
}

// =============================================================================
// File access
// =============================================================================

/// Reads the EXIF block of an image file.
///
/// The file handle is dropped before returning.
pub fn read_exif<P: AsRef<Path>>(path: P) -> Result<exif::Exif, ExifReadError> {
    let file = File::open(path.as_ref()).map_err(|e| ExifReadError::Io(e.to_string()))?;
    let mut reader = BufReader::new(file);

    let result = exif::Reader::new()
        .continue_on_error(true)
        .read_from_container(&mut reader)
        .or_else(|e| {
            e.distill_partial_result(|errors| {
                for error in errors {
                    tracing::debug!("Ignoring malformed EXIF field: {error}");
                }
            })
        });

    match result {
        Ok(exif) => Ok(exif),
        Err(exif::Error::NotFound(_)) => Err(ExifReadError::NoExif),
        Err(e) => Err(ExifReadError::Unreadable(e.to_string())),
    }
}

/// Reads the GPS block of an image file.
///
/// `Ok(None)` means the file has EXIF data but no GPS IFD.
pub fn read_gps_block<P: AsRef<Path>>(path: P) -> Result<Option<GpsTagBlock>, ExifReadError> {
    let exif = read_exif(path)?;
    Ok(GpsTagBlock::from_exif(&exif))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, exif_jpeg, gps_fields, rational_dms, write_file};
    use exif::Value;

    fn block(lat: Value, lat_ref: &str, lon: Value, lon_ref: &str) -> GpsTagBlock {
        let mut block = GpsTagBlock::default();
        block.insert(GpsTag::Latitude, lat);
        block.insert(GpsTag::LatitudeRef, Value::Ascii(vec![lat_ref.as_bytes().to_vec()]));
        block.insert(GpsTag::Longitude, lon);
        block.insert(GpsTag::LongitudeRef, Value::Ascii(vec![lon_ref.as_bytes().to_vec()]));
        block
    }

    #[test]
    fn tag_table_round_trips() {
        for tag in GpsTag::ALL {
            assert_eq!(GpsTag::from_exif(tag.exif_tag()), Some(tag));
        }
        assert_eq!(GpsTag::Latitude.name(), "GPSLatitude");
        assert_eq!(GpsTag::from_exif(exif::Tag::GPSAltitude), None);
    }

    #[test]
    fn rational_block_resolves_to_signed_degrees() {
        let block = block(rational_dms(40, 26, 46), "N", rational_dms(79, 56, 55), "W");
        let coords = block.coordinates().unwrap();
        assert_abs_diff_eq!(coords.latitude(), 40.446_111, epsilon = 1e-6);
        assert_abs_diff_eq!(coords.longitude(), -79.948_611, epsilon = 1e-6);
    }

    #[test]
    fn double_values_are_accepted() {
        let block = block(
            Value::Double(vec![33.0, 52.0, 7.68]),
            "S",
            Value::Double(vec![151.0, 12.0, 33.48]),
            "E",
        );
        let coords = block.coordinates().unwrap();
        assert!(coords.latitude() < 0.0);
        assert!(coords.longitude() > 0.0);
    }

    #[test]
    fn missing_tag_is_reported() {
        let mut block = block(rational_dms(1, 0, 0), "N", rational_dms(2, 0, 0), "E");
        block.values.remove(&GpsTag::LongitudeRef);
        assert_eq!(
            block.coordinates(),
            Err(GpsBlockError::Missing(GpsTag::LongitudeRef))
        );
    }

    #[test]
    fn empty_reference_counts_as_missing() {
        let block = block(rational_dms(1, 0, 0), "", rational_dms(2, 0, 0), "E");
        assert_eq!(
            block.coordinates(),
            Err(GpsBlockError::Missing(GpsTag::LatitudeRef))
        );
    }

    #[test]
    fn empty_dms_counts_as_missing() {
        let block = block(Value::Rational(vec![]), "N", rational_dms(2, 0, 0), "E");
        assert_eq!(
            block.coordinates(),
            Err(GpsBlockError::Missing(GpsTag::Latitude))
        );
    }

    #[test]
    fn zero_denominator_is_a_conversion_error() {
        let lat = Value::Rational(vec![
            exif::Rational { num: 10, denom: 1 },
            exif::Rational { num: 0, denom: 0 },
            exif::Rational { num: 0, denom: 1 },
        ]);
        let block = block(lat, "N", rational_dms(2, 0, 0), "E");
        assert_eq!(
            block.coordinates(),
            Err(GpsBlockError::Conversion(ConversionError::ZeroDenominator))
        );
    }

    #[test]
    fn short_dms_is_a_conversion_error() {
        let lat = Value::Rational(vec![exif::Rational { num: 10, denom: 1 }]);
        let block = block(lat, "N", rational_dms(2, 0, 0), "E");
        assert!(matches!(
            block.coordinates(),
            Err(GpsBlockError::Conversion(ConversionError::MalformedDms(_)))
        ));
    }

    #[test]
    fn read_gps_block_from_jpeg() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("a.jpg");
        write_file(&path, &exif_jpeg(&gps_fields((40, 26, 46), "N", (79, 56, 55), "W")));

        let block = read_gps_block(&path)
            .expect("exif should be readable")
            .expect("gps block should be present");
        let coords = block.coordinates().unwrap();
        assert_abs_diff_eq!(coords.latitude(), 40.446_111, epsilon = 1e-6);
        assert_abs_diff_eq!(coords.longitude(), -79.948_611, epsilon = 1e-6);
    }

    #[test]
    fn jpeg_without_gps_ifd_yields_none() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("camera.jpg");
        let make = exif::Field {
            tag: exif::Tag::Make,
            ifd_num: exif::In::PRIMARY,
            value: Value::Ascii(vec![b"Canon".to_vec()]),
        };
        write_file(&path, &exif_jpeg(&[make]));

        assert!(read_gps_block(&path).expect("exif readable").is_none());
    }

    #[test]
    fn jpeg_without_exif_is_no_exif() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("plain.jpg");
        write_file(&path, &[0xFF, 0xD8, 0xFF, 0xD9]);

        assert_eq!(read_exif(&path).err(), Some(ExifReadError::NoExif));
    }

    #[test]
    fn non_image_file_is_unreadable() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("notes.jpg");
        write_file(&path, b"not an image");

        assert!(matches!(
            read_exif(&path),
            Err(ExifReadError::Unreadable(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            read_exif("/nonexistent/path/image.jpg"),
            Err(ExifReadError::Io(_))
        ));
    }
}
