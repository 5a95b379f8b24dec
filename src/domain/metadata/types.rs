// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! Pure domain types for GPS coordinates with no external dependencies.

use std::fmt;

// =============================================================================
// ConversionError
// =============================================================================

/// Errors raised while turning a DMS triple into decimal degrees.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// A rational component has a zero denominator.
    ZeroDenominator,

    /// The value does not hold three numeric components.
    MalformedDms(String),

    /// The arithmetic produced NaN or infinity.
    NonFinite,

    /// The reference tag does not hold text.
    InvalidReference { axis: Axis, reference: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::ZeroDenominator => write!(f, "division by zero in DMS component"),
            ConversionError::MalformedDms(msg) => write!(f, "malformed DMS value: {msg}"),
            ConversionError::NonFinite => write!(f, "DMS value is not finite"),
            ConversionError::InvalidReference { axis, reference } => {
                write!(f, "invalid {axis} reference {reference:?}")
            }
        }
    }
}

impl std::error::Error for ConversionError {}

// =============================================================================
// Axis / Hemisphere
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// GPS reference letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
    /// Any other letter. Treated like north/east.
    Unrecognized,
}

impl Hemisphere {
    /// Reads a reference letter.
    ///
    /// Surrounding whitespace and NUL padding are ignored. Matching is exact:
    /// only `S` and `W` negate, on either axis. Lowercase or unknown letters
    /// leave the value positive.
    #[must_use]
    pub fn from_reference(reference: &str) -> Self {
        match reference.trim_matches(|c: char| c.is_whitespace() || c == '\0') {
            "N" => Hemisphere::North,
            "S" => Hemisphere::South,
            "E" => Hemisphere::East,
            "W" => Hemisphere::West,
            _ => Hemisphere::Unrecognized,
        }
    }

    /// Sign multiplier: `-1.0` for south and west.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::South | Hemisphere::West => -1.0,
            Hemisphere::North | Hemisphere::East | Hemisphere::Unrecognized => 1.0,
        }
    }
}

// =============================================================================
// Dms
// =============================================================================

/// One degrees, minutes or seconds component as stored in EXIF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DmsComponent {
    Ratio { numerator: i64, denominator: i64 },
    Number(f64),
}

impl DmsComponent {
    pub fn to_f64(self) -> Result<f64, ConversionError> {
        match self {
            DmsComponent::Ratio { denominator: 0, .. } => Err(ConversionError::ZeroDenominator),
            DmsComponent::Ratio {
                numerator,
                denominator,
            } => Ok(numerator as f64 / denominator as f64),
            DmsComponent::Number(value) => Ok(value),
        }
    }
}

/// A degrees/minutes/seconds triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: DmsComponent,
    pub minutes: DmsComponent,
    pub seconds: DmsComponent,
}

impl Dms {
    /// Builds a triple from the first three components.
    ///
    /// Extra components are ignored; fewer than three is an error.
    pub fn from_components(components: &[DmsComponent]) -> Result<Self, ConversionError> {
        match components {
            [degrees, minutes, seconds, ..] => Ok(Self {
                degrees: *degrees,
                minutes: *minutes,
                seconds: *seconds,
            }),
            _ => Err(ConversionError::MalformedDms(format!(
                "expected 3 components, found {}",
                components.len()
            ))),
        }
    }

    /// Converts to signed decimal degrees: `d + m/60 + s/3600`, negated for
    /// the southern and western hemispheres.
    pub fn to_decimal(&self, hemisphere: Hemisphere) -> Result<f64, ConversionError> {
        let degrees = self.degrees.to_f64()?;
        let minutes = self.minutes.to_f64()?;
        let seconds = self.seconds.to_f64()?;
        let decimal = (degrees + minutes / 60.0 + seconds / 3600.0) * hemisphere.sign();
        if decimal.is_finite() {
            Ok(decimal)
        } else {
            Err(ConversionError::NonFinite)
        }
    }
}

// =============================================================================
// GpsCoordinates
// =============================================================================

/// GPS coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsCoordinates {
    latitude: f64,
    longitude: f64,
}

impl GpsCoordinates {
    /// Creates coordinates as given. Values read from EXIF are written back
    /// untouched, so no clamping happens here; see [`Self::is_in_range`].
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Converts a latitude/longitude DMS pair with their reference letters.
    pub fn from_dms(
        latitude: &Dms,
        latitude_ref: &str,
        longitude: &Dms,
        longitude_ref: &str,
    ) -> Result<Self, ConversionError> {
        let lat = latitude.to_decimal(Hemisphere::from_reference(latitude_ref))?;
        let lon = longitude.to_decimal(Hemisphere::from_reference(longitude_ref))?;
        Ok(Self::new(lat, lon))
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether latitude is within ±90 and longitude within ±180.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

// =============================================================================
// Tests
// =============================================================================
