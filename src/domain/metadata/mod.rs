// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! This module provides pure domain types for GPS data, independent of the
//! EXIF parser:
//! - [`Dms`] / [`DmsComponent`]: degrees/minutes/seconds as stored in EXIF
//! - [`Hemisphere`]: the reference letter deciding the sign
//! - [`GpsCoordinates`]: signed decimal degrees

mod types;

pub use types::{Axis, ConversionError, Dms, DmsComponent, GpsCoordinates, Hemisphere};
