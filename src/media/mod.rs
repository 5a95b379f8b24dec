// SPDX-License-Identifier: MPL-2.0
//! Image file access.
//!
//! This module reads embedded EXIF metadata from image files on disk.

pub mod gps;

// Re-export commonly used types
pub use gps::{read_exif, read_gps_block, ExifReadError, GpsBlockError, GpsTag, GpsTagBlock};
