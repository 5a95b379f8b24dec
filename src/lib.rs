// SPDX-License-Identifier: MPL-2.0
//! `geo_backfill` fills in missing latitude/longitude fields of a gallery
//! metadata document using the GPS tags embedded in the images' EXIF data.
//!
//! The document is a JSON array of image records, each with a `src` path.
//! Records without coordinates are matched to their image file, the EXIF GPS
//! position is converted from degrees/minutes/seconds to decimal degrees, and
//! the document is rewritten when anything changed.

#![doc(html_root_url = "https://docs.rs/geo_backfill/0.1.0")]

pub mod backfill;
pub mod config;
pub mod domain;
pub mod error;
pub mod gallery;
pub mod media;
pub mod paths;

#[cfg(test)]
pub(crate) mod test_utils;
