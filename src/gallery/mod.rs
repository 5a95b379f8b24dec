// SPDX-License-Identifier: MPL-2.0
//! Gallery metadata document: an ordered JSON array of image records.

pub mod document;
pub mod record;

pub use document::{load, save, CollectionEntry, MetadataCollection};
pub use record::MetadataRecord;
