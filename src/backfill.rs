// SPDX-License-Identifier: MPL-2.0
//! Coordinate backfill pass.
//!
//! Walks the gallery document once. Every record that lacks coordinates is
//! matched to its image file, and the image's EXIF GPS position is written
//! into the record. The document is rewritten only when at least one record
//! changed.
//!
//! Per-record problems are values of [`SkipReason`]: they are logged and the
//! pass moves on to the next record. Only document-level failures abort the
//! run.

use crate::config::Config;
use crate::domain::metadata::{ConversionError, GpsCoordinates};
use crate::error::Result;
use crate::gallery::{self, CollectionEntry, MetadataCollection, MetadataRecord};
use crate::media::{self, ExifReadError, GpsBlockError, GpsTag};
use std::fmt;
use std::path::{Path, PathBuf};

// =============================================================================
// SkipReason / RecordOutcome
// =============================================================================

/// Why a record lacking coordinates was left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Neither the public root nor the images directory has the file.
    ImageNotFound,

    /// The image carries no EXIF block.
    NoExif,

    /// The file could not be opened or its EXIF block could not be parsed.
    ExifUnreadable(String),

    /// EXIF is present but has no GPS IFD.
    NoGpsBlock,

    /// The GPS IFD lacks one of the four positioning tags.
    MissingGpsTag(GpsTag),

    /// The GPS values could not be converted to decimal degrees.
    Conversion(ConversionError),
}

impl SkipReason {
    /// Returns whether this skip is an error worth a warning rather than an
    /// expected gap in the data.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            SkipReason::ExifUnreadable(_) | SkipReason::Conversion(_)
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ImageNotFound => write!(f, "image file not found"),
            SkipReason::NoExif => write!(f, "no EXIF data"),
            SkipReason::ExifUnreadable(msg) => write!(f, "could not read EXIF: {msg}"),
            SkipReason::NoGpsBlock => write!(f, "no GPS data"),
            SkipReason::MissingGpsTag(tag) => write!(f, "missing {tag}"),
            SkipReason::Conversion(err) => write!(f, "could not convert DMS: {err}"),
        }
    }
}

impl From<ExifReadError> for SkipReason {
    fn from(err: ExifReadError) -> Self {
        match err {
            ExifReadError::NoExif => SkipReason::NoExif,
            ExifReadError::Io(msg) | ExifReadError::Unreadable(msg) => {
                SkipReason::ExifUnreadable(msg)
            }
        }
    }
}

impl From<GpsBlockError> for SkipReason {
    fn from(err: GpsBlockError) -> Self {
        match err {
            GpsBlockError::Missing(tag) => SkipReason::MissingGpsTag(tag),
            GpsBlockError::Conversion(err) => SkipReason::Conversion(err),
        }
    }
}

/// Result of processing one collection entry.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Both coordinates were already set.
    AlreadyPopulated,
    /// The entry is not a JSON object.
    NotARecord,
    Updated(GpsCoordinates),
    Skipped(SkipReason),
}

// =============================================================================
// ImageLocator
// =============================================================================

/// Maps a record's `src` to an image file on disk.
#[derive(Debug, Clone)]
pub struct ImageLocator {
    public_dir: PathBuf,
    images_dir: PathBuf,
}

impl ImageLocator {
    pub fn new(public_dir: impl Into<PathBuf>, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
            images_dir: images_dir.into(),
        }
    }

    /// Resolves `src` to an existing file.
    ///
    /// Leading `/` characters are stripped and the remainder is tried under
    /// the public root. Failing that, only the file name is tried under the
    /// images directory. The fallback can match an unrelated file sharing the
    /// same name in another folder.
    pub fn resolve(&self, src: &str) -> Option<PathBuf> {
        let relative = src.trim_start_matches('/');
        let primary = self.public_dir.join(relative);
        if primary.is_file() {
            return Some(primary);
        }

        let name = Path::new(relative).file_name()?;
        let fallback = self.images_dir.join(name);
        fallback.is_file().then_some(fallback)
    }
}

// =============================================================================
// Per-record steps
// =============================================================================

/// Reads and converts the GPS position of one image file.
pub fn coordinates_from_image(path: &Path) -> std::result::Result<GpsCoordinates, SkipReason> {
    let block = media::read_gps_block(path)?.ok_or(SkipReason::NoGpsBlock)?;
    Ok(block.coordinates()?)
}

/// Runs the locate → extract → convert steps for one record.
pub fn lookup_coordinates(
    locator: &ImageLocator,
    record: &MetadataRecord,
) -> std::result::Result<GpsCoordinates, SkipReason> {
    let path = locator
        .resolve(record.src())
        .ok_or(SkipReason::ImageNotFound)?;
    coordinates_from_image(&path)
}

/// Processes one entry, updating it in place when coordinates are found.
pub fn process_entry(locator: &ImageLocator, entry: &mut CollectionEntry) -> RecordOutcome {
    let record = match entry {
        CollectionEntry::Record(record) => record,
        CollectionEntry::Opaque(_) => return RecordOutcome::NotARecord,
    };
    if !record.needs_coordinates() {
        return RecordOutcome::AlreadyPopulated;
    }

    match lookup_coordinates(locator, record) {
        Ok(coordinates) => {
            record.set_coordinates(coordinates);
            RecordOutcome::Updated(coordinates)
        }
        Err(reason) => RecordOutcome::Skipped(reason),
    }
}

// =============================================================================
// BackfillSummary
// =============================================================================

/// Counts gathered over one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    /// Entries in the document.
    pub total: usize,
    /// Records that received coordinates.
    pub updated: usize,
    /// Records that already had coordinates.
    pub already_populated: usize,
    /// Records lacking coordinates that could not be filled.
    pub skipped: usize,
    /// Skips caused by read or conversion errors.
    pub errors: usize,
    /// Whether the document was rewritten.
    pub written: bool,
}

impl BackfillSummary {
    fn record(&mut self, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Updated(_) => self.updated += 1,
            RecordOutcome::AlreadyPopulated => self.already_populated += 1,
            RecordOutcome::Skipped(reason) => {
                self.skipped += 1;
                if reason.is_error() {
                    self.errors += 1;
                }
            }
            RecordOutcome::NotARecord => {}
        }
    }

    /// Final report line.
    pub fn message(&self, document: &Path) -> String {
        if self.written {
            format!(
                "WROTE {} (updated {} entries)",
                document.display(),
                self.updated
            )
        } else if self.updated > 0 {
            format!(
                "Dry run: {} entries would be updated in {}",
                self.updated,
                document.display()
            )
        } else {
            "No updates made.".to_string()
        }
    }
}

// =============================================================================
// Pass
// =============================================================================

/// Fills coordinates in every eligible record of `collection`.
///
/// Does not touch the filesystem beyond reading image files.
pub fn backfill_collection(
    collection: &mut MetadataCollection,
    locator: &ImageLocator,
) -> BackfillSummary {
    let mut summary = BackfillSummary {
        total: collection.len(),
        ..Default::default()
    };

    for (index, entry) in collection.entries_mut().iter_mut().enumerate() {
        let outcome = process_entry(locator, entry);
        let src = match &*entry {
            CollectionEntry::Record(record) => record.src().trim_start_matches('/'),
            CollectionEntry::Opaque(_) => "",
        };

        match &outcome {
            RecordOutcome::Updated(coordinates) => {
                tracing::info!(
                    "Updated {} -> lat={}, lon={}",
                    src,
                    coordinates.latitude(),
                    coordinates.longitude()
                );
                if !coordinates.is_in_range() {
                    tracing::warn!("{src}: GPS position is out of range; written as read");
                }
            }
            RecordOutcome::Skipped(reason) if reason.is_error() => {
                tracing::warn!("Skipping {src}: {reason}");
            }
            RecordOutcome::Skipped(reason) => tracing::debug!("Skipping {src}: {reason}"),
            RecordOutcome::AlreadyPopulated => {
                tracing::debug!("{src} already has coordinates");
            }
            RecordOutcome::NotARecord => {
                tracing::warn!("Entry {index} is not a JSON object; left unchanged");
            }
        }
        summary.record(&outcome);
    }

    summary
}

/// Options for a full pass.
#[derive(Debug, Clone, Default)]
pub struct BackfillOptions {
    /// Compute updates but never rewrite the document.
    pub dry_run: bool,
}

/// A configured backfill over one document.
#[derive(Debug, Clone)]
pub struct BackfillPass {
    document: PathBuf,
    locator: ImageLocator,
    options: BackfillOptions,
}

impl BackfillPass {
    pub fn new(
        document: impl Into<PathBuf>,
        locator: ImageLocator,
        options: BackfillOptions,
    ) -> Self {
        Self {
            document: document.into(),
            locator,
            options,
        }
    }

    /// Builds a pass from the layout configuration and repository root.
    pub fn from_config(config: &Config, root: &Path, options: BackfillOptions) -> Self {
        Self::new(
            config.data_file_in(root),
            ImageLocator::new(config.public_dir_in(root), config.images_dir_in(root)),
            options,
        )
    }

    pub fn document(&self) -> &Path {
        &self.document
    }

    /// Loads, backfills and, if anything changed, saves the document.
    ///
    /// # Errors
    ///
    /// [`Error::DocumentNotFound`](crate::error::Error::DocumentNotFound) when
    /// the document is absent (nothing is written), or any load/save failure.
    pub fn run(&self) -> Result<BackfillSummary> {
        let mut collection = gallery::load(&self.document)?;
        tracing::debug!(
            "Loaded {} entries from {}",
            collection.len(),
            self.document.display()
        );

        let mut summary = backfill_collection(&mut collection, &self.locator);

        if summary.updated > 0 && !self.options.dry_run {
            gallery::save(&collection, &self.document)?;
            summary.written = true;
        }

        Ok(summary)
    }
}
