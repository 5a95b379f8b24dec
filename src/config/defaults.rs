// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! All paths are relative to the repository root resolved by
//! [`crate::paths`].

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Gallery metadata document, a JSON array of image records.
pub const DEFAULT_DATA_FILE: &str = "data/imagesMeta.json";

/// Public web root that record `src` values are relative to.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Fallback directory searched by bare file name.
pub const DEFAULT_IMAGES_DIR: &str = "public/images";

/// Optional per-repository config file name.
pub const CONFIG_FILE: &str = "geo_backfill.toml";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!DEFAULT_DATA_FILE.is_empty());
    assert!(!DEFAULT_PUBLIC_DIR.is_empty());
    assert!(!DEFAULT_IMAGES_DIR.is_empty());
};
