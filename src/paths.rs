// SPDX-License-Identifier: MPL-2.0
//! Repository root resolution.
//!
//! Every configured path (metadata document, public root, images directory)
//! is relative to a single repository root.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to [`repo_root_with_override`] (for tests)
//! 2. **CLI argument** (`--root`) - set via [`init_cli_override`]
//! 3. **Environment variable** (`GEO_BACKFILL_ROOT`)
//! 4. **Current working directory**

use std::path::PathBuf;
use std::sync::OnceLock;

/// Environment variable to override the repository root.
pub const ENV_ROOT: &str = "GEO_BACKFILL_ROOT";

/// Global CLI override for the repository root (set once at startup).
static CLI_ROOT: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--root` CLI argument.
///
/// Only the first call has an effect; later calls are ignored.
pub fn init_cli_override(root: Option<PathBuf>) {
    let _ = CLI_ROOT.set(root);
}

fn get_cli_root() -> Option<PathBuf> {
    CLI_ROOT.get().and_then(Clone::clone)
}

/// Returns the repository root.
pub fn repo_root() -> PathBuf {
    repo_root_with_override(None)
}

/// Returns the repository root with an optional override.
///
/// Falls back to `"."` if the current directory cannot be determined.
pub fn repo_root_with_override(override_path: Option<PathBuf>) -> PathBuf {
    // Priority 1: Explicit override (for tests)
    if let Some(path) = override_path {
        return path;
    }

    // Priority 2: CLI argument
    if let Some(path) = get_cli_root() {
        return path;
    }

    // Priority 3: Environment variable
    if let Ok(env_path) = std::env::var(ENV_ROOT) {
        if !env_path.is_empty() {
            return PathBuf::from(env_path);
        }
    }

    // Priority 4: Current working directory
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
