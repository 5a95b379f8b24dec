// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`).
//!
//! # Modules
//!
//! - [`metadata`]: GPS types ([`Dms`](metadata::Dms),
//!   [`Hemisphere`](metadata::Hemisphere), [`GpsCoordinates`](metadata::GpsCoordinates))

pub mod metadata;
