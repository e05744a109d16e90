//! Local license-key handling for AICat.
//!
//! This module handles:
//! - Validation of user-supplied license keys (`sk-` convention)
//! - Persistence of the key under the platform config directory
//! - The [`LicenseStore`] capability consumed by the premium flow
//!
//! # Design Principles
//!
//! - **Alternate entitlement path**: a stored key unlocks premium without
//!   any purchase-provider involvement
//! - **Degrade, don't fail**: missing or corrupt storage reads as "no key"
//! - **Log-safe**: keys display masked, never in full

mod error;
mod key;
mod store;

pub use error::{LicenseError, LicenseResult};
pub use key::{LicenseKey, MIN_KEY_LEN};
pub use store::{FileLicenseStore, LicenseStore, MemoryLicenseStore};
