//! Application service — static answers to the host's catalog queries.
//!
//! The marketplace has a single offering, so hardware types and OS images
//! are fixed one-entry lists.

use sonm_common::{HardwareType, OsImage, SONM_CATALOG_ID};

/// Access is governed by the marketplace CLI's own key store; the plugin
/// has nothing to check up front.
#[must_use]
pub fn verify_access() -> bool {
    true
}

#[must_use]
pub fn available_hardware_types() -> Vec<HardwareType> {
    vec![HardwareType {
        id: SONM_CATALOG_ID.to_string(),
        name: SONM_CATALOG_ID.to_string(),
    }]
}

#[must_use]
pub fn available_os_images() -> Vec<OsImage> {
    vec![OsImage {
        id: SONM_CATALOG_ID.to_string(),
        description: SONM_CATALOG_ID.to_string(),
    }]
}
