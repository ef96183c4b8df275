// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing strings.

use sepfinder_core::SepfinderError;

pub const SELECT_DEVICE_TYPE: &str = "Please select a device type.";
pub const SELECT_DEVICE: &str = "Please select a device.";
pub const SELECT_BOARD_CONFIG: &str = "Please select your board config.\n\nYou can get this using the System Info tweak or AIDA64 from the App Store.";
pub const SELECT_VERSION: &str = "Please select a version.";

pub const INVALID_INPUT: &str = "Invalid input.";
pub const INVALID_STATE: &str = "Invalid state. Please start over using /start.";

pub const CATALOG_UNAVAILABLE: &str =
    "Unable to communicate with ipsw.me API, please try again later.";
pub const NO_DEVICES: &str = "No devices found. Please start over using /start.";
pub const NO_BOARD_CONFIGS: &str = "No boardconfigs found for this device.";
pub const NO_SIGNED_FIRMWARES: &str = "No signed firmwares found for this device.";

pub const EXTRACTING: &str = "Extracting BuildManifest, please wait...";
pub const EXTRACT_FAILED: &str =
    "Unable to extract BuildManifest for the selected firmware, please try again later.";
pub const PARSE_FAILED: &str = "Unable to parse BuildManifest, please try again later.";
pub const DATA_FAILED: &str = "Unable to get data from BuildManifest, please try again later.";

/// The message shown when resolving or querying a manifest fails with `err`.
pub fn resolution_failure(err: &SepfinderError) -> &'static str {
    match err {
        SepfinderError::ManifestParse { .. } => PARSE_FAILED,
        SepfinderError::BoardNotFound { .. } | SepfinderError::ManifestMalformed(_) => DATA_FAILED,
        _ => EXTRACT_FAILED,
    }
}
