// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog records as returned by the ipsw.me v4 API.
//!
//! Only the fields sepfinder reads are modelled; everything else in the
//! upstream JSON is ignored.

use serde::{Deserialize, Serialize};

/// Suffix shared by production board configs ("n61ap", "J42dAP").
/// Developer boards ("J42dDEV") do not carry it.
pub const DEVICE_BOARD_SUFFIX: &str = "ap";

/// Returns `true` if `board_config` names a production (non-developer) board.
pub fn is_device_board(board_config: &str) -> bool {
    board_config
        .to_ascii_lowercase()
        .ends_with(DEVICE_BOARD_SUFFIX)
}

/// One entry of `GET /v4/devices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummary {
    /// Product identifier, e.g. `iPhone10,3`.
    pub identifier: String,
    /// Marketing name, e.g. `iPhone X (Global)`.
    pub name: String,
}

/// `GET /v4/device/{identifier}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDetail {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub boards: Vec<BoardEntry>,
    #[serde(default)]
    pub firmwares: Vec<FirmwareEntry>,
}

impl DeviceDetail {
    /// Board configs eligible for selection, in catalog order.
    pub fn eligible_boards(&self) -> Vec<&str> {
        self.boards
            .iter()
            .filter(|b| b.is_eligible())
            .map(|b| b.board_config.as_str())
            .collect()
    }

    /// Firmwares Apple is still signing, in catalog order.
    pub fn signed_firmwares(&self) -> impl Iterator<Item = &FirmwareEntry> {
        self.firmwares.iter().filter(|f| f.signed)
    }

    /// First firmware whose version string equals `version` exactly.
    pub fn firmware_by_version(&self, version: &str) -> Option<&FirmwareEntry> {
        self.firmwares.iter().find(|f| f.version == version)
    }
}

/// A hardware revision of a device model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEntry {
    #[serde(rename = "boardconfig")]
    pub board_config: String,
}

impl BoardEntry {
    pub fn is_eligible(&self) -> bool {
        is_device_board(&self.board_config)
    }
}

/// One firmware build offered for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareEntry {
    pub version: String,
    #[serde(rename = "buildid")]
    pub build_id: String,
    /// Download URL of the restore package (`.ipsw`).
    pub url: String,
    #[serde(default)]
    pub signed: bool,
}
