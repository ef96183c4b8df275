// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation wizard steps.
//!
//! Each step carries exactly the data collected so far:
//! Idle -> AwaitingDeviceType -> AwaitingDeviceModel -> AwaitingBoardConfig
//! -> AwaitingFirmware -> Idle. AwaitingBoardConfig is skipped when a device
//! has a single eligible board.

use sepfinder_catalog::{DeviceDetail, DeviceSummary};
use sepfinder_core::Keyboard;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The device families offered on `/start`.
///
/// `Display` and `FromStr` use the label shown on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum DeviceType {
    #[strum(serialize = "iPhone")]
    IPhone,
    #[strum(serialize = "iPad")]
    IPad,
    #[strum(serialize = "iPod touch")]
    IPodTouch,
    #[strum(serialize = "Apple TV")]
    AppleTv,
}

impl DeviceType {
    /// Catalog identifier prefix of devices in this family.
    pub fn identifier_prefix(self) -> &'static str {
        match self {
            Self::IPhone => "iPhone",
            Self::IPad => "iPad",
            Self::IPodTouch => "iPod",
            Self::AppleTv => "AppleTV",
        }
    }

    /// Whether a catalog device belongs to this family.
    pub fn matches(self, device: &DeviceSummary) -> bool {
        device.identifier.starts_with(self.identifier_prefix())
    }

    /// `[[iPhone, iPad], [iPod touch, Apple TV]]`.
    pub fn keyboard() -> Keyboard {
        Keyboard::two_per_row(Self::iter().map(|t| t.to_string()))
    }
}

/// Where a conversation is in the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WizardStep {
    /// No wizard in progress.
    #[default]
    Idle,
    AwaitingDeviceType,
    /// Full catalog listing fetched when the family was picked. Only the
    /// family's devices are offered, but any listed name is accepted.
    AwaitingDeviceModel { devices: Vec<DeviceSummary> },
    AwaitingBoardConfig { device: DeviceDetail },
    AwaitingFirmware {
        device: DeviceDetail,
        board_config: String,
    },
}

impl WizardStep {
    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingDeviceType => "device_type",
            Self::AwaitingDeviceModel { .. } => "device_model",
            Self::AwaitingBoardConfig { .. } => "board_config",
            Self::AwaitingFirmware { .. } => "firmware",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
