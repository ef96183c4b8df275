// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog records and build manifests for tests.

use plist::{Dictionary, Value};
use sepfinder_catalog::{BoardEntry, DeviceDetail, FirmwareEntry};

/// One build identity to place in a fixture manifest.
#[derive(Debug, Clone, Default)]
pub struct IdentitySpec {
    /// `Info.DeviceClass`; `None` omits the key.
    pub device_class: Option<String>,
    /// `Manifest.RestoreSEP.Info.Path`; `None` omits the component.
    pub sep_path: Option<String>,
    /// `Manifest.BasebandFirmware.Info.Path`; `None` omits the component.
    pub baseband_path: Option<String>,
}

impl IdentitySpec {
    pub fn new(device_class: &str) -> Self {
        Self {
            device_class: Some(device_class.to_string()),
            ..Self::default()
        }
    }

    pub fn sep(mut self, path: &str) -> Self {
        self.sep_path = Some(path.to_string());
        self
    }

    pub fn baseband(mut self, path: &str) -> Self {
        self.baseband_path = Some(path.to_string());
        self
    }

    fn to_value(&self) -> Value {
        let mut identity = Dictionary::new();

        let mut info = Dictionary::new();
        if let Some(class) = &self.device_class {
            info.insert("DeviceClass".into(), Value::String(class.clone()));
        }
        identity.insert("Info".into(), Value::Dictionary(info));

        let mut manifest = Dictionary::new();
        for (key, path) in [
            ("RestoreSEP", &self.sep_path),
            ("BasebandFirmware", &self.baseband_path),
        ] {
            if let Some(path) = path {
                let mut component_info = Dictionary::new();
                component_info.insert("Path".into(), Value::String(path.clone()));
                let mut component = Dictionary::new();
                component.insert("Info".into(), Value::Dictionary(component_info));
                manifest.insert(key.into(), Value::Dictionary(component));
            }
        }
        identity.insert("Manifest".into(), Value::Dictionary(manifest));

        Value::Dictionary(identity)
    }
}

/// Encodes a binary-plist manifest with the given identities, in order.
pub fn manifest_plist(identities: &[IdentitySpec]) -> Vec<u8> {
    let mut root = Dictionary::new();
    root.insert(
        "BuildIdentities".into(),
        Value::Array(identities.iter().map(IdentitySpec::to_value).collect()),
    );

    let mut buf = Vec::new();
    // Writing to a Vec only fails on a bug in the fixture itself.
    plist::to_writer_binary(&mut buf, &Value::Dictionary(root))
        .expect("fixture manifest encodes");
    buf
}

/// Manifest with a single `d22ap` identity carrying SEP and baseband.
pub fn iphone_x_manifest() -> Vec<u8> {
    manifest_plist(&[IdentitySpec::new("d22ap")
        .sep("Firmware/all_flash/sep-firmware.d22.RELEASE.im4p")
        .baseband("Firmware/Mav18-2.40.01.Release.bbfw")])
}

pub fn board(board_config: &str) -> BoardEntry {
    BoardEntry {
        board_config: board_config.to_string(),
    }
}

pub fn firmware(version: &str, build_id: &str, url: &str, signed: bool) -> FirmwareEntry {
    FirmwareEntry {
        version: version.to_string(),
        build_id: build_id.to_string(),
        url: url.to_string(),
        signed,
    }
}

/// `iPhone10,3` with one production and one developer board, two
/// firmwares of which only the newer is signed.
pub fn iphone_x() -> DeviceDetail {
    DeviceDetail {
        identifier: "iPhone10,3".into(),
        name: "iPhone X (Global)".into(),
        boards: vec![board("D22AP"), board("D22DEV")],
        firmwares: vec![
            firmware(
                "16.7.10",
                "20H350",
                "https://updates.cdn-apple.com/2024FallFCS/fullrestores/062-1/iPhone10,3,iPhone10,6_16.7.10_20H350_Restore.ipsw",
                true,
            ),
            firmware(
                "16.7.9",
                "20H348",
                "https://updates.cdn-apple.com/2024SummerFCS/fullrestores/052-1/iPhone10,3,iPhone10,6_16.7.9_20H348_Restore.ipsw",
                false,
            ),
        ],
    }
}

/// An Apple TV whose only firmware lives on the legacy download host.
pub fn apple_tv_legacy() -> DeviceDetail {
    DeviceDetail {
        identifier: "AppleTV3,1".into(),
        name: "Apple TV 3".into(),
        boards: vec![board("J33AP")],
        firmwares: vec![firmware(
            "8.4.4",
            "12H937",
            "http://appldnld.apple.com/ios8.4.4/031-1/AppleTV3,1_8.4.4_12H937_Restore.ipsw",
            true,
        )],
    }
}
