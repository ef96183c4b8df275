// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `BuildManifest.plist` model.
//!
//! Fields are deliberately optional: a manifest that parses as a property
//! list is accepted here, and structural gaps are reported by the query
//! layer as [`SepfinderError::ManifestMalformed`].

use std::collections::BTreeMap;

use sepfinder_core::SepfinderError;
use serde::Deserialize;

/// Manifest key of the Secure Enclave firmware component.
pub const SEP_COMPONENT: &str = "RestoreSEP";

/// Manifest key of the baseband firmware component.
pub const BASEBAND_COMPONENT: &str = "BasebandFirmware";

/// A parsed build manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildManifest {
    #[serde(rename = "BuildIdentities")]
    pub build_identities: Option<Vec<BuildIdentity>>,
}

impl BuildManifest {
    /// Parses a binary or XML property list.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SepfinderError> {
        plist::from_bytes(bytes).map_err(|e| SepfinderError::ManifestParse {
            source: Box::new(e),
        })
    }
}

/// One board configuration's view of a firmware build.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildIdentity {
    #[serde(rename = "Info")]
    pub info: Option<IdentityInfo>,
    #[serde(rename = "Manifest")]
    pub manifest: Option<BTreeMap<String, Component>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityInfo {
    /// Board config this identity applies to, e.g. `n61ap`.
    #[serde(rename = "DeviceClass")]
    pub device_class: Option<String>,
}

/// A firmware component entry under `Manifest`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Component {
    #[serde(rename = "Info")]
    pub info: Option<ComponentInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentInfo {
    #[serde(rename = "Path")]
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML_MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>ProductVersion</key>
    <string>12.5.7</string>
    <key>BuildIdentities</key>
    <array>
        <dict>
            <key>Info</key>
            <dict>
                <key>DeviceClass</key>
                <string>n61ap</string>
                <key>Variant</key>
                <string>Customer Erase Install (IPSW)</string>
            </dict>
            <key>Manifest</key>
            <dict>
                <key>RestoreSEP</key>
                <dict>
                    <key>Digest</key>
                    <data>AAAA</data>
                    <key>Info</key>
                    <dict>
                        <key>Path</key>
                        <string>Firmware/all_flash/sep-firmware.n61.RELEASE.im4p</string>
                    </dict>
                </dict>
            </dict>
        </dict>
    </array>
</dict>
</plist>"#;

    #[test]
    fn parses_xml_manifest() {
        let manifest = BuildManifest::from_bytes(XML_MANIFEST.as_bytes()).unwrap();
        let identities = manifest.build_identities.unwrap();
        assert_eq!(identities.len(), 1);
        let info = identities[0].info.as_ref().unwrap();
        assert_eq!(info.device_class.as_deref(), Some("n61ap"));
        let components = identities[0].manifest.as_ref().unwrap();
        assert!(components.contains_key(SEP_COMPONENT));
        assert!(!components.contains_key(BASEBAND_COMPONENT));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = BuildManifest::from_bytes(b"definitely not a plist").unwrap_err();
        assert!(matches!(err, SepfinderError::ManifestParse { .. }));
    }

    #[test]
    fn missing_identities_still_parses() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><dict><key>ProductVersion</key><string>1.0</string></dict></plist>"#;
        let manifest = BuildManifest::from_bytes(xml.as_bytes()).unwrap();
        assert!(manifest.build_identities.is_none());
    }
}
