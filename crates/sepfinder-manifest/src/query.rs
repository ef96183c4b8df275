// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component lookup within a resolved build manifest.

use sepfinder_core::SepfinderError;

use crate::model::{BuildIdentity, BuildManifest, BASEBAND_COMPONENT, SEP_COMPONENT};

/// Printed in place of a component the build does not ship.
pub const ABSENT_COMPONENT: &str = "None";

/// Firmware paths found for one board config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentPaths {
    pub sep_path: String,
    pub baseband_path: String,
}

/// Finds the SEP and baseband paths for `board_config`.
///
/// The first identity whose `Info.DeviceClass` matches case-insensitively
/// wins. Absent components become [`ABSENT_COMPONENT`].
pub fn find_components(
    manifest: &BuildManifest,
    board_config: &str,
) -> Result<ComponentPaths, SepfinderError> {
    let identities = manifest
        .build_identities
        .as_ref()
        .ok_or_else(|| SepfinderError::ManifestMalformed("missing BuildIdentities".into()))?;

    let identity = find_identity(identities, board_config)?.ok_or_else(|| {
        SepfinderError::BoardNotFound {
            board_config: board_config.to_string(),
        }
    })?;

    Ok(ComponentPaths {
        sep_path: component_path(identity, SEP_COMPONENT)?,
        baseband_path: component_path(identity, BASEBAND_COMPONENT)?,
    })
}

fn find_identity<'a>(
    identities: &'a [BuildIdentity],
    board_config: &str,
) -> Result<Option<&'a BuildIdentity>, SepfinderError> {
    for (index, identity) in identities.iter().enumerate() {
        let device_class = identity
            .info
            .as_ref()
            .and_then(|info| info.device_class.as_deref())
            .ok_or_else(|| {
                SepfinderError::ManifestMalformed(format!(
                    "BuildIdentities[{index}] has no Info.DeviceClass"
                ))
            })?;

        if device_class.eq_ignore_ascii_case(board_config) {
            return Ok(Some(identity));
        }
    }
    Ok(None)
}

fn component_path(identity: &BuildIdentity, component: &str) -> Result<String, SepfinderError> {
    let components = identity.manifest.as_ref().ok_or_else(|| {
        SepfinderError::ManifestMalformed("build identity has no Manifest".into())
    })?;

    let Some(entry) = components.get(component) else {
        return Ok(ABSENT_COMPONENT.to_string());
    };

    entry
        .info
        .as_ref()
        .and_then(|info| info.path.clone())
        .ok_or_else(|| SepfinderError::ManifestMalformed(format!("{component} has no Info.Path")))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::model::{Component, ComponentInfo, IdentityInfo};

    fn component(path: Option<&str>) -> Component {
        Component {
            info: Some(ComponentInfo {
                path: path.map(str::to_string),
            }),
        }
    }

    fn identity(device_class: &str, components: &[(&str, Option<&str>)]) -> BuildIdentity {
        BuildIdentity {
            info: Some(IdentityInfo {
                device_class: Some(device_class.to_string()),
            }),
            manifest: Some(
                components
                    .iter()
                    .map(|(name, path)| (name.to_string(), component(*path)))
                    .collect::<BTreeMap<_, _>>(),
            ),
        }
    }

    fn manifest(identities: Vec<BuildIdentity>) -> BuildManifest {
        BuildManifest {
            build_identities: Some(identities),
        }
    }

    #[test]
    fn finds_both_components() {
        let m = manifest(vec![identity(
            "d22ap",
            &[
                (SEP_COMPONENT, Some("Firmware/all_flash/sep-firmware.d22.RELEASE.im4p")),
                (BASEBAND_COMPONENT, Some("Firmware/Mav17-1.00.00.Release.bbfw")),
            ],
        )]);

        let paths = find_components(&m, "D22AP").unwrap();
        assert_eq!(paths.sep_path, "Firmware/all_flash/sep-firmware.d22.RELEASE.im4p");
        assert_eq!(paths.baseband_path, "Firmware/Mav17-1.00.00.Release.bbfw");
    }

    #[test]
    fn absent_components_read_none() {
        let m = manifest(vec![identity("j42dap", &[("KernelCache", Some("kernelcache"))])]);
        let paths = find_components(&m, "J42dAP").unwrap();
        assert_eq!(paths.sep_path, ABSENT_COMPONENT);
        assert_eq!(paths.baseband_path, ABSENT_COMPONENT);
    }

    #[test]
    fn first_matching_identity_wins() {
        let m = manifest(vec![
            identity("n61ap", &[(SEP_COMPONENT, Some("first"))]),
            identity("N61AP", &[(SEP_COMPONENT, Some("second"))]),
        ]);
        assert_eq!(find_components(&m, "n61ap").unwrap().sep_path, "first");
    }

    #[test]
    fn unknown_board_is_not_found() {
        let m = manifest(vec![identity("n61ap", &[])]);
        let err = find_components(&m, "n56ap").unwrap_err();
        assert!(matches!(err, SepfinderError::BoardNotFound { board_config } if board_config == "n56ap"));
    }

    #[test]
    fn missing_identities_is_malformed() {
        let err = find_components(&BuildManifest::default(), "n61ap").unwrap_err();
        assert!(matches!(err, SepfinderError::ManifestMalformed(_)));
    }

    #[test]
    fn identity_without_info_is_malformed() {
        let m = manifest(vec![BuildIdentity::default()]);
        assert!(matches!(
            find_components(&m, "n61ap").unwrap_err(),
            SepfinderError::ManifestMalformed(_)
        ));
    }

    #[test]
    fn matched_identity_without_manifest_is_malformed() {
        let m = manifest(vec![BuildIdentity {
            info: Some(IdentityInfo {
                device_class: Some("n61ap".into()),
            }),
            manifest: None,
        }]);
        assert!(matches!(
            find_components(&m, "n61ap").unwrap_err(),
            SepfinderError::ManifestMalformed(_)
        ));
    }

    #[test]
    fn present_component_without_path_is_malformed() {
        let m = manifest(vec![identity("n61ap", &[(SEP_COMPONENT, None)])]);
        assert!(matches!(
            find_components(&m, "n61ap").unwrap_err(),
            SepfinderError::ManifestMalformed(_)
        ));
    }
}
