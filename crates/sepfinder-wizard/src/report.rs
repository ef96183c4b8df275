// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML formatting of the final component report.

use sepfinder_catalog::FirmwareEntry;
use sepfinder_manifest::ComponentPaths;

/// Escapes text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(ch),
        }
    }
    result
}

/// Formats the report sent once component paths are known.
///
/// Every interpolated value is escaped.
pub fn format_report(
    device_name: &str,
    board_config: &str,
    firmware: &FirmwareEntry,
    paths: &ComponentPaths,
) -> String {
    format!(
        "<b>{} ({}) - {} ({})</b>\n\n<b>SEP</b>: {}\n<b>Baseband</b>: {}",
        escape_html(device_name),
        escape_html(board_config),
        escape_html(&firmware.version),
        escape_html(&firmware.build_id),
        escape_html(&paths.sep_path),
        escape_html(&paths.baseband_path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn firmware() -> FirmwareEntry {
        FirmwareEntry {
            version: "12.5.7".into(),
            build_id: "16H81".into(),
            url: "https://example.com/fw.ipsw".into(),
            signed: true,
        }
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(
            escape_html(r#"a & b <c> "d" 'e'"#),
            "a &amp; b &lt;c&gt; &quot;d&quot; &#x27;e&#x27;"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_html("iPhone 6 (GSM)"), "iPhone 6 (GSM)");
    }

    #[test]
    fn report_layout() {
        let paths = ComponentPaths {
            sep_path: "None".into(),
            baseband_path: "Firmware/Mav10-7.80.04.Release.bbfw".into(),
        };
        assert_eq!(
            format_report("iPhone 6", "n61ap", &firmware(), &paths),
            "<b>iPhone 6 (n61ap) - 12.5.7 (16H81)</b>\n\n<b>SEP</b>: None\n<b>Baseband</b>: Firmware/Mav10-7.80.04.Release.bbfw"
        );
    }

    #[test]
    fn report_escapes_device_name() {
        let paths = ComponentPaths {
            sep_path: "None".into(),
            baseband_path: "None".into(),
        };
        let report = format_report("Phone <Pro> & Co", "x1ap", &firmware(), &paths);
        assert!(report.starts_with("<b>Phone &lt;Pro&gt; &amp; Co (x1ap)"));
        assert!(!report.contains("<Pro>"));
    }
}
