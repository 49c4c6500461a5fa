//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Controls how strictly [`crate::decode_with_config`] treats a file.
///
/// Section checksums and terminators are always enforced; these switches only
/// cover the header checksums and unrecognised sections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Compare the stored header checksum with the computed one.
    ///
    /// Default: true
    pub verify_header_checksum: bool,

    /// Compare the stored whole-file checksum with the computed one.
    ///
    /// Default: true
    pub verify_file_checksum: bool,

    /// Compare the stored ICHEATED checksum with the computed one.
    ///
    /// Default: true
    pub verify_icheated_checksum: bool,

    /// Skip extension sections with unknown tags (logged at `warn`) instead of
    /// failing.
    ///
    /// Default: true
    pub ignore_unknown_sections: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            verify_header_checksum: true,
            verify_file_checksum: true,
            verify_icheated_checksum: true,
            ignore_unknown_sections: true,
        }
    }
}

impl CodecConfig {
    /// Verify every checksum and reject unknown sections.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            ignore_unknown_sections: false,
            ..Self::default()
        }
    }

    /// Skip header checksum verification, for salvaging files written by
    /// tools that compute them incorrectly.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            verify_header_checksum: false,
            verify_file_checksum: false,
            verify_icheated_checksum: false,
            ignore_unknown_sections: true,
        }
    }
}
