//! Detection-evidence types fed in by the scan side.
//!
//! Selectors only look at which [`DetectionMethod`] produced a match; the
//! one that changes their behavior is
//! [`DetectionMethod::JvnVendorProductMatch`], which pulls JVN advisory
//! links into the primary source list.

use serde::{Deserialize, Serialize};

/// How a CVE was matched to the scanned host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionMethod {
    CpeNameMatch,
    YumUpdateSecurityMatch,
    PkgAuditMatch,
    OvalMatch,
    #[serde(rename = "RedHatAPIMatch")]
    RedHatApiMatch,
    DebianSecurityTrackerMatch,
    #[serde(rename = "UbuntuAPIMatch")]
    UbuntuApiMatch,
    TrivyMatch,
    ChangelogExactMatch,
    ChangelogRoughMatch,
    GitHubMatch,
    WpScanMatch,
    NvdExactVersionMatch,
    NvdRoughVersionMatch,
    NvdVendorProductMatch,
    JvnVendorProductMatch,
}

/// One piece of evidence tying a CVE to the host, scored 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confidence {
    pub score: u8,
    pub detection_method: DetectionMethod,
}

impl Confidence {
    pub fn new(score: u8, detection_method: DetectionMethod) -> Self {
        Self {
            score,
            detection_method,
        }
    }
}
