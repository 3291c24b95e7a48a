//! Content-source registry.
//!
//! Every piece of CVE content carries a [`ContentType`] identifying the
//! upstream feed it came from: NVD, JVN, OS-vendor advisories, or one of the
//! Trivy sub-sources. This module owns the closed enumeration, the
//! normalization of free-form collector labels into it, and the per-family
//! priority tables that decide which sources are authoritative for a host.
//!
//! # Example
//!
//! ```
//! use cvemeta::provenance::{self, ContentType};
//!
//! assert_eq!(ContentType::from_label("centos"), ContentType::RedHat);
//! assert_eq!(ContentType::from_label("no-such-feed"), ContentType::Unknown);
//!
//! let order = provenance::types_for_family(provenance::family::UBUNTU);
//! assert_eq!(order, &[ContentType::Ubuntu, ContentType::UbuntuApi]);
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// OS/platform family identifiers accepted by [`types_for_family`].
///
/// These are the values the detection side reports for a scanned host.
/// `TRIVY` is a pseudo-family covering hosts whose content was produced by
/// the Trivy feed aggregator rather than a single vendor.
pub mod family {
    pub const REDHAT: &str = "redhat";
    pub const CENTOS: &str = "centos";
    pub const ALMA: &str = "alma";
    pub const ROCKY: &str = "rocky";
    pub const FEDORA: &str = "fedora";
    pub const ORACLE: &str = "oracle";
    pub const AMAZON: &str = "amazon";
    pub const DEBIAN: &str = "debian";
    pub const RASPBIAN: &str = "raspbian";
    pub const UBUNTU: &str = "ubuntu";
    pub const OPENSUSE: &str = "opensuse";
    pub const OPENSUSE_LEAP: &str = "opensuse.leap";
    pub const SUSE_ENTERPRISE_SERVER: &str = "suse.linux.enterprise.server";
    pub const SUSE_ENTERPRISE_DESKTOP: &str = "suse.linux.enterprise.desktop";
    pub const WINDOWS: &str = "windows";
    pub const TRIVY: &str = "trivy";
}

/// The upstream source that produced a piece of CVE content.
///
/// The set is closed; collector output is mapped into it with
/// [`ContentType::from_label`], which sends anything unrecognized to
/// [`ContentType::Unknown`] instead of failing. Only [`ContentType::Jvn`]
/// may hold more than one record per CVE (one per distinct advisory link);
/// see [`ContentType::allows_multiple`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "nvd")]
    Nvd,
    #[serde(rename = "jvn")]
    Jvn,
    #[serde(rename = "fortinet")]
    Fortinet,
    #[serde(rename = "redhat")]
    RedHat,
    #[serde(rename = "redhat_api")]
    RedHatApi,
    #[serde(rename = "debian")]
    Debian,
    #[serde(rename = "debian_security_tracker")]
    DebianSecurityTracker,
    #[serde(rename = "ubuntu")]
    Ubuntu,
    #[serde(rename = "ubuntu_api")]
    UbuntuApi,
    #[serde(rename = "oracle")]
    Oracle,
    #[serde(rename = "amazon")]
    Amazon,
    #[serde(rename = "fedora")]
    Fedora,
    #[serde(rename = "suse")]
    Suse,
    #[serde(rename = "microsoft")]
    Microsoft,
    #[serde(rename = "wpscan")]
    WpScan,
    #[serde(rename = "trivy")]
    Trivy,
    #[serde(rename = "trivy:nvd")]
    TrivyNvd,
    #[serde(rename = "trivy:redhat")]
    TrivyRedHat,
    #[serde(rename = "trivy:redhat-oval")]
    TrivyRedHatOval,
    #[serde(rename = "trivy:debian")]
    TrivyDebian,
    #[serde(rename = "trivy:ubuntu")]
    TrivyUbuntu,
    #[serde(rename = "trivy:centos")]
    TrivyCentOs,
    #[serde(rename = "trivy:rocky")]
    TrivyRocky,
    #[serde(rename = "trivy:fedora")]
    TrivyFedora,
    #[serde(rename = "trivy:amazon")]
    TrivyAmazon,
    #[serde(rename = "trivy:oracle-oval")]
    TrivyOracleOval,
    #[serde(rename = "trivy:suse-cvrf")]
    TrivySuseCvrf,
    #[serde(rename = "trivy:alpine")]
    TrivyAlpine,
    #[serde(rename = "trivy:arch-linux")]
    TrivyArchLinux,
    #[serde(rename = "trivy:alma")]
    TrivyAlma,
    #[serde(rename = "trivy:cbl-mariner")]
    TrivyCblMariner,
    #[serde(rename = "trivy:photon")]
    TrivyPhoton,
    #[serde(rename = "trivy:ruby-advisory-db")]
    TrivyRubySec,
    #[serde(rename = "trivy:php-security-advisories")]
    TrivyPhpSecurityAdvisories,
    #[serde(rename = "trivy:nodejs-security-wg")]
    TrivyNodejsSecurityWg,
    #[serde(rename = "trivy:ghsa")]
    TrivyGhsa,
    #[serde(rename = "trivy:glad")]
    TrivyGlad,
    #[serde(rename = "trivy:osv")]
    TrivyOsv,
    #[serde(rename = "trivy:wolfi")]
    TrivyWolfi,
    #[serde(rename = "trivy:chainguard")]
    TrivyChainguard,
    #[serde(rename = "trivy:bitnami")]
    TrivyBitnamiVulndb,
    #[serde(rename = "trivy:k8s")]
    TrivyK8sVulnDb,
    #[serde(rename = "trivy:govulndb")]
    TrivyGoVulnDb,
    #[serde(rename = "github")]
    GitHub,
    #[serde(rename = "unknown")]
    #[serde(other)]
    #[default]
    Unknown,
}

/// Every registered content type in canonical registration order.
///
/// [`Unknown`](ContentType::Unknown) is a normalization sink, not a source
/// worth ranking, so it is left out.
const ALL: &[ContentType] = &[
    ContentType::Nvd,
    ContentType::Jvn,
    ContentType::Fortinet,
    ContentType::RedHat,
    ContentType::RedHatApi,
    ContentType::Debian,
    ContentType::DebianSecurityTracker,
    ContentType::Ubuntu,
    ContentType::UbuntuApi,
    ContentType::Oracle,
    ContentType::Amazon,
    ContentType::Fedora,
    ContentType::Suse,
    ContentType::Microsoft,
    ContentType::WpScan,
    ContentType::Trivy,
    ContentType::TrivyNvd,
    ContentType::TrivyRedHat,
    ContentType::TrivyRedHatOval,
    ContentType::TrivyDebian,
    ContentType::TrivyUbuntu,
    ContentType::TrivyCentOs,
    ContentType::TrivyRocky,
    ContentType::TrivyFedora,
    ContentType::TrivyAmazon,
    ContentType::TrivyOracleOval,
    ContentType::TrivySuseCvrf,
    ContentType::TrivyAlpine,
    ContentType::TrivyArchLinux,
    ContentType::TrivyAlma,
    ContentType::TrivyCblMariner,
    ContentType::TrivyPhoton,
    ContentType::TrivyRubySec,
    ContentType::TrivyPhpSecurityAdvisories,
    ContentType::TrivyNodejsSecurityWg,
    ContentType::TrivyGhsa,
    ContentType::TrivyGlad,
    ContentType::TrivyOsv,
    ContentType::TrivyWolfi,
    ContentType::TrivyChainguard,
    ContentType::TrivyBitnamiVulndb,
    ContentType::TrivyK8sVulnDb,
    ContentType::TrivyGoVulnDb,
    ContentType::GitHub,
];

/// The Trivy aggregator and all of its sub-sources, in the order they are
/// consulted for the `trivy` pseudo-family.
const TRIVY_FAMILY: &[ContentType] = &[
    ContentType::Trivy,
    ContentType::TrivyNvd,
    ContentType::TrivyRedHat,
    ContentType::TrivyRedHatOval,
    ContentType::TrivyDebian,
    ContentType::TrivyUbuntu,
    ContentType::TrivyCentOs,
    ContentType::TrivyRocky,
    ContentType::TrivyFedora,
    ContentType::TrivyAmazon,
    ContentType::TrivyOracleOval,
    ContentType::TrivySuseCvrf,
    ContentType::TrivyAlpine,
    ContentType::TrivyArchLinux,
    ContentType::TrivyAlma,
    ContentType::TrivyCblMariner,
    ContentType::TrivyPhoton,
    ContentType::TrivyRubySec,
    ContentType::TrivyPhpSecurityAdvisories,
    ContentType::TrivyNodejsSecurityWg,
    ContentType::TrivyGhsa,
    ContentType::TrivyGlad,
    ContentType::TrivyOsv,
    ContentType::TrivyWolfi,
    ContentType::TrivyChainguard,
    ContentType::TrivyBitnamiVulndb,
    ContentType::TrivyK8sVulnDb,
    ContentType::TrivyGoVulnDb,
];

/// Collector label → content type, including the synonyms collectors emit
/// for feeds that share a database (e.g. the RedHat OVAL clones).
static LABELS: LazyLock<HashMap<&'static str, ContentType>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, ContentType> = HashMap::new();
    for &ctype in ALL {
        m.insert(ctype.as_str(), ctype);
    }
    // RedHat's OVAL feed also covers its rebuild distributions.
    m.insert("centos", ContentType::RedHat);
    m.insert("alma", ContentType::RedHat);
    m.insert("rocky", ContentType::RedHat);
    m.insert("debian-oval", ContentType::Debian);
    m.insert(family::OPENSUSE, ContentType::Suse);
    m.insert(family::OPENSUSE_LEAP, ContentType::Suse);
    m.insert(family::SUSE_ENTERPRISE_SERVER, ContentType::Suse);
    m.insert(family::SUSE_ENTERPRISE_DESKTOP, ContentType::Suse);
    m.insert("wordpress", ContentType::WpScan);
    m
});

impl ContentType {
    /// Normalizes a free-form collector label.
    ///
    /// Total over all inputs: unrecognized labels come back as
    /// [`ContentType::Unknown`], never an error.
    pub fn from_label(label: &str) -> ContentType {
        match LABELS.get(label) {
            Some(&ctype) => ctype,
            None => {
                tracing::debug!(label, "unrecognized content source label");
                ContentType::Unknown
            }
        }
    }

    /// The canonical label for this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Nvd => "nvd",
            ContentType::Jvn => "jvn",
            ContentType::Fortinet => "fortinet",
            ContentType::RedHat => "redhat",
            ContentType::RedHatApi => "redhat_api",
            ContentType::Debian => "debian",
            ContentType::DebianSecurityTracker => "debian_security_tracker",
            ContentType::Ubuntu => "ubuntu",
            ContentType::UbuntuApi => "ubuntu_api",
            ContentType::Oracle => "oracle",
            ContentType::Amazon => "amazon",
            ContentType::Fedora => "fedora",
            ContentType::Suse => "suse",
            ContentType::Microsoft => "microsoft",
            ContentType::WpScan => "wpscan",
            ContentType::Trivy => "trivy",
            ContentType::TrivyNvd => "trivy:nvd",
            ContentType::TrivyRedHat => "trivy:redhat",
            ContentType::TrivyRedHatOval => "trivy:redhat-oval",
            ContentType::TrivyDebian => "trivy:debian",
            ContentType::TrivyUbuntu => "trivy:ubuntu",
            ContentType::TrivyCentOs => "trivy:centos",
            ContentType::TrivyRocky => "trivy:rocky",
            ContentType::TrivyFedora => "trivy:fedora",
            ContentType::TrivyAmazon => "trivy:amazon",
            ContentType::TrivyOracleOval => "trivy:oracle-oval",
            ContentType::TrivySuseCvrf => "trivy:suse-cvrf",
            ContentType::TrivyAlpine => "trivy:alpine",
            ContentType::TrivyArchLinux => "trivy:arch-linux",
            ContentType::TrivyAlma => "trivy:alma",
            ContentType::TrivyCblMariner => "trivy:cbl-mariner",
            ContentType::TrivyPhoton => "trivy:photon",
            ContentType::TrivyRubySec => "trivy:ruby-advisory-db",
            ContentType::TrivyPhpSecurityAdvisories => "trivy:php-security-advisories",
            ContentType::TrivyNodejsSecurityWg => "trivy:nodejs-security-wg",
            ContentType::TrivyGhsa => "trivy:ghsa",
            ContentType::TrivyGlad => "trivy:glad",
            ContentType::TrivyOsv => "trivy:osv",
            ContentType::TrivyWolfi => "trivy:wolfi",
            ContentType::TrivyChainguard => "trivy:chainguard",
            ContentType::TrivyBitnamiVulndb => "trivy:bitnami",
            ContentType::TrivyK8sVulnDb => "trivy:k8s",
            ContentType::TrivyGoVulnDb => "trivy:govulndb",
            ContentType::GitHub => "github",
            ContentType::Unknown => "unknown",
        }
    }

    /// Whether this source may hold several records for one CVE.
    ///
    /// JVN publishes one advisory page per vendor statement, so a single CVE
    /// legitimately accumulates multiple records there. Every other source
    /// keeps at most one.
    pub fn allows_multiple(&self) -> bool {
        matches!(self, ContentType::Jvn)
    }

    /// The full registry in canonical registration order.
    ///
    /// Selectors use this as the fallback tail after any family-specific
    /// prefix.
    pub fn all() -> &'static [ContentType] {
        ALL
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the sources considered authoritative for an OS family, most
/// authoritative first.
///
/// The returned slice is empty for families the registry does not know;
/// callers fall back to the global registration order in that case, it is
/// not an error.
pub fn types_for_family(family: &str) -> &'static [ContentType] {
    match family {
        family::REDHAT | family::CENTOS | family::ALMA | family::ROCKY => {
            &[ContentType::RedHat, ContentType::RedHatApi]
        }
        family::FEDORA => &[ContentType::Fedora],
        family::ORACLE => &[ContentType::Oracle],
        family::AMAZON => &[ContentType::Amazon],
        family::DEBIAN | family::RASPBIAN => {
            &[ContentType::Debian, ContentType::DebianSecurityTracker]
        }
        family::UBUNTU => &[ContentType::Ubuntu, ContentType::UbuntuApi],
        family::OPENSUSE
        | family::OPENSUSE_LEAP
        | family::SUSE_ENTERPRISE_SERVER
        | family::SUSE_ENTERPRISE_DESKTOP => &[ContentType::Suse],
        family::WINDOWS => &[ContentType::Microsoft],
        family::TRIVY => TRIVY_FAMILY,
        _ => &[],
    }
}

/// Order-preserving set difference over content types.
///
/// Used to build the "everything else" tail of a priority walk without
/// repeating the family prefix.
pub fn except(types: &[ContentType], excludes: &[ContentType]) -> Vec<ContentType> {
    types
        .iter()
        .copied()
        .filter(|ctype| !excludes.contains(ctype))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_canonical() {
        assert_eq!(ContentType::from_label("nvd"), ContentType::Nvd);
        assert_eq!(ContentType::from_label("jvn"), ContentType::Jvn);
        assert_eq!(ContentType::from_label("redhat_api"), ContentType::RedHatApi);
        assert_eq!(ContentType::from_label("trivy:ghsa"), ContentType::TrivyGhsa);
        assert_eq!(ContentType::from_label("github"), ContentType::GitHub);
    }

    #[test]
    fn test_from_label_synonyms() {
        for label in ["redhat", "centos", "alma", "rocky"] {
            assert_eq!(ContentType::from_label(label), ContentType::RedHat);
        }
        assert_eq!(ContentType::from_label("debian-oval"), ContentType::Debian);
        assert_eq!(ContentType::from_label("wordpress"), ContentType::WpScan);
        for label in [
            family::OPENSUSE,
            family::OPENSUSE_LEAP,
            family::SUSE_ENTERPRISE_SERVER,
            family::SUSE_ENTERPRISE_DESKTOP,
        ] {
            assert_eq!(ContentType::from_label(label), ContentType::Suse);
        }
    }

    #[test]
    fn test_from_label_unrecognized() {
        assert_eq!(ContentType::from_label(""), ContentType::Unknown);
        assert_eq!(ContentType::from_label("no-such-feed"), ContentType::Unknown);
        assert_eq!(ContentType::from_label("NVD"), ContentType::Unknown);
    }

    #[test]
    fn test_all_is_unique_and_excludes_unknown() {
        let all = ContentType::all();
        for (i, a) in all.iter().enumerate() {
            assert_ne!(*a, ContentType::Unknown);
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(all[0], ContentType::Nvd);
        assert_eq!(all[all.len() - 1], ContentType::GitHub);
    }

    #[test]
    fn test_all_round_trips_through_labels() {
        for &ctype in ContentType::all() {
            assert_eq!(ContentType::from_label(ctype.as_str()), ctype);
        }
    }

    #[test]
    fn test_allows_multiple_only_jvn() {
        assert!(ContentType::Jvn.allows_multiple());
        for &ctype in ContentType::all() {
            if ctype != ContentType::Jvn {
                assert!(!ctype.allows_multiple(), "{ctype} should be single-valued");
            }
        }
    }

    #[test]
    fn test_types_for_family_redhat_clones() {
        let expected = &[ContentType::RedHat, ContentType::RedHatApi];
        for fam in [family::REDHAT, family::CENTOS, family::ALMA, family::ROCKY] {
            assert_eq!(types_for_family(fam), expected);
        }
    }

    #[test]
    fn test_types_for_family_trivy_covers_all_sub_sources() {
        let order = types_for_family(family::TRIVY);
        assert_eq!(order.len(), 28);
        assert_eq!(order[0], ContentType::Trivy);
        assert_eq!(order[order.len() - 1], ContentType::TrivyGoVulnDb);
    }

    #[test]
    fn test_types_for_family_unknown_is_empty() {
        assert!(types_for_family("plan9").is_empty());
        assert!(types_for_family("").is_empty());
    }

    #[test]
    fn test_except_preserves_order() {
        let types = [ContentType::Nvd, ContentType::Jvn, ContentType::RedHat];
        let rest = except(&types, &[ContentType::Jvn]);
        assert_eq!(rest, vec![ContentType::Nvd, ContentType::RedHat]);

        let untouched = except(&types, &[]);
        assert_eq!(untouched, types.to_vec());
    }

    #[test]
    fn test_family_prefix_plus_except_visits_each_type_once() {
        let prefix = types_for_family(family::UBUNTU);
        let mut order = prefix.to_vec();
        order.extend(except(ContentType::all(), prefix));
        assert_eq!(order.len(), ContentType::all().len());
        for (i, a) in order.iter().enumerate() {
            for b in &order[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&ContentType::TrivyRedHatOval).unwrap();
        assert_eq!(json, "\"trivy:redhat-oval\"");
        let back: ContentType = serde_json::from_str("\"debian_security_tracker\"").unwrap();
        assert_eq!(back, ContentType::DebianSecurityTracker);
        let sink: ContentType = serde_json::from_str("\"not-a-feed\"").unwrap();
        assert_eq!(sink, ContentType::Unknown);
    }
}
