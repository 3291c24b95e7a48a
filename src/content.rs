//! Per-source CVE content records.
//!
//! A [`CveContent`] is one upstream source's description of one CVE: title,
//! summary, CVSS v2/v3 scoring, the canonical advisory link, and its CPE,
//! reference, and CWE lists. Records serialize with the wire field names the
//! report layer expects (`cveID`, `sourceLink`, `cweIDs`, ...).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::provenance::ContentType;

/// One source's description of one CVE.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveContent {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(rename = "cveID")]
    pub cve_id: String,
    pub title: String,
    pub summary: String,
    pub cvss2_score: f64,
    pub cvss2_vector: String,
    pub cvss2_severity: String,
    pub cvss3_score: f64,
    pub cvss3_vector: String,
    pub cvss3_severity: String,
    pub source_link: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cpes: Vec<Cpe>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
    #[serde(rename = "cweIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub cwe_ids: Vec<String>,
    pub published: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub optional: HashMap<String, String>,
}

impl CveContent {
    pub fn new(content_type: ContentType, cve_id: impl Into<String>) -> Self {
        Self {
            content_type,
            cve_id: cve_id.into(),
            ..Self::default()
        }
    }

    /// A record with no summary is a placeholder; collectors emit these when
    /// a feed lists a CVE without describing it. Callers filter on this, the
    /// aggregate itself keeps empties.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}

/// Common Platform Enumeration identifier, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cpe {
    pub uri: String,
    #[serde(rename = "formattedString")]
    pub formatted_string: String,
}

/// A link related to a CVE, with the purpose tags upstream assigned to it
/// (e.g. "Vendor Advisory", "Patch").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "refID", default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A selector result: a value attributed to the source it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sourced<T> {
    #[serde(rename = "type")]
    pub source: ContentType,
    pub value: T,
}

impl<T> Sourced<T> {
    pub fn new(source: ContentType, value: T) -> Self {
        Self { source, value }
    }
}
