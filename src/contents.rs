//! The per-CVE content aggregate and its selection algorithms.
//!
//! [`CveContents`] collects every source's [`CveContent`] record for a
//! single CVE. Collectors feed records in through [`CveContents::upsert`];
//! the read side asks for the best source links, patch URLs, CPEs,
//! references, and CWE IDs for a given host family, each walking sources in
//! priority order (family-specific prefix, then the rest of the registry).
//!
//! # Example
//!
//! ```
//! use cvemeta::{ContentType, CveContent, CveContents};
//! use cvemeta::provenance::family;
//!
//! let mut nvd = CveContent::new(ContentType::Nvd, "CVE-2024-0001");
//! nvd.source_link = "https://nvd.nist.gov/vuln/detail/CVE-2024-0001".to_string();
//!
//! let contents = CveContents::new([nvd]);
//! let urls = contents.primary_src_urls("en", family::UBUNTU, "CVE-2024-0001", &[]);
//! assert_eq!(urls[0].value, "https://nvd.nist.gov/vuln/detail/CVE-2024-0001");
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::confidence::{Confidence, DetectionMethod};
use crate::content::{Cpe, CveContent, Reference, Sourced};
use crate::provenance::{self, ContentType};

/// Detail-page prefix used to synthesize a source link when no feed
/// provided one for a CVE-prefixed ID.
const NVD_DETAIL_URL: &str = "https://nvd.nist.gov/vuln/detail/";

/// Everything the feeds know about one CVE, keyed by source.
///
/// Single-valued sources hold at most one record; a fresh upsert replaces
/// the old record wholesale. Sources with
/// [`allows_multiple`](ContentType::allows_multiple) hold one record per
/// distinct source link, and re-inserting a link already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CveContents(HashMap<ContentType, Vec<CveContent>>);

impl CveContents {
    /// Builds an aggregate from collector output, applying the upsert rule
    /// per record in order.
    pub fn new(records: impl IntoIterator<Item = CveContent>) -> Self {
        let mut contents = Self::default();
        for record in records {
            contents.upsert(record);
        }
        contents
    }

    /// Inserts one record under its own source.
    ///
    /// This is the only mutation path besides [`sort`](Self::sort); there is
    /// no per-record delete.
    pub fn upsert(&mut self, record: CveContent) {
        let ctype = record.content_type;
        if ctype.allows_multiple() {
            let records = self.0.entry(ctype).or_default();
            if !records.iter().any(|r| r.source_link == record.source_link) {
                records.push(record);
            }
        } else {
            self.0.insert(ctype, vec![record]);
        }
    }

    /// The records held for one source, empty if the source never reported.
    pub fn records(&self, ctype: ContentType) -> &[CveContent] {
        self.0.get(&ctype).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, ctype: ContentType) -> bool {
        self.0.contains_key(&ctype)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of sources that reported content.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContentType, &[CveContent])> {
        self.0.iter().map(|(ctype, records)| (*ctype, records.as_slice()))
    }

    /// Filtered copy without the given sources; `self` is untouched.
    pub fn except(&self, excludes: &[ContentType]) -> CveContents {
        CveContents(
            self.0
                .iter()
                .filter(|(ctype, _)| !excludes.contains(ctype))
                .map(|(ctype, records)| (*ctype, records.clone()))
                .collect(),
        )
    }

    /// The most relevant advisory links for this CVE, best first.
    ///
    /// NVD references tagged "Vendor Advisory" always open the list. Source
    /// links then follow in priority order (NVD, the family's own sources,
    /// GitHub). JVN links are added when the report language is Japanese or
    /// the CVE was matched through JVN's vendor/product correlation; they
    /// may repeat links already listed. When nothing was found and the ID
    /// looks like a CVE, the NVD detail page is synthesized so a report
    /// never lacks a link.
    pub fn primary_src_urls(
        &self,
        lang: &str,
        my_family: &str,
        cve_id: &str,
        confidences: &[Confidence],
    ) -> Vec<Sourced<String>> {
        if cve_id.is_empty() {
            return Vec::new();
        }

        let mut values = Vec::new();
        for cont in self.records(ContentType::Nvd) {
            for reference in &cont.references {
                if reference.tags.iter().any(|t| t == "Vendor Advisory") {
                    values.push(Sourced::new(ContentType::Nvd, reference.link.clone()));
                }
            }
        }

        let mut order = vec![ContentType::Nvd];
        order.extend_from_slice(provenance::types_for_family(my_family));
        order.push(ContentType::GitHub);
        for ctype in order {
            for cont in self.records(ctype) {
                if !cont.source_link.is_empty() {
                    values.push(Sourced::new(ctype, cont.source_link.clone()));
                }
            }
        }

        let jvn_match = confidences
            .iter()
            .any(|c| c.detection_method == DetectionMethod::JvnVendorProductMatch);
        if lang == "ja" || jvn_match {
            for cont in self.records(ContentType::Jvn) {
                if !cont.source_link.is_empty() {
                    values.push(Sourced::new(ContentType::Jvn, cont.source_link.clone()));
                }
            }
        }

        if values.is_empty() && cve_id.starts_with("CVE") {
            return vec![Sourced::new(
                ContentType::Nvd,
                format!("{NVD_DETAIL_URL}{cve_id}"),
            )];
        }
        values
    }

    /// Links NVD tagged as "Patch". Patch metadata is trusted from NVD only.
    pub fn patch_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        for cont in self.records(ContentType::Nvd) {
            for reference in &cont.references {
                if reference.tags.iter().any(|t| t == "Patch") {
                    urls.push(reference.link.clone());
                }
            }
        }
        urls
    }

    /// Affected platforms per source, in priority order for the family.
    pub fn cpes(&self, my_family: &str) -> Vec<Sourced<Vec<Cpe>>> {
        let mut values = Vec::new();
        for ctype in self.priority_order(my_family) {
            for cont in self.records(ctype) {
                if !cont.cpes.is_empty() {
                    values.push(Sourced::new(ctype, cont.cpes.clone()));
                }
            }
        }
        values
    }

    /// Related links per source, in priority order for the family.
    pub fn references(&self, my_family: &str) -> Vec<Sourced<Vec<Reference>>> {
        let mut values = Vec::new();
        for ctype in self.priority_order(my_family) {
            for cont in self.records(ctype) {
                if !cont.references.is_empty() {
                    values.push(Sourced::new(ctype, cont.references.clone()));
                }
            }
        }
        values
    }

    /// Every (source, CWE ID) pair reported for this CVE, in priority order.
    ///
    /// Duplicate IDs reported by different sources are kept so callers can
    /// see how many sources agree; [`uniq_cwe_ids`](Self::uniq_cwe_ids)
    /// collapses them.
    pub fn cwe_ids(&self, my_family: &str) -> Vec<Sourced<String>> {
        let mut values = Vec::new();
        for ctype in self.priority_order(my_family) {
            for cont in self.records(ctype) {
                for cwe_id in &cont.cwe_ids {
                    values.push(Sourced::new(ctype, cwe_id.clone()));
                }
            }
        }
        values
    }

    /// [`cwe_ids`](Self::cwe_ids) collapsed by CWE value.
    ///
    /// One arbitrary source attribution survives per distinct ID; treat the
    /// result as an unordered set.
    pub fn uniq_cwe_ids(&self, my_family: &str) -> Vec<Sourced<String>> {
        let mut uniq: HashMap<String, Sourced<String>> = HashMap::new();
        for cwe in self.cwe_ids(my_family) {
            uniq.insert(cwe.value.clone(), cwe);
        }
        uniq.into_values().collect()
    }

    /// Reorders records and their nested lists into the canonical layout
    /// used for comparing aggregates.
    ///
    /// Records sort by CVSS v3 score descending, then CVSS v2 descending,
    /// then source link ascending; ties on all three keys keep their input
    /// order. References sort by link, CWE IDs and reference tags
    /// lexicographically. Idempotent.
    pub fn sort(&mut self) {
        for records in self.0.values_mut() {
            records.sort_by(|a, b| {
                b.cvss3_score
                    .total_cmp(&a.cvss3_score)
                    .then_with(|| b.cvss2_score.total_cmp(&a.cvss2_score))
                    .then_with(|| a.source_link.cmp(&b.source_link))
            });
            for cont in records.iter_mut() {
                cont.references.sort_by(|a, b| a.link.cmp(&b.link));
                cont.cwe_ids.sort();
                for reference in &mut cont.references {
                    reference.tags.sort();
                }
            }
        }
    }

    /// Family prefix followed by every remaining registered source, each
    /// visited exactly once.
    fn priority_order(&self, my_family: &str) -> Vec<ContentType> {
        let prefix = provenance::types_for_family(my_family);
        let mut order = prefix.to_vec();
        order.extend(provenance::except(ContentType::all(), prefix));
        order
    }
}

impl FromIterator<CveContent> for CveContents {
    fn from_iter<I: IntoIterator<Item = CveContent>>(iter: I) -> Self {
        Self::new(iter)
    }
}
