//! Per-CVE content aggregation and source ranking.
//!
//! Vulnerability feeds disagree: NVD, JVN, OS-vendor advisories, and the
//! Trivy sub-sources all describe the same CVE differently. This crate
//! collects their records into one [`CveContents`] aggregate per CVE and
//! answers "which source link / patch URL / CPE / reference / CWE should
//! the report show for this host" with deterministic, priority-ordered
//! selection.
//!
//! Collecting the feeds, matching CVEs to hosts, and rendering reports are
//! the callers' jobs; nothing here performs I/O or fails.

pub mod confidence;
pub mod content;
pub mod contents;
pub mod provenance;

pub use confidence::{Confidence, DetectionMethod};
pub use content::{Cpe, CveContent, Reference, Sourced};
pub use contents::CveContents;
pub use provenance::ContentType;
