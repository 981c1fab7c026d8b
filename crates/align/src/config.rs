//! Configuration for alignment grouping and crossing attribution.

use serde::{Deserialize, Serialize};

use crate::cross::CrossAttribution;

/// Controls how alignments are grouped and how crossings are credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Accept multi-word expressions (every word of a block aligned to every
    /// word of the other block) as groups even when they cross internally.
    pub allow_mwe: bool,
    /// Attribution used for per-word and per-group crossing counts.
    pub attribution: CrossAttribution,
}

impl GroupingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allow_mwe(mut self, allow_mwe: bool) -> Self {
        self.allow_mwe = allow_mwe;
        self
    }

    pub fn with_attribution(mut self, attribution: CrossAttribution) -> Self {
        self.attribution = attribution;
        self
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            allow_mwe: true,
            attribution: CrossAttribution::Movement,
        }
    }
}
