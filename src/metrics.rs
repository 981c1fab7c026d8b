//! Serializable metric output for one aligned sentence pair.

use align::PerSide;
use serde::{Deserialize, Serialize};
use ted::{EditOperation, EditStep};

use crate::changes::LabelChanges;

/// Annotations of a single word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordMetrics {
    pub id: usize,
    pub text: String,
    /// Word-level crossings credited to this word.
    pub cross: usize,
    /// `cross` divided by the number of alignments of the word.
    pub avg_cross: f64,
    /// Positions of the sequence groups holding this word.
    pub seq_groups: Vec<usize>,
    /// Positions of the subtree groups holding this word; `None` without trees.
    pub sacr_groups: Option<Vec<usize>>,
    /// Aligned words with a different dependency relation.
    pub changes: usize,
    /// Alignment-merged label; `None` without trees.
    pub connected_label: Option<String>,
    /// How the word fares in the merged-label tree mapping. Target words
    /// left out of the mapping report `Deletion`.
    pub astred_op: Option<EditOperation>,
}

/// Everything computed for one sentence pair.
///
/// Tree-dependent fields are `None` when either dependency tree could not
/// be built; `tree_errors` then says why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentMetrics {
    pub word_cross: usize,
    pub seq_cross: usize,
    pub sacr_cross: Option<usize>,
    pub ted: Option<u64>,
    pub astred: Option<u64>,
    pub n_null_aligns: usize,
    pub label_changes: LabelChanges,
    pub words: PerSide<Vec<WordMetrics>>,
    pub astred_steps: Option<Vec<EditStep>>,
    pub tree_errors: PerSide<Option<String>>,
}

impl AlignmentMetrics {
    /// True when all tree-level metrics are present.
    pub fn has_tree_metrics(&self) -> bool {
        self.sacr_cross.is_some() && self.ted.is_some() && self.astred.is_some()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
