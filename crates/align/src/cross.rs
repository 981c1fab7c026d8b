//! Crossing counts over ordered alignment pairs.
//!
//! Two pairs `p1 < p2` (ordered by `(src, tgt)`) cross when `p2.tgt < p1.tgt`.
//! Pairs touching the null word never cross anything.

use serde::{Deserialize, Serialize};

use crate::pair::{AlignmentPair, Side};

/// How a crossing is credited to the pairs that take part in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossAttribution {
    /// Credit the pair with the strictly larger `|src - tgt|` movement, the
    /// earlier pair on a tie.
    #[default]
    Movement,
    /// Credit both pairs.
    Shared,
}

/// Whether `first` and `second` cross, given `first` sorts before `second`.
pub fn crosses(first: AlignmentPair, second: AlignmentPair) -> bool {
    !first.is_null() && !second.is_null() && second.tgt < first.tgt
}

/// Number of crossing pair combinations in `pairs`, which must be sorted.
pub fn count_cross(pairs: &[AlignmentPair]) -> usize {
    pairs
        .iter()
        .enumerate()
        .map(|(i, &first)| {
            pairs[i + 1..]
                .iter()
                .filter(|&&second| crosses(first, second))
                .count()
        })
        .sum()
}

/// Crossing count of a word or group, summed and averaged over its pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WordCross {
    pub cross: usize,
    pub avg_cross: f64,
}

/// Total crossings of a pair list plus the crossings credited to each pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReport {
    total: usize,
    credits: Vec<usize>,
}

impl CrossReport {
    /// Counts crossings in the sorted `pairs` and credits each one according
    /// to `attribution`. Movement is measured on the positions stored in the
    /// pairs, so rebased group positions are honoured as given.
    pub fn tally(pairs: &[AlignmentPair], attribution: CrossAttribution) -> Self {
        let mut credits = vec![0; pairs.len()];
        let mut total = 0;
        for (i, &first) in pairs.iter().enumerate() {
            for (offset, &second) in pairs[i + 1..].iter().enumerate() {
                if !crosses(first, second) {
                    continue;
                }
                let j = i + 1 + offset;
                total += 1;
                match attribution {
                    CrossAttribution::Movement => {
                        let credited = if second.movement() > first.movement() { j } else { i };
                        credits[credited] += 1;
                    }
                    CrossAttribution::Shared => {
                        credits[i] += 1;
                        credits[j] += 1;
                    }
                }
            }
        }
        Self { total, credits }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Crossings of the word `id` on `side` over its own pairs in `pairs`
    /// (the list this report was tallied from).
    pub fn word_cross(&self, pairs: &[AlignmentPair], side: Side, id: usize) -> WordCross {
        let mut cross = 0;
        let mut entries = 0;
        for (pair, credit) in pairs.iter().zip(&self.credits) {
            if pair.get(side) == id {
                cross += credit;
                entries += 1;
            }
        }
        let avg_cross = if entries == 0 {
            0.0
        } else {
            cross as f64 / entries as f64
        };
        WordCross { cross, avg_cross }
    }
}
