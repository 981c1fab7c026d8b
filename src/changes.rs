//! Dependency relation changes across alignments.

use align::{AlignmentIndex, NULL_ID, PerSide, Side};
use deptree::Sentence;
use serde::{Deserialize, Serialize};

/// A change count seen from each side, plus the mean of both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionalChanges {
    pub src: f64,
    pub tgt: f64,
    pub avg: f64,
}

impl DirectionalChanges {
    fn new(src: f64, tgt: f64) -> Self {
        Self {
            src,
            tgt,
            avg: (src + tgt) / 2.0,
        }
    }
}

/// How often aligned words carry different dependency relations.
///
/// Relations are compared without subtypes, so `nmod:poss` equals `nmod`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelChanges {
    /// Word links between words with different relations. Every link is seen
    /// once from each side, so the count does not depend on direction.
    pub default: usize,
    /// Per word, differing links divided by all links of the word including
    /// a null link, summed over the words of a side.
    pub token_avg: DirectionalChanges,
    /// Words none of whose aligned words share their relation. Null-aligned
    /// words count.
    pub overlap: DirectionalChanges,
    #[serde(skip)]
    per_word: PerSide<Vec<usize>>,
}

impl LabelChanges {
    pub fn compute(index: &AlignmentIndex, sentences: PerSide<&Sentence>) -> Self {
        let mut per_word = PerSide::<Vec<usize>>::default();
        let mut token_avg = PerSide::new(0.0, 0.0);
        let mut overlap = PerSide::new(0.0, 0.0);

        for side in Side::BOTH {
            let own = sentences[side];
            let other = sentences[side.opposite()];
            per_word[side] = vec![0; own.len() + 1];
            for word in own.words() {
                let aligned = index.aligned(side, word.id);
                let relation = word.relation();
                let partners: Vec<&str> = aligned
                    .iter()
                    .filter(|&&id| id != NULL_ID)
                    .filter_map(|&id| other.word(id))
                    .map(|partner| partner.relation())
                    .collect();

                let differing = partners.iter().filter(|&&r| r != relation).count();
                per_word[side][word.id] = differing;
                if !aligned.is_empty() {
                    token_avg[side] += differing as f64 / aligned.len() as f64;
                }
                if partners.iter().all(|&r| r != relation) {
                    overlap[side] += 1.0;
                }
            }
        }

        let default = per_word.src.iter().sum();
        Self {
            default,
            token_avg: DirectionalChanges::new(token_avg.src, token_avg.tgt),
            overlap: DirectionalChanges::new(overlap.src, overlap.tgt),
            per_word,
        }
    }

    /// Aligned words of `id` whose relation differs from its own.
    pub fn word_changes(&self, side: Side, id: usize) -> usize {
        self.per_word[side].get(id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(rows: &[(usize, &'static str, usize, &'static str)]) -> Sentence {
        Sentence::from_rows(rows.iter().copied()).unwrap()
    }

    #[test]
    fn counts_differing_relations() {
        let src = sentence(&[(1, "he", 2, "nsubj"), (2, "likes", 0, "root"), (3, "swimming", 2, "xcomp")]);
        let tgt = sentence(&[(1, "hij", 2, "nsubj"), (2, "zwemt", 0, "root"), (3, "graag", 2, "advmod")]);
        let index = AlignmentIndex::from_pharaoh("0-0 1-2 2-1", 3, 3).unwrap();
        let changes = LabelChanges::compute(&index, PerSide::new(&src, &tgt));
        assert_eq!(changes.default, 2);
        assert_eq!(changes.token_avg, DirectionalChanges::new(2.0, 2.0));
        assert_eq!(changes.overlap.avg, 2.0);
        assert_eq!(changes.word_changes(Side::Src, 1), 0);
        assert_eq!(changes.word_changes(Side::Tgt, 3), 1);
    }

    #[test]
    fn null_links_dilute_token_average() {
        // src 1 links to tgt 1 (same relation) and tgt 2 (different);
        // src 2 is unaligned.
        let src = sentence(&[(1, "a", 0, "root"), (2, "b", 1, "punct")]);
        let tgt = sentence(&[(1, "x", 0, "root"), (2, "y", 1, "obj")]);
        let index = AlignmentIndex::from_pharaoh("0-0 0-1", 2, 2).unwrap();
        let changes = LabelChanges::compute(&index, PerSide::new(&src, &tgt));
        assert_eq!(changes.default, 1);
        // src: 1/2 for word 1, 0/1 for the null-aligned word 2.
        assert_eq!(changes.token_avg.src, 0.5);
        // tgt: 0/1 for word 1, 1/1 for word 2.
        assert_eq!(changes.token_avg.tgt, 1.0);
        // src 2 has no partner sharing its relation; tgt 2 neither.
        assert_eq!(changes.overlap.src, 1.0);
        assert_eq!(changes.overlap.tgt, 1.0);
    }

    #[test]
    fn subtypes_are_ignored() {
        let src = sentence(&[(1, "my", 2, "nmod:poss"), (2, "dog", 0, "root")]);
        let tgt = sentence(&[(1, "mijn", 2, "nmod"), (2, "hond", 0, "root")]);
        let index = AlignmentIndex::from_pharaoh("0-0 1-1", 2, 2).unwrap();
        let changes = LabelChanges::compute(&index, PerSide::new(&src, &tgt));
        assert_eq!(changes.default, 0);
        assert_eq!(changes.overlap, DirectionalChanges::default());
    }
}
