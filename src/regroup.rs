//! Subtree-aware refinement of sequence groups.

use align::{AlignmentIndex, Group, GroupSearch, GroupingConfig, Side, consecutive_combinations};
use deptree::DependencyTree;

/// Splits sequence groups until every group is a connected subtree on both
/// sides, or a multi-word expression when those are allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtreeRegrouper {
    allow_mwe: bool,
}

impl SubtreeRegrouper {
    pub fn new(config: &GroupingConfig) -> Self {
        Self {
            allow_mwe: config.allow_mwe,
        }
    }

    /// Regroups `sequence_groups`, which must be ordered by smallest ids.
    ///
    /// Single-pair groups pass through. Larger groups are searched again,
    /// largest runs of their own ids first; whatever no accepted sub-group
    /// covers falls back to singletons.
    pub fn regroup(
        &self,
        index: &AlignmentIndex,
        sequence_groups: &[Group],
        src_tree: &DependencyTree,
        tgt_tree: &DependencyTree,
    ) -> Vec<Group> {
        let mut search = GroupSearch::new(index, self.allow_mwe);
        for group in sequence_groups {
            if group.is_single() {
                search.keep(group.clone());
                continue;
            }
            let src_ids = group.ids(Side::Src);
            let tgt_ids = group.ids(Side::Tgt);
            let src_runs = consecutive_combinations(&src_ids);
            let tgt_runs = consecutive_combinations(&tgt_ids);
            search.search(&src_runs, &tgt_runs, |src, tgt| {
                !index.has_external_alignments(src, tgt)
                    && src_tree.is_valid_subtree(src)
                    && tgt_tree.is_valid_subtree(tgt)
            });
            search.fill_leftovers(group.pairs());
        }
        search.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use align::{AlignmentPair, SequenceGrouper};
    use deptree::Sentence;

    // a(1) is the root with b(2) and c(3) as siblings, on both sides.
    fn flat() -> DependencyTree {
        Sentence::from_rows([(1, "a", 0, "root"), (2, "b", 1, "obj"), (3, "c", 1, "obl")])
            .unwrap()
            .tree()
            .unwrap()
    }

    fn regroup(aligns: &str, allow_mwe: bool) -> (Vec<Group>, Vec<Group>) {
        let index = AlignmentIndex::from_pharaoh(aligns, 3, 3).unwrap();
        let cfg = GroupingConfig::default().with_allow_mwe(allow_mwe);
        let seq = SequenceGrouper::new(&cfg).group(&index);
        let tree = flat();
        let sacr = SubtreeRegrouper::new(&cfg).regroup(&index, &seq, &tree, &tree);
        (seq, sacr)
    }

    #[test]
    fn connected_block_is_kept() {
        let (seq, sacr) = regroup("0-0 1-1 2-2", false);
        assert_eq!(seq, sacr);
        assert_eq!(sacr.len(), 2);
    }

    #[test]
    fn sibling_block_is_split() {
        let (seq, sacr) = regroup("1-1 2-2", false);
        assert_eq!(seq.len(), 4);
        assert_eq!(seq[3].pairs().len(), 2);
        assert_eq!(sacr.len(), 5);
        assert_eq!(sacr[3].pairs(), &[AlignmentPair::new(2, 2)]);
        assert_eq!(sacr[4].pairs(), &[AlignmentPair::new(3, 3)]);
    }

    #[test]
    fn mwe_survives_without_subtree_shape() {
        let (_, sacr) = regroup("1-1 1-2 2-1 2-2", true);
        let block = sacr.iter().find(|group| group.pairs().len() == 4).unwrap();
        assert!(block.is_mwe());

        let (_, split) = regroup("1-1 1-2 2-1 2-2", false);
        assert!(split.iter().all(|group| group.is_single()));
    }
}
