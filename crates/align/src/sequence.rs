use crate::combos::consecutive_combinations;
use crate::config::GroupingConfig;
use crate::cross::count_cross;
use crate::group::{Group, GroupSearch};
use crate::index::AlignmentIndex;
use crate::pair::{NULL_ID, Side};

/// Partitions word alignments into contiguous sequence groups.
///
/// A group is a run of source words and a run of target words whose
/// alignments stay inside the two runs and do not cross each other, or a
/// multi-word expression when those are allowed. The search is greedy and
/// largest-first; the first fit wins even where a different choice would
/// give fewer groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceGrouper {
    allow_mwe: bool,
}

impl SequenceGrouper {
    pub fn new(config: &GroupingConfig) -> Self {
        Self {
            allow_mwe: config.allow_mwe,
        }
    }

    pub fn group(&self, index: &AlignmentIndex) -> Vec<Group> {
        let src_ids: Vec<usize> = (0..=index.len(Side::Src)).collect();
        let tgt_ids: Vec<usize> = (0..=index.len(Side::Tgt)).collect();
        let src_runs = candidate_runs(index, Side::Src, &src_ids);
        let tgt_runs = candidate_runs(index, Side::Tgt, &tgt_ids);

        let mut search = GroupSearch::new(index, self.allow_mwe);
        search.search(&src_runs, &tgt_runs, |src, tgt| {
            !index.has_external_alignments(src, tgt)
                && count_cross(&index.pairs_of(Side::Src, src)) == 0
        });
        search.fill_leftovers(index.pairs());
        search.finish()
    }
}

/// Runs that neither contain the null word nor a word aligned to it.
fn candidate_runs<'a>(index: &AlignmentIndex, side: Side, ids: &'a [usize]) -> Vec<&'a [usize]> {
    consecutive_combinations(ids)
        .into_iter()
        .filter(|run| {
            run.iter()
                .all(|&id| id != NULL_ID && !index.is_null_aligned(side, id))
        })
        .collect()
}
