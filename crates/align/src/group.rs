//! Groups of alignment pairs and the greedy search that forms them.

use serde::{Deserialize, Serialize};

use crate::cross::{CrossAttribution, CrossReport};
use crate::index::AlignmentIndex;
use crate::pair::{AlignmentPair, NULL_ID, PerSide, Side};

/// A correspondence unit: the pairs linking a set of source words to a set
/// of target words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pairs: Vec<AlignmentPair>,
    is_mwe: bool,
}

impl Group {
    pub fn new(mut pairs: Vec<AlignmentPair>, is_mwe: bool) -> Self {
        pairs.sort_unstable();
        pairs.dedup();
        Self { pairs, is_mwe }
    }

    pub fn single(pair: AlignmentPair) -> Self {
        Self {
            pairs: vec![pair],
            is_mwe: false,
        }
    }

    pub fn pairs(&self) -> &[AlignmentPair] {
        &self.pairs
    }

    pub fn is_mwe(&self) -> bool {
        self.is_mwe
    }

    pub fn is_single(&self) -> bool {
        self.pairs.len() == 1
    }

    /// Distinct word ids on `side`, ascending.
    pub fn ids(&self, side: Side) -> Vec<usize> {
        let mut ids: Vec<usize> = self.pairs.iter().map(|pair| pair.get(side)).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn min_id(&self, side: Side) -> usize {
        self.pairs
            .iter()
            .map(|pair| pair.get(side))
            .min()
            .unwrap_or(NULL_ID)
    }

    pub fn contains(&self, side: Side, id: usize) -> bool {
        self.pairs.iter().any(|pair| pair.get(side) == id)
    }

    fn sort_key(&self) -> (usize, usize) {
        (self.min_id(Side::Src), self.min_id(Side::Tgt))
    }
}

/// Greedy first-fit matching of source runs against target runs.
///
/// A word belongs to at most one accepted group; claims made by one
/// [`search`](GroupSearch::search) call are honoured by the next.
#[derive(Debug)]
pub struct GroupSearch<'a> {
    index: &'a AlignmentIndex,
    allow_mwe: bool,
    claimed: PerSide<Vec<bool>>,
    groups: Vec<Group>,
}

impl<'a> GroupSearch<'a> {
    pub fn new(index: &'a AlignmentIndex, allow_mwe: bool) -> Self {
        Self {
            index,
            allow_mwe,
            claimed: PerSide::from_fn(|side| vec![false; index.len(side) + 1]),
            groups: Vec::new(),
        }
    }

    pub fn is_claimed(&self, side: Side, id: usize) -> bool {
        self.claimed[side].get(id).copied().unwrap_or(false)
    }

    fn any_claimed(&self, side: Side, ids: &[usize]) -> bool {
        ids.iter().any(|&id| self.is_claimed(side, id))
    }

    fn claim(&mut self, side: Side, ids: &[usize]) {
        for &id in ids {
            if let Some(slot) = self.claimed[side].get_mut(id) {
                *slot = true;
            }
        }
    }

    /// Accepts `group` unchanged and claims its words.
    pub fn keep(&mut self, group: Group) {
        for side in Side::BOTH {
            self.claim(side, &group.ids(side));
        }
        self.groups.push(group);
    }

    /// For each source run in order, accepts the first unclaimed target run
    /// that forms an MWE with it (when allowed) or that `accept` approves.
    ///
    /// An accepted group holds every alignment of its source words.
    pub fn search<F>(&mut self, src_runs: &[&[usize]], tgt_runs: &[&[usize]], mut accept: F)
    where
        F: FnMut(&[usize], &[usize]) -> bool,
    {
        for &src in src_runs {
            if self.any_claimed(Side::Src, src) {
                continue;
            }
            for &tgt in tgt_runs {
                if self.any_claimed(Side::Tgt, tgt) {
                    continue;
                }
                let is_mwe = self.allow_mwe && self.index.is_mwe(src, tgt);
                if is_mwe || accept(src, tgt) {
                    self.claim(Side::Src, src);
                    self.claim(Side::Tgt, tgt);
                    let pairs = self.index.pairs_of(Side::Src, src);
                    self.groups.push(Group::new(pairs, is_mwe));
                    break;
                }
            }
        }
    }

    /// Turns every pair of `pairs` that no accepted group covers into its
    /// own singleton group. Null pairs are never covered.
    pub fn fill_leftovers(&mut self, pairs: &[AlignmentPair]) {
        for &pair in pairs {
            let covered = !pair.is_null()
                && self.is_claimed(Side::Src, pair.src)
                && self.is_claimed(Side::Tgt, pair.tgt);
            if covered {
                continue;
            }
            let single = Group::single(pair);
            if !self.groups.contains(&single) {
                self.groups.push(single);
            }
        }
    }

    /// Accepted groups ordered by their smallest source and target ids.
    pub fn finish(self) -> Vec<Group> {
        let mut groups = self.groups;
        groups.sort_by(|a, b| {
            a.sort_key()
                .cmp(&b.sort_key())
                .then_with(|| a.pairs.cmp(&b.pairs))
        });
        groups
    }
}

/// Groups of one granularity together with their rebased span alignments
/// and the crossings among those spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupLevel {
    groups: Vec<Group>,
    spans: Vec<AlignmentPair>,
    cross: CrossReport,
}

impl GroupLevel {
    /// Represents every group by its smallest source and target id, rebases
    /// each side to dense ranks and counts crossings among the result.
    ///
    /// `groups` must be ordered as [`GroupSearch::finish`] leaves them.
    pub fn new(groups: Vec<Group>, attribution: CrossAttribution) -> Self {
        let firsts: Vec<(usize, usize)> = groups.iter().map(Group::sort_key).collect();
        let src_ranks = DenseRanks::new(firsts.iter().map(|first| first.0));
        let tgt_ranks = DenseRanks::new(firsts.iter().map(|first| first.1));
        let spans: Vec<AlignmentPair> = firsts
            .iter()
            .map(|&(src, tgt)| AlignmentPair::new(src_ranks.rank(src), tgt_ranks.rank(tgt)))
            .collect();
        let cross = CrossReport::tally(&spans, attribution);
        Self {
            groups,
            spans,
            cross,
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// One rebased alignment per group, parallel to [`groups`](Self::groups).
    pub fn spans(&self) -> &[AlignmentPair] {
        &self.spans
    }

    pub fn cross(&self) -> usize {
        self.cross.total()
    }

    /// Positions of the groups holding word `id` on `side`.
    pub fn groups_of(&self, side: Side, id: usize) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, group)| group.contains(side, id))
            .map(|(position, _)| position)
            .collect()
    }
}

struct DenseRanks(Vec<usize>);

impl DenseRanks {
    fn new(values: impl Iterator<Item = usize>) -> Self {
        let mut sorted: Vec<usize> = values.collect();
        sorted.sort_unstable();
        sorted.dedup();
        Self(sorted)
    }

    fn rank(&self, value: usize) -> usize {
        self.0.binary_search(&value).unwrap_or_else(|insert_at| insert_at)
    }
}
