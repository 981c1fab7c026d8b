//! Normalized word alignments with null completion and adjacency lookups.

use serde::{Deserialize, Serialize};

use crate::error::AlignError;
use crate::pair::{AlignmentPair, NULL_ID, PerSide, Side};

/// Parses a Pharaoh/GIZA alignment string (`"0-0 1-2 2-1"`, 0-based).
///
/// Blank input yields no pairs. Any token that is not two non-negative
/// integers joined by `-` is rejected.
pub fn parse_pharaoh(text: &str) -> Result<Vec<(usize, usize)>, AlignError> {
    text.split_whitespace()
        .map(|token| {
            let invalid = || AlignError::InvalidAlignmentFormat {
                token: token.to_string(),
            };
            let (src, tgt) = token.split_once('-').ok_or_else(invalid)?;
            let src = src.parse::<usize>().map_err(|_| invalid())?;
            let tgt = tgt.parse::<usize>().map_err(|_| invalid())?;
            Ok((src, tgt))
        })
        .collect()
}

/// Adds null alignments for every word that has none and returns the pairs
/// sorted and deduplicated.
///
/// Source ids `0..=n_src` missing as a source get `(id, 0)`; afterwards
/// target ids `0..=n_tgt` missing as a target get `(0, id)`. The null word
/// itself is therefore always covered by `(0, 0)`. Completing an already
/// complete set returns it unchanged.
pub fn complete_null_alignments(
    pairs: impl IntoIterator<Item = AlignmentPair>,
    n_src: usize,
    n_tgt: usize,
) -> Vec<AlignmentPair> {
    let mut pairs: Vec<AlignmentPair> = pairs.into_iter().collect();

    let mut has_src = vec![false; n_src + 1];
    for pair in &pairs {
        if let Some(seen) = has_src.get_mut(pair.src) {
            *seen = true;
        }
    }
    for (id, seen) in has_src.iter().enumerate() {
        if !seen {
            pairs.push(AlignmentPair::new(id, NULL_ID));
        }
    }

    let mut has_tgt = vec![false; n_tgt + 1];
    for pair in &pairs {
        if let Some(seen) = has_tgt.get_mut(pair.tgt) {
            *seen = true;
        }
    }
    for (id, seen) in has_tgt.iter().enumerate() {
        if !seen {
            pairs.push(AlignmentPair::new(NULL_ID, id));
        }
    }

    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

/// Word alignments between a source and a target sentence.
///
/// Ids are 1-based with [`NULL_ID`] for the null word. Every word of both
/// sentences takes part in at least one pair, and the pairs are totally
/// ordered by `(src, tgt)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentIndex {
    pairs: Vec<AlignmentPair>,
    lens: PerSide<usize>,
    adjacency: PerSide<Vec<Vec<usize>>>,
}

impl AlignmentIndex {
    /// Builds the index from 0-based `(src, tgt)` word positions.
    pub fn new(raw: &[(usize, usize)], n_src: usize, n_tgt: usize) -> Result<Self, AlignError> {
        let lens = PerSide::new(n_src, n_tgt);
        let mut pairs = Vec::with_capacity(raw.len());
        for &(src, tgt) in raw {
            check_position(Side::Src, src, n_src)?;
            check_position(Side::Tgt, tgt, n_tgt)?;
            pairs.push(AlignmentPair::new(src + 1, tgt + 1));
        }
        Ok(Self::assemble(pairs, lens))
    }

    /// Builds the index from a 0-based Pharaoh string.
    pub fn from_pharaoh(text: &str, n_src: usize, n_tgt: usize) -> Result<Self, AlignError> {
        Self::new(&parse_pharaoh(text)?, n_src, n_tgt)
    }

    /// Builds the index from 1-based pairs which may already hold null pairs.
    pub fn from_word_pairs(
        pairs: impl IntoIterator<Item = AlignmentPair>,
        n_src: usize,
        n_tgt: usize,
    ) -> Result<Self, AlignError> {
        let lens = PerSide::new(n_src, n_tgt);
        let pairs: Vec<AlignmentPair> = pairs.into_iter().collect();
        for pair in &pairs {
            for side in Side::BOTH {
                let id = pair.get(side);
                if id > lens[side] {
                    return Err(AlignError::IndexOutOfRange {
                        side,
                        index: id,
                        len: lens[side],
                    });
                }
            }
        }
        Ok(Self::assemble(pairs, lens))
    }

    fn assemble(pairs: Vec<AlignmentPair>, lens: PerSide<usize>) -> Self {
        let pairs = complete_null_alignments(pairs, lens.src, lens.tgt);
        let mut adjacency = PerSide::from_fn(|side| vec![Vec::new(); lens[side] + 1]);
        for pair in &pairs {
            adjacency.src[pair.src].push(pair.tgt);
            adjacency.tgt[pair.tgt].push(pair.src);
        }
        Self {
            pairs,
            lens,
            adjacency,
        }
    }

    /// All pairs, null pairs included, in `(src, tgt)` order.
    pub fn pairs(&self) -> &[AlignmentPair] {
        &self.pairs
    }

    /// Number of real words on `side`.
    pub fn len(&self, side: Side) -> usize {
        self.lens[side]
    }

    /// Ids on the other side aligned to `id`, ascending. Unknown ids have none.
    pub fn aligned(&self, side: Side, id: usize) -> &[usize] {
        self.adjacency[side]
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_null_aligned(&self, side: Side, id: usize) -> bool {
        self.aligned(side, id).contains(&NULL_ID)
    }

    /// Pairs linking exactly one real word to the null word.
    pub fn null_aligns(&self) -> Vec<AlignmentPair> {
        self.pairs
            .iter()
            .copied()
            .filter(|pair| pair.is_null() && (pair.src != NULL_ID || pair.tgt != NULL_ID))
            .collect()
    }

    /// Pairs without a null side.
    pub fn word_aligns(&self) -> impl Iterator<Item = AlignmentPair> + '_ {
        self.pairs.iter().copied().filter(|pair| !pair.is_null())
    }

    /// Every pair that has one of `ids` on `side`, in `(src, tgt)` order.
    pub fn pairs_of(&self, side: Side, ids: &[usize]) -> Vec<AlignmentPair> {
        let mut pairs: Vec<AlignmentPair> = ids
            .iter()
            .flat_map(|&id| {
                self.aligned(side, id).iter().map(move |&other| match side {
                    Side::Src => AlignmentPair::new(id, other),
                    Side::Tgt => AlignmentPair::new(other, id),
                })
            })
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    /// True when a word of `src` or `tgt` is aligned to a word outside the
    /// other set.
    pub fn has_external_alignments(&self, src: &[usize], tgt: &[usize]) -> bool {
        let leaks = |side: Side, ids: &[usize], others: &[usize]| {
            ids.iter().any(|&id| {
                self.aligned(side, id)
                    .iter()
                    .any(|other| !others.contains(other))
            })
        };
        leaks(Side::Src, src, tgt) || leaks(Side::Tgt, tgt, src)
    }

    /// True when `src` and `tgt` both hold several words and every word of
    /// each set is aligned to exactly the whole other set.
    ///
    /// Both slices must be sorted ascending.
    pub fn is_mwe(&self, src: &[usize], tgt: &[usize]) -> bool {
        src.len() > 1
            && tgt.len() > 1
            && src.iter().all(|&id| self.aligned(Side::Src, id) == tgt)
            && tgt.iter().all(|&id| self.aligned(Side::Tgt, id) == src)
    }

    /// The same alignments with the roles of source and target exchanged.
    pub fn swapped(&self) -> Self {
        let pairs = self.pairs.iter().map(|pair| pair.swapped()).collect();
        Self::assemble(pairs, self.lens.swap())
    }

    /// Renders the non-null pairs as a 0-based Pharaoh string.
    pub fn to_pharaoh(&self) -> String {
        self.word_aligns()
            .map(|pair| format!("{}-{}", pair.src - 1, pair.tgt - 1))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn check_position(side: Side, position: usize, len: usize) -> Result<(), AlignError> {
    if position >= len {
        return Err(AlignError::IndexOutOfRange {
            side,
            index: position,
            len,
        });
    }
    Ok(())
}
