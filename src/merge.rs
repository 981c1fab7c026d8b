//! Alignment-aware label merging for the ASTrED tree distance.
//!
//! Words linked through alignment chains form connected components across
//! both sentences. All words of one component share a label describing the
//! whole component, so renaming costs between the two trees only arise where
//! the aligned structures diverge.

use std::collections::HashMap;

use align::{AlignmentIndex, NULL_ID, PerSide, Side};
use deptree::Sentence;

/// Separates a source label from its aligned target labels.
const PAIR_SEPARATOR: &str = ":";
/// Separates target labels aligned to one source word.
const LABEL_SEPARATOR: &str = ",";
/// Separates the source entries of one component.
const ENTRY_SEPARATOR: &str = "|";

/// Per-word labels indexed by word id; slot `0` (the null word) is empty.
pub type LabelMap = Vec<String>;

/// Builds base and merged labels for an aligned sentence pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelMerger;

impl LabelMerger {
    /// `"{side}_{relation}-{n}"` for every word, `n` counting earlier words
    /// of the same sentence with the same relation, starting at 1.
    pub fn base_labels(sentence: &Sentence, side: Side) -> LabelMap {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut labels = Vec::with_capacity(sentence.len() + 1);
        labels.push(String::new());
        for word in sentence.words() {
            let relation = word.relation();
            let occurrence = seen.entry(relation).or_insert(0);
            *occurrence += 1;
            labels.push(format!("{side}_{relation}-{occurrence}"));
        }
        labels
    }

    /// Merged labels for both sides.
    ///
    /// Each alignment component is serialised as its source words in id
    /// order, each written as `label:tgt_label,tgt_label`, joined by `|`.
    /// Words without any non-null alignment keep their base label.
    pub fn merge(index: &AlignmentIndex, sentences: PerSide<&Sentence>) -> PerSide<LabelMap> {
        let base = PerSide::from_fn(|side| Self::base_labels(sentences[side], side));
        let mut merged = base.clone();

        for component in components(index) {
            let serialized = component
                .src
                .iter()
                .map(|&src| {
                    let targets: Vec<&str> = linked(index, Side::Src, src)
                        .map(|tgt| base.tgt[tgt].as_str())
                        .collect();
                    format!(
                        "{}{PAIR_SEPARATOR}{}",
                        base.src[src],
                        targets.join(LABEL_SEPARATOR)
                    )
                })
                .collect::<Vec<_>>()
                .join(ENTRY_SEPARATOR);

            for side in Side::BOTH {
                for &id in &component[side] {
                    merged[side][id] = serialized.clone();
                }
            }
        }
        merged
    }
}

/// Non-null partners of a word.
fn linked(index: &AlignmentIndex, side: Side, id: usize) -> impl Iterator<Item = usize> + '_ {
    index
        .aligned(side, id)
        .iter()
        .copied()
        .filter(|&other| other != NULL_ID)
}

/// Connected components of the bipartite alignment graph, ignoring the null
/// word. Member ids are sorted; components are ordered by their first source
/// word.
fn components(index: &AlignmentIndex) -> Vec<PerSide<Vec<usize>>> {
    let mut visited = PerSide::from_fn(|side| vec![false; index.len(side) + 1]);
    let mut found = Vec::new();

    for start in 1..=index.len(Side::Src) {
        if visited.src[start] || linked(index, Side::Src, start).next().is_none() {
            continue;
        }
        let mut component: PerSide<Vec<usize>> = PerSide::default();
        let mut stack = vec![(Side::Src, start)];
        visited.src[start] = true;
        while let Some((side, id)) = stack.pop() {
            component[side].push(id);
            let other = side.opposite();
            for next in linked(index, side, id) {
                if !visited[other][next] {
                    visited[other][next] = true;
                    stack.push((other, next));
                }
            }
        }
        component.src.sort_unstable();
        component.tgt.sort_unstable();
        found.push(component);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(rows: &[(usize, &'static str, usize, &'static str)]) -> Sentence {
        Sentence::from_rows(rows.iter().copied()).unwrap()
    }

    #[test]
    fn base_labels_count_repeated_relations() {
        let s = sentence(&[
            (1, "big", 3, "amod"),
            (2, "red", 3, "amod"),
            (3, "ball", 0, "root"),
        ]);
        let labels = LabelMerger::base_labels(&s, Side::Tgt);
        assert_eq!(labels, vec!["", "tgt_amod-1", "tgt_amod-2", "tgt_root-1"]);
    }

    #[test]
    fn one_to_one_links_share_a_label() {
        let src = sentence(&[(1, "he", 2, "nsubj"), (2, "likes", 0, "root"), (3, "swimming", 2, "xcomp")]);
        let tgt = sentence(&[(1, "hij", 2, "nsubj"), (2, "zwemt", 0, "root"), (3, "graag", 2, "advmod")]);
        let index = AlignmentIndex::from_pharaoh("0-0 1-2 2-1", 3, 3).unwrap();
        let merged = LabelMerger::merge(&index, PerSide::new(&src, &tgt));
        assert_eq!(merged.src[2], "src_root-1:tgt_advmod-1");
        assert_eq!(merged.tgt[3], "src_root-1:tgt_advmod-1");
        assert_eq!(merged.src[3], "src_xcomp-1:tgt_root-1");
        assert_eq!(merged.tgt[2], merged.src[3]);
        assert_eq!(merged.src[1], merged.tgt[1]);
    }

    #[test]
    fn chains_merge_transitively() {
        // src 1 -> tgt 1, tgt 2; src 2 -> tgt 2: one component.
        let src = sentence(&[(1, "a", 0, "root"), (2, "b", 1, "obj"), (3, "c", 1, "punct")]);
        let tgt = sentence(&[(1, "x", 0, "root"), (2, "y", 1, "obj")]);
        let index = AlignmentIndex::from_pharaoh("0-0 0-1 1-1", 3, 2).unwrap();
        let merged = LabelMerger::merge(&index, PerSide::new(&src, &tgt));
        let expected = "src_root-1:tgt_root-1,tgt_obj-1|src_obj-1:tgt_obj-1";
        assert_eq!(merged.src[1], expected);
        assert_eq!(merged.src[2], expected);
        assert_eq!(merged.tgt[1], expected);
        assert_eq!(merged.tgt[2], expected);
        assert_eq!(merged.src[3], "src_punct-1");
    }
}
