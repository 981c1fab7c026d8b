//! A sentence pair with its alignment and every derived metric.

use std::time::Instant;

use align::{
    AlignmentIndex, CrossReport, GroupLevel, PerSide, SequenceGrouper, Side, WordCross,
};
use deptree::{DependencyTree, Sentence, TreeError};
use ted::{EditOperation, LabeledTree, TedError, TreeDiff, distance};
use tracing::{Level, debug, info, warn};

use crate::changes::LabelChanges;
use crate::config::AstredConfig;
use crate::merge::{LabelMap, LabelMerger};
use crate::metrics::{AlignmentMetrics, WordMetrics};
use crate::regroup::SubtreeRegrouper;
use crate::{AstredError, MetricsSpan};

/// Everything that needs both dependency trees.
#[derive(Debug, Clone)]
struct TreeLevel {
    trees: PerSide<DependencyTree>,
    subtree: GroupLevel,
    merged_labels: PerSide<LabelMap>,
    ted: TreeDiff,
    astred: TreeDiff,
}

/// An aligned sentence pair, fully computed at construction.
///
/// Stages run in a fixed order: word crossings, sequence groups, dependency
/// trees, subtree groups, merged labels, then both tree edit distances. When
/// either tree cannot be built the tree stages are skipped and their
/// accessors return `None`.
#[derive(Debug, Clone)]
pub struct AlignedSentences {
    sentences: PerSide<Sentence>,
    index: AlignmentIndex,
    word_cross: CrossReport,
    sequence: GroupLevel,
    label_changes: LabelChanges,
    tree_level: Option<TreeLevel>,
    tree_errors: PerSide<Option<TreeError>>,
}

impl AlignedSentences {
    /// Computes all metrics for `src` and `tgt` aligned by `index`.
    ///
    /// With `config.check_symmetry` set, everything is computed a second
    /// time with the roles of source and target exchanged, and any metric
    /// that differs is reported as [`AstredError::SymmetryViolation`].
    pub fn build(
        src: Sentence,
        tgt: Sentence,
        index: AlignmentIndex,
        config: &AstredConfig,
    ) -> Result<Self, AstredError> {
        config
            .validate()
            .map_err(|err| AstredError::Config(err.to_string()))?;

        let span = tracing::span!(
            Level::INFO,
            "astred.build",
            n_src = src.len(),
            n_tgt = tgt.len()
        );
        let _guard = span.enter();
        let start = Instant::now();

        let sentences = PerSide::new(src, tgt);
        let built = Self::compute(sentences, index, config, true)?;
        if config.check_symmetry {
            built.check_symmetry(config)?;
        }

        info!(
            word_cross = built.word_cross(),
            seq_cross = built.seq_cross(),
            sacr_cross = ?built.sacr_cross(),
            ted = ?built.ted(),
            astred = ?built.astred(),
            elapsed_micros = start.elapsed().as_micros(),
            "astred_success"
        );
        Ok(built)
    }

    /// Parses a 0-based Pharaoh alignment string and builds the pair.
    pub fn from_pharaoh(
        src: Sentence,
        tgt: Sentence,
        alignments: &str,
        config: &AstredConfig,
    ) -> Result<Self, AstredError> {
        let mut alignment_metrics = MetricsSpan::start();
        let index = match AlignmentIndex::from_pharaoh(alignments, src.len(), tgt.len()) {
            Ok(index) => {
                if let Some(span) = alignment_metrics.take() {
                    span.record_alignment(Ok(()));
                }
                index
            }
            Err(err) => {
                if let Some(span) = alignment_metrics.take() {
                    span.record_alignment(Err(err.clone()));
                }
                warn!(error = %err, "alignment_failure");
                return Err(err.into());
            }
        };
        Self::build(src, tgt, index, config)
    }

    /// Runs every stage. Stage metrics are only reported when `observe` is
    /// set, so the mirrored run of the symmetry check stays silent.
    fn compute(
        sentences: PerSide<Sentence>,
        index: AlignmentIndex,
        config: &AstredConfig,
        observe: bool,
    ) -> Result<Self, AstredError> {
        for side in Side::BOTH {
            if index.len(side) != sentences[side].len() {
                return Err(AstredError::LengthMismatch {
                    side,
                    sentence: sentences[side].len(),
                    alignment: index.len(side),
                });
            }
        }
        let attribution = config.grouping.attribution;

        let word_cross = CrossReport::tally(index.pairs(), attribution);

        let mut grouping_metrics = stage_metrics(observe);
        let groups = SequenceGrouper::new(&config.grouping).group(&index);
        let sequence = GroupLevel::new(groups, attribution);
        if let Some(span) = grouping_metrics.take() {
            span.record_grouping(sequence.groups().len());
        }
        debug!(
            pairs = index.pairs().len(),
            word_cross = word_cross.total(),
            seq_groups = sequence.groups().len(),
            seq_cross = sequence.cross(),
            "sequence_groups"
        );

        let label_changes = LabelChanges::compute(&index, sentences.as_ref());

        let mut tree_metrics = stage_metrics(observe);
        let trees = PerSide::from_fn(|side| sentences[side].tree());
        let mut tree_errors = PerSide::new(None, None);
        for side in Side::BOTH {
            if let Err(err) = &trees[side] {
                warn!(side = %side, error = %err, "tree_unavailable");
                tree_errors[side] = Some(err.clone());
            }
        }
        if let Some(span) = tree_metrics.take() {
            let outcome = match (&tree_errors.src, &tree_errors.tgt) {
                (Some(err), _) | (None, Some(err)) => Err(err.clone()),
                (None, None) => Ok(()),
            };
            span.record_trees(outcome);
        }

        let tree_level = match trees {
            PerSide {
                src: Ok(src),
                tgt: Ok(tgt),
            } => Some(TreeLevel::compute(
                PerSide::new(src, tgt),
                &sentences,
                &index,
                &sequence,
                config,
                observe,
            )?),
            _ => None,
        };

        Ok(Self {
            sentences,
            index,
            word_cross,
            sequence,
            label_changes,
            tree_level,
            tree_errors,
        })
    }

    fn check_symmetry(&self, config: &AstredConfig) -> Result<(), AstredError> {
        let mirrored = Self::compute(
            self.sentences.clone().swap(),
            self.index.swapped(),
            config,
            false,
        )?;

        let totals = [
            ("word_cross", Some(self.word_cross() as u64), Some(mirrored.word_cross() as u64)),
            ("seq_cross", Some(self.seq_cross() as u64), Some(mirrored.seq_cross() as u64)),
            (
                "sacr_cross",
                self.sacr_cross().map(|c| c as u64),
                mirrored.sacr_cross().map(|c| c as u64),
            ),
            ("ted", self.ted(), mirrored.ted()),
            ("astred", self.astred(), mirrored.astred()),
        ];
        for (metric, forward, backward) in totals {
            if let (Some(forward), Some(backward)) = (forward, backward)
                && forward != backward
            {
                return Err(AstredError::SymmetryViolation {
                    metric,
                    forward,
                    backward,
                });
            }
        }
        Ok(())
    }

    pub fn sentence(&self, side: Side) -> &Sentence {
        &self.sentences[side]
    }

    pub fn index(&self) -> &AlignmentIndex {
        &self.index
    }

    /// Crossings among word-level alignments.
    pub fn word_cross(&self) -> usize {
        self.word_cross.total()
    }

    /// Crossings, credits included, of one word.
    pub fn cross_of(&self, side: Side, id: usize) -> WordCross {
        self.word_cross.word_cross(self.index.pairs(), side, id)
    }

    pub fn sequence(&self) -> &GroupLevel {
        &self.sequence
    }

    /// Crossings among sequence groups.
    pub fn seq_cross(&self) -> usize {
        self.sequence.cross()
    }

    pub fn subtree(&self) -> Option<&GroupLevel> {
        self.tree_level.as_ref().map(|level| &level.subtree)
    }

    /// Crossings among subtree groups.
    pub fn sacr_cross(&self) -> Option<usize> {
        self.subtree().map(GroupLevel::cross)
    }

    pub fn tree(&self, side: Side) -> Option<&DependencyTree> {
        self.tree_level.as_ref().map(|level| &level.trees[side])
    }

    /// Why the tree of `side` could not be built.
    pub fn tree_error(&self, side: Side) -> Option<&TreeError> {
        self.tree_errors[side].as_ref()
    }

    /// Edit distance between the trees labeled with plain relations.
    pub fn ted(&self) -> Option<u64> {
        self.ted_diff().map(|diff| diff.distance)
    }

    pub fn ted_diff(&self) -> Option<&TreeDiff> {
        self.tree_level.as_ref().map(|level| &level.ted)
    }

    /// Edit distance between the trees labeled with merged labels.
    pub fn astred(&self) -> Option<u64> {
        self.astred_diff().map(|diff| diff.distance)
    }

    pub fn astred_diff(&self) -> Option<&TreeDiff> {
        self.tree_level.as_ref().map(|level| &level.astred)
    }

    pub fn merged_labels(&self) -> Option<&PerSide<LabelMap>> {
        self.tree_level.as_ref().map(|level| &level.merged_labels)
    }

    pub fn label_changes(&self) -> &LabelChanges {
        &self.label_changes
    }

    /// The step of the merged-label mapping a word takes part in.
    pub fn astred_op(&self, side: Side, id: usize) -> Option<EditOperation> {
        let diff = self.astred_diff()?;
        match side {
            Side::Src => diff.step_from(id).map(|step| step.operation),
            Side::Tgt => diff.step_to(id).map(|step| match step.from {
                None => EditOperation::Deletion,
                Some(_) => step.operation,
            }),
        }
    }

    pub fn word_metrics(&self, side: Side) -> Vec<WordMetrics> {
        self.sentences[side]
            .words()
            .iter()
            .map(|word| {
                let WordCross { cross, avg_cross } = self.cross_of(side, word.id);
                WordMetrics {
                    id: word.id,
                    text: word.text.clone(),
                    cross,
                    avg_cross,
                    seq_groups: self.sequence.groups_of(side, word.id),
                    sacr_groups: self.subtree().map(|level| level.groups_of(side, word.id)),
                    changes: self.label_changes.word_changes(side, word.id),
                    connected_label: self
                        .merged_labels()
                        .map(|labels| labels[side][word.id].clone()),
                    astred_op: self.astred_op(side, word.id),
                }
            })
            .collect()
    }

    pub fn metrics(&self) -> AlignmentMetrics {
        AlignmentMetrics {
            word_cross: self.word_cross(),
            seq_cross: self.seq_cross(),
            sacr_cross: self.sacr_cross(),
            ted: self.ted(),
            astred: self.astred(),
            n_null_aligns: self.index.null_aligns().len(),
            label_changes: self.label_changes.clone(),
            words: PerSide::from_fn(|side| self.word_metrics(side)),
            astred_steps: self.astred_diff().map(|diff| diff.steps.clone()),
            tree_errors: self
                .tree_errors
                .as_ref()
                .map(|err| err.as_ref().map(ToString::to_string)),
        }
    }
}

impl TreeLevel {
    fn compute(
        trees: PerSide<DependencyTree>,
        sentences: &PerSide<Sentence>,
        index: &AlignmentIndex,
        sequence: &GroupLevel,
        config: &AstredConfig,
        observe: bool,
    ) -> Result<Self, AstredError> {
        let groups = SubtreeRegrouper::new(&config.grouping).regroup(
            index,
            sequence.groups(),
            &trees.src,
            &trees.tgt,
        );
        let subtree = GroupLevel::new(groups, config.grouping.attribution);
        debug!(
            sacr_groups = subtree.groups().len(),
            sacr_cross = subtree.cross(),
            "subtree_groups"
        );

        let merged_labels = LabelMerger::merge(index, sentences.as_ref());

        let mut ted_metrics = stage_metrics(observe);
        let diffs = Self::distances(&trees, sentences, &merged_labels, config);
        if let Some(span) = ted_metrics.take() {
            span.record_ted(diffs.as_ref().map(|_| ()).map_err(Clone::clone));
        }
        let (ted, astred) = diffs?;
        debug!(ted = ted.distance, astred = astred.distance, "tree_distances");

        Ok(Self {
            trees,
            subtree,
            merged_labels,
            ted,
            astred,
        })
    }

    fn distances(
        trees: &PerSide<DependencyTree>,
        sentences: &PerSide<Sentence>,
        merged_labels: &PerSide<LabelMap>,
        config: &AstredConfig,
    ) -> Result<(TreeDiff, TreeDiff), TedError> {
        let plain = PerSide::from_fn(|side| {
            labeled_tree(&trees[side], |id| {
                sentences[side]
                    .word(id)
                    .map(|word| word.relation().to_string())
                    .unwrap_or_default()
            })
        });
        let merged = PerSide::from_fn(|side| {
            labeled_tree(&trees[side], |id| merged_labels[side][id].clone())
        });
        let (plain_src, plain_tgt) = (plain.src?, plain.tgt?);
        let (merged_src, merged_tgt) = (merged.src?, merged.tgt?);
        Ok((
            distance(&plain_src, &plain_tgt, &config.costs),
            distance(&merged_src, &merged_tgt, &config.costs),
        ))
    }
}

fn stage_metrics(observe: bool) -> Option<MetricsSpan> {
    if observe {
        MetricsSpan::start()
    } else {
        None
    }
}

/// Converts a dependency tree into a labeled tree keyed by word id. Children
/// keep word order.
fn labeled_tree(
    tree: &DependencyTree,
    mut label: impl FnMut(usize) -> String,
) -> Result<LabeledTree, TedError> {
    LabeledTree::from_parents((1..=tree.len()).map(|id| (id, tree.parent(id), label(id))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Sentence {
        Sentence::from_rows([
            (1, "he", 2, "nsubj"),
            (2, "likes", 0, "root"),
            (3, "swimming", 2, "xcomp"),
        ])
        .unwrap()
    }

    fn nl() -> Sentence {
        Sentence::from_rows([
            (1, "hij", 2, "nsubj"),
            (2, "zwemt", 0, "root"),
            (3, "graag", 2, "advmod"),
        ])
        .unwrap()
    }

    fn build(src: Sentence, tgt: Sentence, aligns: &str) -> AlignedSentences {
        let cfg = AstredConfig::default().with_symmetry_check(true);
        AlignedSentences::from_pharaoh(src, tgt, aligns, &cfg).unwrap()
    }

    #[test]
    fn computes_every_level() {
        let pair = build(en(), nl(), "0-0 1-2 2-1");
        assert_eq!(pair.word_cross(), 1);
        assert_eq!(pair.seq_cross(), 1);
        assert_eq!(pair.sacr_cross(), Some(1));
        assert_eq!(pair.ted(), Some(1));
        assert_eq!(pair.astred(), Some(2));
        assert_eq!(pair.sequence().groups().len(), 4);
    }

    #[test]
    fn word_operations_follow_merged_mapping() {
        let pair = build(en(), nl(), "0-0 1-2 2-1");
        assert_eq!(pair.astred_op(Side::Src, 1), Some(EditOperation::Match));
        assert_eq!(pair.astred_op(Side::Src, 2), Some(EditOperation::Rename));
        assert_eq!(pair.astred_op(Side::Src, 3), Some(EditOperation::Rename));
        assert_eq!(pair.astred_op(Side::Tgt, 1), Some(EditOperation::Match));
    }

    #[test]
    fn movement_credits_the_longer_link() {
        let pair = build(en(), nl(), "0-0 1-2 2-1");
        // (2,3) and (3,2) move equally far; the earlier pair is credited.
        assert_eq!(pair.cross_of(Side::Src, 2).cross, 1);
        assert_eq!(pair.cross_of(Side::Src, 3).cross, 0);
        assert_eq!(pair.cross_of(Side::Tgt, 3).cross, 1);
    }

    #[test]
    fn broken_tree_skips_tree_metrics() {
        let broken = Sentence::from_rows([
            (1, "he", 0, "root"),
            (2, "likes", 0, "root"),
            (3, "swimming", 2, "xcomp"),
        ])
        .unwrap();
        let pair = build(broken, nl(), "0-0 1-2 2-1");
        assert_eq!(pair.word_cross(), 1);
        assert_eq!(pair.sacr_cross(), None);
        assert_eq!(pair.ted(), None);
        assert_eq!(pair.astred(), None);
        assert!(matches!(
            pair.tree_error(Side::Src),
            Some(TreeError::MultiRoot { .. })
        ));
        assert!(pair.tree_error(Side::Tgt).is_none());
    }

    #[test]
    fn rejects_index_for_other_lengths() {
        let index = AlignmentIndex::from_pharaoh("0-0", 2, 3).unwrap();
        let err = AlignedSentences::build(en(), nl(), index, &AstredConfig::default()).unwrap_err();
        assert_eq!(
            err,
            AstredError::LengthMismatch {
                side: Side::Src,
                sentence: 3,
                alignment: 2
            }
        );
    }
}
