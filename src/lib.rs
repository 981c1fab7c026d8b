//! Workspace umbrella crate for ASTrED, the aligned syntactic tree edit
//! distance between a sentence and its translation.
//!
//! This crate ties word alignments ([`align`]), dependency trees
//! ([`deptree`]) and tree edit distance ([`ted`]) together so callers can go
//! from a sentence pair and a Pharaoh alignment string to the full set of
//! metrics with one call.
//!
//! ```
//! use astred::{AstredConfig, Sentence, process_pair};
//!
//! let src = Sentence::from_rows([(1, "he", 2, "nsubj"), (2, "sleeps", 0, "root")])?;
//! let tgt = Sentence::from_rows([(1, "hij", 2, "nsubj"), (2, "slaapt", 0, "root")])?;
//! let metrics = process_pair(src, tgt, "0-0 1-1", &AstredConfig::default())?;
//! assert_eq!(metrics.word_cross, 0);
//! assert_eq!(metrics.astred, Some(0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod aligned;
mod batch;
mod changes;
mod config;
mod merge;
mod metrics;
mod regroup;

pub use align::{
    AlignError, AlignmentIndex, AlignmentPair, CrossAttribution, CrossReport, Group, GroupLevel,
    GroupingConfig, NULL_ID, PerSide, SequenceGrouper, Side, WordCross, count_cross,
};
pub use deptree::{DependencyTree, Sentence, SentenceError, TreeError, Word, read_conllu};
pub use ted::{EditCosts, EditOperation, EditStep, LabeledTree, TedError, TreeDiff};

pub use aligned::AlignedSentences;
pub use batch::{SentencePairInput, process_batch};
pub use changes::{DirectionalChanges, LabelChanges};
pub use config::{AstredConfig, ConfigLoadError};
pub use merge::{LabelMap, LabelMerger};
pub use metrics::{AlignmentMetrics, WordMetrics};
pub use regroup::SubtreeRegrouper;

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Errors that can occur while computing metrics for a sentence pair.
///
/// Dependency tree failures are not among them: they only switch off the
/// tree-level metrics of the pair.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AstredError {
    #[error("alignment failure: {0}")]
    Align(#[from] AlignError),

    #[error("sentence failure: {0}")]
    Sentence(#[from] SentenceError),

    #[error("tree edit distance failure: {0}")]
    Ted(#[from] TedError),

    #[error("{side} sentence has {sentence} words but the alignment expects {alignment}")]
    LengthMismatch {
        side: Side,
        sentence: usize,
        alignment: usize,
    },

    #[error("{metric} differs with roles swapped: {forward} vs {backward}")]
    SymmetryViolation {
        metric: &'static str,
        forward: u64,
        backward: u64,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Receives latency and outcome of each pipeline stage.
pub trait PipelineMetrics: Send + Sync {
    fn record_alignment(&self, latency: Duration, result: Result<(), AlignError>);
    fn record_grouping(&self, latency: Duration, groups: usize);
    fn record_trees(&self, latency: Duration, result: Result<(), TreeError>);
    fn record_ted(&self, latency: Duration, result: Result<(), TedError>);
}

/// Install a global metrics recorder used by the pipeline helpers.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    pub(crate) fn record_alignment(self, result: Result<(), AlignError>) {
        self.recorder.record_alignment(self.start.elapsed(), result);
    }

    pub(crate) fn record_grouping(self, groups: usize) {
        self.recorder.record_grouping(self.start.elapsed(), groups);
    }

    pub(crate) fn record_trees(self, result: Result<(), TreeError>) {
        self.recorder.record_trees(self.start.elapsed(), result);
    }

    pub(crate) fn record_ted(self, result: Result<(), TedError>) {
        self.recorder.record_ted(self.start.elapsed(), result);
    }
}

/// Computes all metrics for one sentence pair given a 0-based Pharaoh
/// alignment string.
pub fn process_pair(
    src: Sentence,
    tgt: Sentence,
    alignments: &str,
    cfg: &AstredConfig,
) -> Result<AlignmentMetrics, AstredError> {
    AlignedSentences::from_pharaoh(src, tgt, alignments, cfg).map(|pair| pair.metrics())
}

/// Bundled English-Dutch sentence pair, used by the demo binary and benches.
pub fn demo_pair(cfg: &AstredConfig) -> Result<AlignedSentences, AstredError> {
    const EN: &str = "\
1\tI\tI\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tlike\tlike\tVERB\t_\t_\t0\troot\t_\t_
3\tswimming\tswim\tVERB\t_\t_\t2\txcomp\t_\t_
4\tin\tin\tADP\t_\t_\t6\tcase\t_\t_
5\tthe\tthe\tDET\t_\t_\t6\tdet\t_\t_
6\tsea\tsea\tNOUN\t_\t_\t3\tobl\t_\t_
";
    const NL: &str = "\
1\tIk\tik\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tzwem\tzwemmen\tVERB\t_\t_\t0\troot\t_\t_
3\tgraag\tgraag\tADV\t_\t_\t2\tadvmod\t_\t_
4\tin\tin\tADP\t_\t_\t6\tcase\t_\t_
5\tde\tde\tDET\t_\t_\t6\tdet\t_\t_
6\tzee\tzee\tNOUN\t_\t_\t2\tobl\t_\t_
";
    let src = Sentence::from_conllu(EN)?;
    let tgt = Sentence::from_conllu(NL)?;
    AlignedSentences::from_pharaoh(src, tgt, "0-0 1-2 2-1 3-3 4-4 5-5", cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(rows: &[(usize, &'static str, usize, &'static str)]) -> Sentence {
        Sentence::from_rows(rows.iter().copied()).unwrap()
    }

    #[test]
    fn process_pair_reports_monotone_pair_as_identical() {
        let src = sentence(&[(1, "the", 2, "det"), (2, "cat", 3, "nsubj"), (3, "sleeps", 0, "root")]);
        let tgt = sentence(&[(1, "de", 2, "det"), (2, "kat", 3, "nsubj"), (3, "slaapt", 0, "root")]);
        let metrics = process_pair(src, tgt, "0-0 1-1 2-2", &AstredConfig::default()).unwrap();
        assert_eq!(metrics.word_cross, 0);
        assert_eq!(metrics.seq_cross, 0);
        assert_eq!(metrics.sacr_cross, Some(0));
        assert_eq!(metrics.ted, Some(0));
        assert_eq!(metrics.astred, Some(0));
        assert_eq!(metrics.n_null_aligns, 0);
    }

    #[test]
    fn process_pair_rejects_malformed_alignment() {
        let src = sentence(&[(1, "a", 0, "root")]);
        let tgt = sentence(&[(1, "b", 0, "root")]);
        let err = process_pair(src, tgt, "0_0", &AstredConfig::default()).unwrap_err();
        assert!(matches!(err, AstredError::Align(AlignError::InvalidAlignmentFormat { .. })));
    }

    #[test]
    fn demo_pair_has_one_crossing() {
        let pair = demo_pair(&AstredConfig::default()).unwrap();
        assert_eq!(pair.word_cross(), 1);
        assert!(pair.ted().is_some());
    }
}
