//! Processing many sentence pairs at once.

use deptree::Sentence;
use serde::{Deserialize, Serialize};

use crate::aligned::AlignedSentences;
use crate::config::AstredConfig;
use crate::metrics::AlignmentMetrics;
use crate::AstredError;

/// One sentence pair and its 0-based Pharaoh alignment string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePairInput {
    pub src: Sentence,
    pub tgt: Sentence,
    pub alignments: String,
}

impl SentencePairInput {
    pub fn new(src: Sentence, tgt: Sentence, alignments: impl Into<String>) -> Self {
        Self {
            src,
            tgt,
            alignments: alignments.into(),
        }
    }

    pub fn process(&self, cfg: &AstredConfig) -> Result<AlignmentMetrics, AstredError> {
        AlignedSentences::from_pharaoh(self.src.clone(), self.tgt.clone(), &self.alignments, cfg)
            .map(|pair| pair.metrics())
    }
}

/// Computes metrics for every input, in input order (parallel if
/// `cfg.parallel = true` and the `parallel` feature is enabled).
///
/// A failing pair yields its error without affecting the others.
pub fn process_batch(
    inputs: &[SentencePairInput],
    cfg: &AstredConfig,
) -> Vec<Result<AlignmentMetrics, AstredError>> {
    #[cfg(feature = "parallel")]
    if cfg.parallel {
        use rayon::prelude::*;
        return inputs.par_iter().map(|input| input.process(cfg)).collect();
    }
    inputs.iter().map(|input| input.process(cfg)).collect()
}
