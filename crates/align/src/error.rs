use thiserror::Error;

use crate::pair::Side;

/// Errors raised while building an [`AlignmentIndex`](crate::AlignmentIndex).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// A token of a Pharaoh string is not `<src>-<tgt>` with two non-negative integers.
    #[error("invalid alignment '{token}': expected pairs of src_idx-tgt_idx")]
    InvalidAlignmentFormat { token: String },
    /// An alignment refers to a word the sentence does not have.
    #[error("{side} index {index} out of range for sentence of {len} words")]
    IndexOutOfRange { side: Side, index: usize, len: usize },
}
