use thiserror::Error;

/// Errors raised while building a [`Sentence`](crate::Sentence).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SentenceError {
    /// Word ids must run 1, 2, 3, ... in order.
    #[error("word ids must be sequential: expected {expected}, found {found}")]
    NonSequentialIds { expected: usize, found: usize },
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Reasons why a sentence's words do not form a single dependency tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("word {word} has no head")]
    MissingHead { word: usize },
    #[error("sentence has no root word")]
    NoRoot,
    #[error("sentence has {} root words: {roots:?}", .roots.len())]
    MultiRoot { roots: Vec<usize> },
    #[error("word {word} is not connected to the root")]
    Disconnected { word: usize },
}
