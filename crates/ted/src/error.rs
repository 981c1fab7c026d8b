use thiserror::Error;

/// Errors raised while building trees or validating edit costs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TedError {
    #[error("tree has no nodes")]
    EmptyTree,
    #[error("tree has {count} root nodes")]
    MultipleRoots { count: usize },
    #[error("node key {key} appears more than once")]
    DuplicateKey { key: usize },
    #[error("node {key} refers to unknown parent {parent}")]
    UnknownParent { key: usize, parent: usize },
    #[error("node {key} is not reachable from the root")]
    Unreachable { key: usize },
    #[error("bracket notation error at byte {position}: {reason}")]
    Bracket { position: usize, reason: String },
    #[error("insertion cost {insertion} differs from deletion cost {deletion}")]
    AsymmetricCosts { deletion: u64, insertion: u64 },
}
