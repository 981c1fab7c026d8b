use serde::{Deserialize, Serialize};

use crate::error::TedError;
use crate::tree::LabeledNode;

/// Prices the elementary edit operations.
///
/// For the distance to be symmetric, `delete` and `insert` must price a node
/// alike and `rename` must not depend on argument order.
pub trait CostModel {
    fn delete(&self, node: &LabeledNode) -> u64;
    fn insert(&self, node: &LabeledNode) -> u64;
    fn rename(&self, from: &LabeledNode, to: &LabeledNode) -> u64;
}

/// Uniform operation costs; renaming between equal labels is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditCosts {
    pub rename: u64,
    pub deletion: u64,
    pub insertion: u64,
}

impl EditCosts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rename(mut self, rename: u64) -> Self {
        self.rename = rename;
        self
    }

    pub fn with_deletion(mut self, deletion: u64) -> Self {
        self.deletion = deletion;
        self
    }

    pub fn with_insertion(mut self, insertion: u64) -> Self {
        self.insertion = insertion;
        self
    }

    /// Insertion and deletion must cost the same.
    pub fn validate(&self) -> Result<(), TedError> {
        if self.insertion != self.deletion {
            return Err(TedError::AsymmetricCosts {
                deletion: self.deletion,
                insertion: self.insertion,
            });
        }
        Ok(())
    }
}

impl Default for EditCosts {
    fn default() -> Self {
        Self {
            rename: 1,
            deletion: 1,
            insertion: 1,
        }
    }
}

impl CostModel for EditCosts {
    fn delete(&self, _node: &LabeledNode) -> u64 {
        self.deletion
    }

    fn insert(&self, _node: &LabeledNode) -> u64 {
        self.insertion
    }

    fn rename(&self, from: &LabeledNode, to: &LabeledNode) -> u64 {
        if from.label == to.label {
            0
        } else {
            self.rename
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unequal_insert_and_delete_are_rejected() {
        let costs = EditCosts::default().with_insertion(2);
        assert_eq!(
            costs.validate(),
            Err(TedError::AsymmetricCosts {
                deletion: 1,
                insertion: 2
            })
        );
        assert!(EditCosts::default().with_rename(3).validate().is_ok());
    }
}
