//! Dependency trees stored as arenas indexed by word id.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::sentence::Sentence;

/// A rooted, ordered dependency tree over the real words of a sentence.
///
/// Every vector is indexed by word id; slot `0` belongs to the null word and
/// is never part of the tree. Children are kept in word order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyTree {
    root: usize,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    depths: Vec<usize>,
}

impl DependencyTree {
    /// Builds the tree from the `head` fields of the sentence's words.
    ///
    /// Exactly one word must have head `0`, and every other word must reach
    /// it through heads that exist in the sentence.
    pub fn build(sentence: &Sentence) -> Result<Self, TreeError> {
        let n = sentence.len();
        let mut parents = vec![None; n + 1];
        let mut children = vec![Vec::new(); n + 1];
        let mut roots = Vec::new();

        for word in sentence.words() {
            let head = word.head.ok_or(TreeError::MissingHead { word: word.id })?;
            if head == 0 {
                roots.push(word.id);
                continue;
            }
            if head > n || head == word.id {
                return Err(TreeError::Disconnected { word: word.id });
            }
            parents[word.id] = Some(head);
            children[head].push(word.id);
        }

        let root = match roots.as_slice() {
            [] => return Err(TreeError::NoRoot),
            [root] => *root,
            _ => return Err(TreeError::MultiRoot { roots }),
        };

        let mut depths = vec![0; n + 1];
        let mut visited = vec![false; n + 1];
        let mut queue = VecDeque::from([root]);
        visited[root] = true;
        while let Some(id) = queue.pop_front() {
            for &child in &children[id] {
                visited[child] = true;
                depths[child] = depths[id] + 1;
                queue.push_back(child);
            }
        }
        if let Some(word) = (1..=n).find(|&id| !visited[id]) {
            return Err(TreeError::Disconnected { word });
        }

        Ok(Self {
            root,
            parents,
            children,
            depths,
        })
    }

    pub fn root(&self) -> usize {
        self.root
    }

    /// Number of nodes, equal to the number of real words.
    pub fn len(&self) -> usize {
        self.parents.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: usize) -> bool {
        id != 0 && id < self.parents.len()
    }

    pub fn parent(&self, id: usize) -> Option<usize> {
        self.parents.get(id).copied().flatten()
    }

    pub fn children(&self, id: usize) -> &[usize] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distance from the root, which has depth `0`.
    pub fn depth(&self, id: usize) -> Option<usize> {
        self.contains(id).then(|| self.depths[id])
    }

    /// Node ids in post-order (children left to right, then the parent).
    pub fn postorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack = vec![(self.root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            for &child in self.children(id).iter().rev() {
                stack.push((child, false));
            }
        }
        order
    }

    /// Whether `ids` form a connected subtree: a single shallowest node and
    /// every other member's head inside the set.
    pub fn is_valid_subtree(&self, ids: &[usize]) -> bool {
        let mut depths = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.depth(id) {
                Some(depth) => depths.push(depth),
                None => return false,
            }
        }
        let Some(&top) = depths.iter().min() else {
            return false;
        };
        if depths.iter().filter(|&&depth| depth == top).count() > 1 {
            return false;
        }
        ids.iter().zip(&depths).all(|(&id, &depth)| {
            depth == top || self.parent(id).is_some_and(|head| ids.contains(&head))
        })
    }
}
