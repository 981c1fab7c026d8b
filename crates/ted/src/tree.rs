//! Ordered labeled trees stored as node arenas.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::TedError;

/// A node of a [`LabeledTree`].
///
/// `key` identifies the node to the caller (a word id, for instance) and is
/// what edit mappings report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledNode {
    pub key: usize,
    pub label: String,
    children: Vec<usize>,
}

impl LabeledNode {
    /// Arena positions of the children, left to right.
    pub fn children(&self) -> &[usize] {
        &self.children
    }
}

/// A rooted, ordered tree with a string label on every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledTree {
    nodes: Vec<LabeledNode>,
    root: usize,
}

impl LabeledTree {
    /// Builds a tree from `(key, parent_key, label)` entries.
    ///
    /// Exactly one entry has no parent. Siblings keep the order in which
    /// they are given.
    pub fn from_parents<I, S>(entries: I) -> Result<Self, TedError>
    where
        I: IntoIterator<Item = (usize, Option<usize>, S)>,
        S: Into<String>,
    {
        let entries: Vec<(usize, Option<usize>, String)> = entries
            .into_iter()
            .map(|(key, parent, label)| (key, parent, label.into()))
            .collect();
        if entries.is_empty() {
            return Err(TedError::EmptyTree);
        }

        let mut positions = HashMap::with_capacity(entries.len());
        for (position, (key, _, _)) in entries.iter().enumerate() {
            if positions.insert(*key, position).is_some() {
                return Err(TedError::DuplicateKey { key: *key });
            }
        }

        let mut nodes: Vec<LabeledNode> = entries
            .iter()
            .map(|(key, _, label)| LabeledNode {
                key: *key,
                label: label.clone(),
                children: Vec::new(),
            })
            .collect();
        let mut roots = Vec::new();
        for (position, (key, parent, _)) in entries.iter().enumerate() {
            match parent {
                None => roots.push(position),
                Some(parent) => {
                    let parent_position = *positions.get(parent).ok_or(TedError::UnknownParent {
                        key: *key,
                        parent: *parent,
                    })?;
                    nodes[parent_position].children.push(position);
                }
            }
        }
        let root = match roots.as_slice() {
            [root] => *root,
            _ => return Err(TedError::MultipleRoots { count: roots.len() }),
        };

        let tree = Self { nodes, root };
        let reached = tree.preorder();
        if reached.len() != tree.nodes.len() {
            let mut seen = vec![false; tree.nodes.len()];
            for position in reached {
                seen[position] = true;
            }
            if let Some(position) = seen.iter().position(|seen| !seen) {
                return Err(TedError::Unreachable {
                    key: tree.nodes[position].key,
                });
            }
        }
        Ok(tree)
    }

    /// Parses bracket notation such as `{a{b}{c}}`.
    ///
    /// Keys are assigned in pre-order starting at `0`. Labels run up to the
    /// next brace; whitespace between brackets is ignored.
    pub fn parse_bracket(text: &str) -> Result<Self, TedError> {
        let bytes = text.as_bytes();
        let mut nodes: Vec<LabeledNode> = Vec::new();
        let mut open: Vec<usize> = Vec::new();
        let mut root = None;
        let mut pos = 0;

        while pos < bytes.len() {
            match bytes[pos] {
                b'{' => {
                    if root.is_some() && open.is_empty() {
                        return Err(bracket_error(pos, "content after the root node"));
                    }
                    let start = pos + 1;
                    let end = bytes[start..]
                        .iter()
                        .position(|&b| b == b'{' || b == b'}')
                        .map_or(bytes.len(), |offset| start + offset);
                    let index = nodes.len();
                    nodes.push(LabeledNode {
                        key: index,
                        label: text[start..end].to_string(),
                        children: Vec::new(),
                    });
                    match open.last() {
                        Some(&parent) => nodes[parent].children.push(index),
                        None => root = Some(index),
                    }
                    open.push(index);
                    pos = end;
                }
                b'}' => {
                    if open.pop().is_none() {
                        return Err(bracket_error(pos, "unbalanced '}'"));
                    }
                    pos += 1;
                }
                b if b.is_ascii_whitespace() => pos += 1,
                _ => return Err(bracket_error(pos, "expected '{' or '}'")),
            }
        }

        if !open.is_empty() {
            return Err(bracket_error(bytes.len(), "unclosed '{'"));
        }
        let root = root.ok_or(TedError::EmptyTree)?;
        Ok(Self { nodes, root })
    }

    /// Renders the tree in bracket notation.
    pub fn to_bracket(&self) -> String {
        let mut out = String::new();
        self.write_bracket(self.root, &mut out);
        out
    }

    fn write_bracket(&self, position: usize, out: &mut String) {
        let node = &self.nodes[position];
        out.push('{');
        out.push_str(&node.label);
        for &child in &node.children {
            self.write_bracket(child, out);
        }
        out.push('}');
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn node(&self, position: usize) -> &LabeledNode {
        &self.nodes[position]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Arena positions in post-order.
    pub fn postorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, false)];
        while let Some((position, expanded)) = stack.pop() {
            if expanded {
                order.push(position);
                continue;
            }
            stack.push((position, true));
            for &child in self.nodes[position].children.iter().rev() {
                stack.push((child, false));
            }
        }
        order
    }

    fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        let mut seen = vec![false; self.nodes.len()];
        while let Some(position) = stack.pop() {
            if std::mem::replace(&mut seen[position], true) {
                continue;
            }
            order.push(position);
            stack.extend(self.nodes[position].children.iter().rev());
        }
        order
    }
}

fn bracket_error(position: usize, reason: &str) -> TedError {
    TedError::Bracket {
        position,
        reason: reason.to_string(),
    }
}
