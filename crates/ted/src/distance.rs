//! Zhang-Shasha tree edit distance with mapping recovery.
//!
//! Nodes are addressed by 1-based post-order position. `lmld[p]` is the
//! position of the leftmost leaf below `p`; key roots are the highest nodes
//! for each distinct leftmost leaf. Subtree distances fill `td` key root by
//! key root, and the mapping is recovered by replaying the forest distance
//! table of each subtree pair the optimal path passes through.

use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::tree::{LabeledNode, LabeledTree};

/// Outcome of one entry of an edit mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOperation {
    /// Both nodes present with equal labels.
    Match,
    /// Both nodes present with different labels.
    Rename,
    /// Only the node of the first tree is present.
    Deletion,
    /// Only the node of the second tree is present.
    Insertion,
}

/// One entry of an edit mapping, identified by node keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditStep {
    pub from: Option<usize>,
    pub to: Option<usize>,
    pub operation: EditOperation,
    pub cost: u64,
}

/// Edit distance between two trees and an optimal mapping realising it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDiff {
    pub distance: u64,
    pub steps: Vec<EditStep>,
}

impl TreeDiff {
    /// Sum of the step costs, equal to `distance`.
    pub fn step_cost(&self) -> u64 {
        self.steps.iter().map(|step| step.cost).sum()
    }

    pub fn count(&self, operation: EditOperation) -> usize {
        self.steps
            .iter()
            .filter(|step| step.operation == operation)
            .count()
    }

    /// The step the node `key` of the first tree takes part in.
    pub fn step_from(&self, key: usize) -> Option<&EditStep> {
        self.steps.iter().find(|step| step.from == Some(key))
    }

    /// The step the node `key` of the second tree takes part in.
    pub fn step_to(&self, key: usize) -> Option<&EditStep> {
        self.steps.iter().find(|step| step.to == Some(key))
    }
}

/// Computes the edit distance from `a` to `b` and one optimal mapping.
pub fn distance<C: CostModel + ?Sized>(a: &LabeledTree, b: &LabeledTree, costs: &C) -> TreeDiff {
    let mut solver = Solver::new(a, b, costs);
    let (a_keyroots, b_keyroots) = (solver.a.keyroots.clone(), solver.b.keyroots.clone());
    for &i in &a_keyroots {
        for &j in &b_keyroots {
            solver.forest_distance(i, j);
        }
    }
    let distance = solver.td[solver.a.len()][solver.b.len()];
    let steps = solver.mapping();
    let diff = TreeDiff { distance, steps };
    debug_assert_eq!(diff.step_cost(), diff.distance, "edit mapping does not add up");
    diff
}

/// Post-order view of a tree.
struct Indexed<'t> {
    tree: &'t LabeledTree,
    post: Vec<usize>,
    lmld: Vec<usize>,
    keyroots: Vec<usize>,
}

impl<'t> Indexed<'t> {
    fn new(tree: &'t LabeledTree) -> Self {
        let order = tree.postorder();
        let n = order.len();
        let mut post = vec![0; n + 1];
        let mut position_of = vec![0; tree.len()];
        for (offset, &node) in order.iter().enumerate() {
            post[offset + 1] = node;
            position_of[node] = offset + 1;
        }

        let mut lmld = vec![0; n + 1];
        for p in 1..=n {
            let node = tree.node(post[p]);
            lmld[p] = match node.children().first() {
                Some(&first) => lmld[position_of[first]],
                None => p,
            };
        }

        let mut seen = vec![false; n + 1];
        let mut keyroots = Vec::new();
        for p in (1..=n).rev() {
            if !seen[lmld[p]] {
                seen[lmld[p]] = true;
                keyroots.push(p);
            }
        }
        keyroots.reverse();

        Self {
            tree,
            post,
            lmld,
            keyroots,
        }
    }

    fn len(&self) -> usize {
        self.post.len() - 1
    }

    fn node(&self, p: usize) -> &LabeledNode {
        self.tree.node(self.post[p])
    }
}

struct Solver<'t, C: ?Sized> {
    a: Indexed<'t>,
    b: Indexed<'t>,
    costs: &'t C,
    td: Vec<Vec<u64>>,
}

impl<'t, C: CostModel + ?Sized> Solver<'t, C> {
    fn new(a: &'t LabeledTree, b: &'t LabeledTree, costs: &'t C) -> Self {
        let a = Indexed::new(a);
        let b = Indexed::new(b);
        let td = vec![vec![0; b.len() + 1]; a.len() + 1];
        Self { a, b, costs, td }
    }

    fn delete(&self, x: usize) -> u64 {
        self.costs.delete(self.a.node(x))
    }

    fn insert(&self, y: usize) -> u64 {
        self.costs.insert(self.b.node(y))
    }

    fn rename(&self, x: usize, y: usize) -> u64 {
        self.costs.rename(self.a.node(x), self.b.node(y))
    }

    /// Fills the forest distance table of the subtrees rooted at `i` and `j`
    /// and records the subtree distances it meets. Row/column `0` is the
    /// empty forest; row `r` stands for position `lmld[i] + r - 1`.
    fn forest_distance(&mut self, i: usize, j: usize) -> Vec<Vec<u64>> {
        let (li, lj) = (self.a.lmld[i], self.b.lmld[j]);
        let rows = i - li + 2;
        let cols = j - lj + 2;
        let mut fd = vec![vec![0u64; cols]; rows];
        for r in 1..rows {
            fd[r][0] = fd[r - 1][0] + self.delete(li + r - 1);
        }
        for c in 1..cols {
            fd[0][c] = fd[0][c - 1] + self.insert(lj + c - 1);
        }
        for r in 1..rows {
            let x = li + r - 1;
            for c in 1..cols {
                let y = lj + c - 1;
                let delete = fd[r - 1][c] + self.delete(x);
                let insert = fd[r][c - 1] + self.insert(y);
                if self.a.lmld[x] == li && self.b.lmld[y] == lj {
                    let rename = fd[r - 1][c - 1] + self.rename(x, y);
                    fd[r][c] = delete.min(insert).min(rename);
                    self.td[x][y] = fd[r][c];
                } else {
                    let before = fd[self.a.lmld[x] - li][self.b.lmld[y] - lj];
                    fd[r][c] = delete.min(insert).min(before + self.td[x][y]);
                }
            }
        }
        fd
    }

    fn mapping(&mut self) -> Vec<EditStep> {
        let mut steps = Vec::with_capacity(self.a.len().max(self.b.len()));
        let mut pending = vec![(self.a.len(), self.b.len())];
        while let Some((i, j)) = pending.pop() {
            let fd = self.forest_distance(i, j);
            let (li, lj) = (self.a.lmld[i], self.b.lmld[j]);
            let (mut r, mut c) = (i - li + 1, j - lj + 1);
            while r > 0 || c > 0 {
                let x = li + r - 1;
                let y = lj + c - 1;
                if r > 0 && c > 0 {
                    if self.a.lmld[x] == li && self.b.lmld[y] == lj {
                        if fd[r][c] == fd[r - 1][c - 1] + self.rename(x, y) {
                            steps.push(self.pair_step(x, y));
                            r -= 1;
                            c -= 1;
                            continue;
                        }
                    } else {
                        let (pr, pc) = (self.a.lmld[x] - li, self.b.lmld[y] - lj);
                        if fd[r][c] == fd[pr][pc] + self.td[x][y] {
                            pending.push((x, y));
                            r = pr;
                            c = pc;
                            continue;
                        }
                    }
                }
                if r > 0 && fd[r][c] == fd[r - 1][c] + self.delete(x) {
                    steps.push(EditStep {
                        from: Some(self.a.node(x).key),
                        to: None,
                        operation: EditOperation::Deletion,
                        cost: self.delete(x),
                    });
                    r -= 1;
                } else {
                    steps.push(EditStep {
                        from: None,
                        to: Some(self.b.node(y).key),
                        operation: EditOperation::Insertion,
                        cost: self.insert(y),
                    });
                    c -= 1;
                }
            }
        }
        steps.sort_by_key(|step| (step.from.is_none(), step.from, step.to));
        steps
    }

    fn pair_step(&self, x: usize, y: usize) -> EditStep {
        let (from, to) = (self.a.node(x), self.b.node(y));
        let operation = if from.label == to.label {
            EditOperation::Match
        } else {
            EditOperation::Rename
        };
        EditStep {
            from: Some(from.key),
            to: Some(to.key),
            operation,
            cost: self.rename(x, y),
        }
    }
}
