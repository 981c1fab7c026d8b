//! # Tree edit distance
//!
//! Ordered labeled trees ([`LabeledTree`]) and the Zhang-Shasha edit
//! distance between them. Besides the scalar distance, [`distance`] returns
//! an optimal node mapping in which every node of either tree appears
//! exactly once, tagged with the [`EditOperation`] applied to it. The step
//! costs always add up to the distance.
//!
//! ```
//! use ted::{EditCosts, LabeledTree, distance};
//!
//! let a = LabeledTree::parse_bracket("{root{nsubj}{obj}}").unwrap();
//! let b = LabeledTree::parse_bracket("{root{nsubj}{obl}}").unwrap();
//! let diff = distance(&a, &b, &EditCosts::default());
//! assert_eq!(diff.distance, 1);
//! assert_eq!(diff.step_cost(), diff.distance);
//! ```

mod cost;
mod distance;
mod error;
mod tree;

pub use cost::{CostModel, EditCosts};
pub use distance::{EditOperation, EditStep, TreeDiff, distance};
pub use error::TedError;
pub use tree::{LabeledNode, LabeledTree};
