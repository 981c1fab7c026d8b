//! # ASTrED dependency structures
//!
//! Sentences are arenas of [`Word`]s indexed by their 1-based id, with the
//! synthetic null word in slot `0`. A [`DependencyTree`] is built from the
//! words' heads and refuses anything but a single connected, single-rooted
//! tree; callers decide how to degrade when that fails.
//!
//! ```
//! use deptree::Sentence;
//!
//! let sentence = Sentence::from_rows([
//!     (1, "the", 2, "det"),
//!     (2, "cat", 3, "nsubj"),
//!     (3, "sleeps", 0, "root"),
//! ])
//! .unwrap();
//! let tree = sentence.tree().unwrap();
//! assert_eq!(tree.root(), 3);
//! assert!(tree.is_valid_subtree(&[1, 2]));
//! ```

mod conllu;
mod error;
mod sentence;
mod tree;
mod word;

pub use conllu::read_conllu;
pub use error::{SentenceError, TreeError};
pub use sentence::Sentence;
pub use tree::DependencyTree;
pub use word::{NO_RELATION, NULL_TEXT, Word};
