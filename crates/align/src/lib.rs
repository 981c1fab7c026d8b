//! # ASTrED alignment layer
//!
//! Word alignments between a source and a target sentence, the crossings
//! among them and their grouping into contiguous sequence groups.
//!
//! Word ids are 1-based on both sides; id `0` is the synthetic null word,
//! which every unaligned word is attached to. Raw alignments come in as
//! 0-based Pharaoh strings (`"0-0 1-2 2-1"`) or position pairs.
//!
//! ```
//! use align::{AlignmentIndex, CrossAttribution, GroupLevel, GroupingConfig, SequenceGrouper};
//!
//! let index = AlignmentIndex::from_pharaoh("0-0 1-2 2-1 3-3", 4, 4).unwrap();
//! assert_eq!(align::count_cross(index.pairs()), 1);
//!
//! let groups = SequenceGrouper::new(&GroupingConfig::default()).group(&index);
//! let level = GroupLevel::new(groups, CrossAttribution::Movement);
//! assert_eq!(level.cross(), 1);
//! ```

mod combos;
mod config;
mod cross;
mod error;
mod group;
mod index;
mod pair;
mod sequence;

pub use combos::consecutive_combinations;
pub use config::GroupingConfig;
pub use cross::{CrossAttribution, CrossReport, WordCross, count_cross, crosses};
pub use error::AlignError;
pub use group::{Group, GroupLevel, GroupSearch};
pub use index::{AlignmentIndex, complete_null_alignments, parse_pharaoh};
pub use pair::{AlignmentPair, NULL_ID, PerSide, Side};
pub use sequence::SequenceGrouper;
