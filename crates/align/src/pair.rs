use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Id of the synthetic null word. Real words are numbered from 1.
pub const NULL_ID: usize = 0;

/// One of the two sentences of an aligned pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Src,
    Tgt,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Src, Side::Tgt];

    pub fn opposite(self) -> Side {
        match self {
            Side::Src => Side::Tgt,
            Side::Tgt => Side::Src,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Src => "src",
            Side::Tgt => "tgt",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value for each [`Side`], indexable by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub src: T,
    pub tgt: T,
}

impl<T> PerSide<T> {
    pub fn new(src: T, tgt: T) -> Self {
        Self { src, tgt }
    }

    /// Builds both values from a per-side constructor.
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Self {
            src: f(Side::Src),
            tgt: f(Side::Tgt),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerSide<U> {
        PerSide {
            src: f(self.src),
            tgt: f(self.tgt),
        }
    }

    pub fn as_ref(&self) -> PerSide<&T> {
        PerSide {
            src: &self.src,
            tgt: &self.tgt,
        }
    }

    /// Exchanges the source and target values.
    pub fn swap(self) -> Self {
        Self {
            src: self.tgt,
            tgt: self.src,
        }
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Src => &self.src,
            Side::Tgt => &self.tgt,
        }
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Src => &mut self.src,
            Side::Tgt => &mut self.tgt,
        }
    }
}

/// A single word-to-word correspondence using 1-based word ids.
///
/// Either id may be [`NULL_ID`]. Pairs order by `(src, tgt)`, which is the
/// order every crossing computation relies on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AlignmentPair {
    pub src: usize,
    pub tgt: usize,
}

impl AlignmentPair {
    pub const fn new(src: usize, tgt: usize) -> Self {
        Self { src, tgt }
    }

    pub fn get(self, side: Side) -> usize {
        match side {
            Side::Src => self.src,
            Side::Tgt => self.tgt,
        }
    }

    /// True when either side is the null word.
    pub fn is_null(self) -> bool {
        self.src == NULL_ID || self.tgt == NULL_ID
    }

    pub fn swapped(self) -> Self {
        Self {
            src: self.tgt,
            tgt: self.src,
        }
    }

    /// Distance between the two positions of the pair.
    pub fn movement(self) -> usize {
        self.src.abs_diff(self.tgt)
    }
}

impl fmt::Display for AlignmentPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.src, self.tgt)
    }
}

impl From<(usize, usize)> for AlignmentPair {
    fn from((src, tgt): (usize, usize)) -> Self {
        Self::new(src, tgt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_side_indexes_by_side() {
        let mut lens = PerSide::new(3, 5);
        assert_eq!(lens[Side::Src], 3);
        lens[Side::Tgt] += 1;
        assert_eq!(lens.tgt, 6);
        assert_eq!(lens.swap(), PerSide::new(6, 3));
    }

    #[test]
    fn null_pairs_are_detected_on_either_side() {
        assert!(AlignmentPair::new(0, 2).is_null());
        assert!(AlignmentPair::new(4, 0).is_null());
        assert!(!AlignmentPair::new(1, 1).is_null());
    }

    #[test]
    fn movement_is_absolute() {
        assert_eq!(AlignmentPair::new(1, 4).movement(), 3);
        assert_eq!(AlignmentPair::new(4, 1).movement(), 3);
    }

    #[test]
    fn side_serializes_lowercase() {
        let json = serde_json::to_string(&Side::Tgt).unwrap();
        assert_eq!(json, "\"tgt\"");
    }
}
