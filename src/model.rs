use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

/// Absolute path of a repository root (the parent of its `.git` directory).
pub type RepoPath = PathBuf;

/// Exact-match author emails whose commits are counted.
pub type AuthorSet = HashSet<String>;

/// Commit totals per day-offset bucket of the lookback window.
///
/// Every offset in `0..window_days` is seeded with zero on construction, so a
/// lookup inside the window never misses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitCounts {
    buckets: BTreeMap<usize, u32>,
}

impl CommitCounts {
    pub fn new(window_days: u32) -> Self {
        let buckets = (0..window_days as usize).map(|offset| (offset, 0)).collect();
        Self { buckets }
    }

    /// Adds one commit to `offset`. Offsets outside the window are dropped and
    /// `false` is returned.
    pub fn increment(&mut self, offset: usize) -> bool {
        match self.buckets.get_mut(&offset) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, offset: usize) -> u32 {
        self.buckets.get(&offset).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Offsets in ascending order.
    pub fn offsets(&self) -> Vec<usize> {
        self.buckets.keys().copied().collect()
    }

    pub fn total(&self) -> u64 {
        self.buckets.values().map(|&c| c as u64).sum()
    }
}

/// Up to seven day counts belonging to one week of the window.
pub type Column = Vec<u32>;

/// Week-indexed columns; week 0 holds the most recent offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    columns: BTreeMap<usize, Column>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, week: usize, column: Column) {
        self.columns.insert(week, column);
    }

    pub fn column(&self, week: usize) -> Option<&[u32]> {
        self.columns.get(&week).map(|c| c.as_slice())
    }

    /// Count at `(week, day)`, zero when the column or the day is missing.
    pub fn count(&self, week: usize, day: usize) -> u32 {
        self.column(week)
            .and_then(|c| c.get(day))
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Empty,
    Light,
    Medium,
    Dark,
}

impl Shade {
    pub fn for_count(count: u32) -> Self {
        match count {
            0 => Shade::Empty,
            1..=4 => Shade::Light,
            5..=9 => Shade::Medium,
            _ => Shade::Dark,
        }
    }
}

/// A single rendered day of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub count: u32,
    pub shade: Shade,
    pub today: bool,
}

impl Cell {
    pub fn new(count: u32, today: bool) -> Self {
        Self {
            count,
            shade: Shade::for_count(count),
            today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_seeded_for_whole_window() {
        let counts = CommitCounts::new(183);
        assert_eq!(counts.len(), 183);
        assert!(counts.offsets().iter().all(|&o| counts.get(o) == 0));
        assert_eq!(counts.offsets().first(), Some(&0));
        assert_eq!(counts.offsets().last(), Some(&182));
    }

    #[test]
    fn increment_outside_window_is_dropped() {
        let mut counts = CommitCounts::new(183);
        assert!(counts.increment(182));
        assert!(!counts.increment(183));
        assert_eq!(counts.len(), 183);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn shade_thresholds() {
        assert_eq!(Shade::for_count(0), Shade::Empty);
        assert_eq!(Shade::for_count(1), Shade::Light);
        assert_eq!(Shade::for_count(4), Shade::Light);
        assert_eq!(Shade::for_count(5), Shade::Medium);
        assert_eq!(Shade::for_count(9), Shade::Medium);
        assert_eq!(Shade::for_count(10), Shade::Dark);
        assert_eq!(Shade::for_count(250), Shade::Dark);
    }
}
