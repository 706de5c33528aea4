use crate::model::{Column, CommitCounts, Grid};

/// Folds ascending offsets into week columns: week `k / 7`, day `k % 7`.
///
/// A column restarts on day 0 and is stored once it reaches day 6, so a
/// trailing week that never reaches day 6 is left out.
pub fn build_grid(offsets: &[usize], counts: &CommitCounts) -> Grid {
    let mut grid = Grid::new();
    let mut column: Column = Vec::with_capacity(7);

    for &offset in offsets {
        let week = offset / 7;
        let day = offset % 7;

        if day == 0 {
            column = Vec::with_capacity(7);
        }
        column.push(counts.get(offset));
        if day == 6 {
            grid.insert(week, column.clone());
        }
    }

    grid
}
