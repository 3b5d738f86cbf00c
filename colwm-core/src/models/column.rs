use super::{BBox, PaneId};
use serde::{Deserialize, Serialize};

/// Index of a column in the layout, columns live as long as the process.
pub type ColumnId = usize;

/// A vertical stack of panes sharing one horizontal band.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub x: i32,
    pub width: i32,
    pub max_height: i32,
    pub region: BBox,
    pub(crate) first: Option<PaneId>,
    pub(crate) last: Option<PaneId>,
    pub(crate) count: usize,
}

impl Column {
    #[must_use]
    pub const fn new(id: ColumnId, x: i32, width: i32, region: BBox) -> Self {
        Self {
            id,
            x,
            width,
            max_height: region.height,
            region,
            first: None,
            last: None,
            count: 0,
        }
    }

    #[must_use]
    pub const fn first(&self) -> Option<PaneId> {
        self.first
    }

    #[must_use]
    pub const fn last(&self) -> Option<PaneId> {
        self.last
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// A column owns its own width plus the gap to its right neighbour.
    #[must_use]
    pub const fn contains_x(&self, x: i32, hspacing: i32) -> bool {
        self.x <= x && x < self.x + self.width + hspacing
    }
}

/// Spreads `count` columns evenly over the display regions, filling regions from left to right.
#[must_use]
pub fn layout_columns(regions: &[BBox], count: usize, hspacing: i32) -> Vec<Column> {
    let mut columns = Vec::with_capacity(count);
    if regions.is_empty() {
        return columns;
    }
    let per_region = count / regions.len();
    let extra = count % regions.len();
    for (index, region) in regions.iter().enumerate() {
        let n = per_region + usize::from(index < extra);
        if n == 0 {
            continue;
        }
        let gaps = i32::try_from(n + 1).unwrap_or(i32::MAX);
        let n = i32::try_from(n).unwrap_or(i32::MAX);
        let width = (region.width - hspacing.saturating_mul(gaps)) / n;
        let mut x = region.x + hspacing;
        for _ in 0..n {
            columns.push(Column::new(columns.len(), x, width, *region));
            x += width + hspacing;
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_split_a_single_region_evenly() {
        let columns = layout_columns(&[BBox::new(0, 0, 1000, 600)], 3, 10);
        let xs: Vec<(i32, i32)> = columns.iter().map(|c| (c.x, c.width)).collect();
        assert_eq!(xs, vec![(10, 320), (340, 320), (670, 320)]);
        assert!(columns.iter().all(|c| c.max_height == 600));
        assert_eq!(columns[2].id, 2);
    }

    #[test]
    fn columns_are_spread_over_regions() {
        let regions = [BBox::new(0, 0, 800, 600), BBox::new(800, 0, 400, 300)];
        let columns = layout_columns(&regions, 3, 0);
        assert_eq!(columns.len(), 3);
        assert_eq!((columns[0].x, columns[0].width), (0, 400));
        assert_eq!((columns[1].x, columns[1].width), (400, 400));
        assert_eq!((columns[2].x, columns[2].width), (800, 400));
        assert_eq!(columns[2].max_height, 300);
    }

    #[test]
    fn column_owns_the_gap_to_its_right() {
        let column = Column::new(0, 10, 100, BBox::new(0, 0, 200, 100));
        assert!(column.contains_x(10, 5));
        assert!(column.contains_x(114, 5));
        assert!(!column.contains_x(115, 5));
        assert!(!column.contains_x(9, 5));
    }
}
