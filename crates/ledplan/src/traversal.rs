//! Cabinet visiting orders over a `columns × rows` grid.

use serde::{Deserialize, Serialize};

/// 1-based index of a cabinet in a traversal order.
pub type CabinetId = u32;

/// Size of the wall in cabinets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

impl GridSize {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    pub fn cabinet_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

/// A cabinet and the grid cell it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cabinet {
    pub id: CabinetId,
    pub column: u32,
    pub row: u32,
}

/// Which way a row is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDirection {
    LeftToRight,
    RightToLeft,
}

/// Direction the serpentine walks `row`: even rows left→right, odd rows back.
pub fn serpentine_direction(row: u32) -> RowDirection {
    if row % 2 == 0 {
        RowDirection::LeftToRight
    } else {
        RowDirection::RightToLeft
    }
}

/// Boustrophedon order used for data cabling. Consecutive cabinets are always
/// physically adjacent.
pub fn serpentine(grid: GridSize) -> Vec<Cabinet> {
    walk(grid, serpentine_direction)
}

/// Plain row-major order used for power cabling.
pub fn row_major(grid: GridSize) -> Vec<Cabinet> {
    walk(grid, |_| RowDirection::LeftToRight)
}

fn walk(grid: GridSize, direction: impl Fn(u32) -> RowDirection) -> Vec<Cabinet> {
    let mut order = Vec::with_capacity(grid.cabinet_count());
    if grid.is_empty() {
        return order;
    }
    for row in 0..grid.rows {
        for step in 0..grid.columns {
            let column = match direction(row) {
                RowDirection::LeftToRight => step,
                RowDirection::RightToLeft => grid.columns - 1 - step,
            };
            order.push(Cabinet {
                id: order.len() as CabinetId + 1,
                column,
                row,
            });
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(order: &[Cabinet]) -> Vec<(u32, u32)> {
        order.iter().map(|c| (c.column, c.row)).collect()
    }

    #[test]
    fn serpentine_alternates_rows() {
        let order = serpentine(GridSize::new(3, 3));
        assert_eq!(
            cells(&order),
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (2, 1),
                (1, 1),
                (0, 1),
                (0, 2),
                (1, 2),
                (2, 2)
            ]
        );
        let ids: Vec<CabinetId> = order.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn serpentine_neighbours_are_adjacent() {
        let order = serpentine(GridSize::new(7, 5));
        for pair in order.windows(2) {
            let dc = pair[0].column.abs_diff(pair[1].column);
            let dr = pair[0].row.abs_diff(pair[1].row);
            assert_eq!(dc + dr, 1, "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn row_major_ignores_parity() {
        let order = row_major(GridSize::new(2, 2));
        assert_eq!(cells(&order), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn degenerate_grids_are_empty() {
        assert!(serpentine(GridSize::new(0, 4)).is_empty());
        assert!(serpentine(GridSize::new(4, 0)).is_empty());
        assert!(row_major(GridSize::new(0, 0)).is_empty());
    }

    #[test]
    fn single_cabinet() {
        let order = serpentine(GridSize::new(1, 1));
        assert_eq!(
            order,
            vec![Cabinet {
                id: 1,
                column: 0,
                row: 0
            }]
        );
    }
}
