//! Matrix traversal visitors.
//!
//! A [`MatrixVisitor`] only reads entries; a [`MatrixVisitorMut`] returns the
//! new value of every entry it visits. Types whose entries cannot be changed
//! individually (the decomposed matrix) reject changing visitors.

/// Order in which entries are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkOrder {
    /// Row after row, left to right.
    #[default]
    Row,
    /// Column after column, top to bottom.
    Column,
    /// Cache-friendly order for the storage layout (row-major here).
    Optimized,
}

/// Read-only visitor.
pub trait MatrixVisitor {
    /// Called once before the walk starts.
    fn start(
        &mut self,
        _rows: usize,
        _columns: usize,
        _start_row: usize,
        _end_row: usize,
        _start_column: usize,
        _end_column: usize,
    ) {
    }

    /// Visits one entry.
    fn visit(&mut self, row: usize, column: usize, value: f64);

    /// Called once at the end of the walk; its value is returned by the walk.
    fn end(&mut self) -> f64 {
        0.0
    }
}

/// Visitor that replaces every visited entry.
pub trait MatrixVisitorMut {
    /// Called once before the walk starts.
    fn start(
        &mut self,
        _rows: usize,
        _columns: usize,
        _start_row: usize,
        _end_row: usize,
        _start_column: usize,
        _end_column: usize,
    ) {
    }

    /// Visits one entry and returns its new value.
    fn visit(&mut self, row: usize, column: usize, value: f64) -> f64;

    /// Called once at the end of the walk; its value is returned by the walk.
    fn end(&mut self) -> f64 {
        0.0
    }
}

/// Inclusive bounds of a walk.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WalkBounds {
    pub start_row: usize,
    pub end_row: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl WalkBounds {
    pub(crate) fn full(rows: usize, cols: usize) -> Self {
        Self {
            start_row: 0,
            end_row: rows - 1,
            start_col: 0,
            end_col: cols - 1,
        }
    }
}

/// Calls `f(row, col)` for every position inside `bounds`, in `order`.
pub(crate) fn for_each_position(order: WalkOrder, bounds: WalkBounds, mut f: impl FnMut(usize, usize)) {
    match order {
        WalkOrder::Row | WalkOrder::Optimized => {
            for i in bounds.start_row..=bounds.end_row {
                for j in bounds.start_col..=bounds.end_col {
                    f(i, j);
                }
            }
        }
        WalkOrder::Column => {
            for j in bounds.start_col..=bounds.end_col {
                for i in bounds.start_row..=bounds.end_row {
                    f(i, j);
                }
            }
        }
    }
}
