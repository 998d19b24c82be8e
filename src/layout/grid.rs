use crate::foundation::{
    core::Rect,
    math::{EPSILON, is_usable_rect},
};

/// Below this many screen pixels per cell the grid is neither drawn nor snapped to.
pub const MIN_SNAP_CELL_PX: f64 = 3.0;

/// Pixel-aligned quantization of the canvas into square cells.
///
/// A grid is a pure function of `(bounds, cell_size)`; rebuild it whenever either changes.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Grid {
    bounds: Rect,
    cell_size: f64,
    rows: usize,
    columns: usize,
}

impl Grid {
    /// Build a grid over `bounds` with square cells of `cell_size` pixels.
    ///
    /// Non-positive cell size or a degenerate `bounds` yields a grid with zero rows and columns.
    pub fn rebuild(bounds: Rect, cell_size: f64) -> Self {
        let bounds = bounds.abs();
        if !(cell_size.is_finite() && cell_size > 0.0) || !is_usable_rect(bounds) {
            tracing::debug!(?bounds, cell_size, "degenerate grid");
            return Self {
                bounds,
                cell_size: 0.0,
                rows: 0,
                columns: 0,
            };
        }

        let count = |extent: f64| (extent / cell_size + EPSILON).floor() as usize;
        Self {
            bounds,
            cell_size,
            rows: count(bounds.height()),
            columns: count(bounds.width()),
        }
    }

    /// Bounding rectangle in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Cell edge length in pixels (0 for an empty grid).
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `true` when the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// `true` when cells are large enough on screen to draw and snap to.
    pub fn supports_snapping(&self) -> bool {
        !self.is_empty() && self.cell_size > MIN_SNAP_CELL_PX
    }

    /// Y coordinate of row line `i`.
    pub fn row_position(&self, i: usize) -> f64 {
        self.bounds.y0 + i as f64 * self.cell_size
    }

    /// X coordinate of column line `i`.
    pub fn column_position(&self, i: usize) -> f64 {
        self.bounds.x0 + i as f64 * self.cell_size
    }

    /// Row line positions, top to bottom.
    pub fn row_positions(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).map(|i| self.row_position(i))
    }

    /// Column line positions, left to right.
    pub fn column_positions(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.columns).map(|i| self.column_position(i))
    }

    /// X of the grid line nearest to `x`, clamped to the bounds.
    ///
    /// The right edge of the bounds counts as a line. An empty grid returns `x` unchanged.
    pub fn nearest_column(&self, x: f64) -> f64 {
        if self.is_empty() {
            return x;
        }
        snap_axis(x, self.bounds.x0, self.bounds.x1, self.cell_size)
    }

    /// Y of the grid line nearest to `y`, clamped to the bounds.
    ///
    /// The bottom edge of the bounds counts as a line. An empty grid returns `y` unchanged.
    pub fn nearest_row(&self, y: f64) -> f64 {
        if self.is_empty() {
            return y;
        }
        snap_axis(y, self.bounds.y0, self.bounds.y1, self.cell_size)
    }
}

fn snap_axis(v: f64, lo: f64, hi: f64, cell: f64) -> f64 {
    if !v.is_finite() {
        return lo;
    }
    let v = v.clamp(lo, hi);
    let k = ((v - lo) / cell).round();
    let lattice = (lo + k * cell).min(hi);
    if (hi - v).abs() < (lattice - v).abs() {
        hi
    } else {
        lattice
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
