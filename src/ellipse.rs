use crate::error::{FocalStatsError, Result};
use log::debug;

/// An axis-aligned ellipse in (row, col) grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center_row: f64,
    pub center_col: f64,
    pub radius_row: f64,
    pub radius_col: f64,
}

impl Ellipse {
    pub fn new(center: (f64, f64), radii: (f64, f64)) -> Result<Self> {
        let (center_row, center_col) = center;
        let (radius_row, radius_col) = radii;

        if !center_row.is_finite() || !center_col.is_finite() {
            return Err(FocalStatsError::config(format!(
                "ellipse center must be finite, got ({}, {})",
                center_row, center_col
            )));
        }
        if !(radius_row > 0.0 && radius_row.is_finite() && radius_col > 0.0 && radius_col.is_finite()) {
            return Err(FocalStatsError::config(format!(
                "ellipse radii must be positive, got ({}, {})",
                radius_row, radius_col
            )));
        }

        Ok(Self {
            center_row,
            center_col,
            radius_row,
            radius_col,
        })
    }

    /// Integer bounding box `(row_min, row_max, col_min, col_max)`, inclusive.
    pub fn bounds(&self) -> (i64, i64, i64, i64) {
        (
            (self.center_row - self.radius_row).ceil() as i64,
            (self.center_row + self.radius_row).floor() as i64,
            (self.center_col - self.radius_col).ceil() as i64,
            (self.center_col + self.radius_col).floor() as i64,
        )
    }

    /// Whether the cell at (row, col) lies strictly inside the ellipse.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        let dr = (row as f64 - self.center_row) / self.radius_row;
        let dc = (col as f64 - self.center_col) / self.radius_col;
        dr * dr + dc * dc < 1.0
    }

    /// Number of cells in the bounding box, if it fits in `usize`.
    pub fn box_cells(&self) -> Option<usize> {
        let (row_min, row_max, col_min, col_max) = self.bounds();
        let span = |min: i64, max: i64| max.checked_sub(min)?.checked_add(1).map(|n| n.max(0));
        let cells = span(row_min, row_max)?.checked_mul(span(col_min, col_max)?)?;
        usize::try_from(cells).ok()
    }

    /// All grid cells inside the ellipse, in row-major order.
    pub fn cells(&self) -> Result<Vec<(i64, i64)>> {
        let box_cells = self.box_cells().ok_or_else(|| {
            FocalStatsError::config(format!(
                "ellipse radii ({}, {}) are too large",
                self.radius_row, self.radius_col
            ))
        })?;

        let (row_min, row_max, col_min, col_max) = self.bounds();
        let mut cells = Vec::new();
        cells.try_reserve_exact(box_cells).map_err(|e| {
            FocalStatsError::config(format!("ellipse box of {} cells is too large: {}", box_cells, e))
        })?;

        for row in row_min..=row_max {
            for col in col_min..=col_max {
                if self.contains(row, col) {
                    cells.push((row, col));
                }
            }
        }

        debug!(
            "Rasterized ellipse center=({}, {}) radii=({}, {}) into {} cells",
            self.center_row,
            self.center_col,
            self.radius_row,
            self.radius_col,
            cells.len()
        );
        Ok(cells)
    }
}

/// Rasterize the ellipse with the given center and semi-axis radii.
pub fn rasterize_ellipse(center: (f64, f64), radii: (f64, f64)) -> Result<Vec<(i64, i64)>> {
    Ellipse::new(center, radii)?.cells()
}
