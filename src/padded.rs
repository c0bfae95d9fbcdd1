use crate::error::{FocalStatsError, Result};
use crate::mask::Spacing;
use log::debug;
use ndarray::{s, Array3, ArrayView3, Axis};

/// A raster surrounded by a NaN border as wide as the mask reach.
///
/// The source origin sits at `(spacing.vertical, spacing.horizontal)` in padded
/// coordinates, so the mask box of source pixel `(r, c)` starts at padded `(r, c)`.
#[derive(Debug, Clone)]
pub struct PaddedRaster {
    data: Array3<f64>,
    extent: (usize, usize),
    rows: usize,
    cols: usize,
}

impl PaddedRaster {
    pub fn new(source: ArrayView3<'_, f64>, spacing: Spacing) -> Result<Self> {
        let (rows, cols, channels) = source.dim();
        let (pad_v, pad_h) = (spacing.vertical, spacing.horizontal);
        let extent = spacing.extent()?;

        // The padded raster is the source plus one mask box less a cell per axis
        let padded_rows = rows.checked_add(extent.0 - 1);
        let padded_cols = cols.checked_add(extent.1 - 1);
        let (padded_rows, padded_cols) = match (padded_rows, padded_cols) {
            (Some(r), Some(c)) => (r, c),
            _ => {
                return Err(FocalStatsError::config(format!(
                    "padding a {}x{} raster by {}x{} overflows",
                    rows, cols, pad_v, pad_h
                )))
            }
        };
        let len = padded_rows
            .checked_mul(padded_cols)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| {
                FocalStatsError::config(format!(
                    "padded raster {}x{}x{} is too large",
                    padded_rows, padded_cols, channels
                ))
            })?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|e| {
            FocalStatsError::config(format!(
                "padded raster {}x{}x{} is too large: {}",
                padded_rows, padded_cols, channels, e
            ))
        })?;
        cells.resize(len, f64::NAN);

        let mut data = Array3::from_shape_vec((padded_rows, padded_cols, channels), cells)?;
        data.slice_mut(s![pad_v..pad_v + rows, pad_h..pad_h + cols, ..])
            .assign(&source);

        debug!(
            "Padded {}x{}x{} raster by {} rows and {} cols per side",
            rows, cols, channels, pad_v, pad_h
        );

        Ok(Self {
            data,
            extent,
            rows,
            cols,
        })
    }

    /// Rows, cols and channels of the unpadded source.
    pub fn source_dim(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.data.len_of(Axis(2)))
    }

    /// Mask box of source pixel `(row, col)`: `(2v + 1) x (2h + 1) x channels`.
    #[inline]
    pub fn window(&self, row: usize, col: usize) -> ArrayView3<'_, f64> {
        let (height, width) = self.extent;
        self.data.slice(s![row..row + height, col..col + width, ..])
    }
}
