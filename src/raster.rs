use crate::error::{FocalStatsError, Result};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};

/// A single or multi-channel raster of `f64` samples. NaN marks missing data.
///
/// Multi-channel rasters are stored as `(rows, cols, channels)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    Single(Array2<f64>),
    Multi(Array3<f64>),
}

impl Raster {
    /// Stack same-sized bands into a raster. One band yields `Raster::Single`.
    pub fn from_bands(bands: Vec<Array2<f64>>) -> Result<Self> {
        let (rows, cols) = match bands.first() {
            Some(first) => first.dim(),
            None => return Err(FocalStatsError::NoBands),
        };

        for (band, data) in bands.iter().enumerate() {
            let (actual_rows, actual_cols) = data.dim();
            if (actual_rows, actual_cols) != (rows, cols) {
                return Err(FocalStatsError::ShapeMismatch {
                    band,
                    rows,
                    cols,
                    actual_rows,
                    actual_cols,
                });
            }
        }

        if bands.len() == 1 {
            return Ok(Raster::Single(bands.into_iter().next().ok_or(FocalStatsError::NoBands)?));
        }

        let views: Vec<ArrayView2<f64>> = bands.iter().map(|b| b.view()).collect();
        Ok(Raster::Multi(ndarray::stack(Axis(2), &views)?))
    }

    pub fn rows(&self) -> usize {
        self.shape().0
    }

    pub fn cols(&self) -> usize {
        self.shape().1
    }

    pub fn channels(&self) -> usize {
        self.shape().2
    }

    /// `(rows, cols, channels)`; single-channel rasters report one channel.
    pub fn shape(&self) -> (usize, usize, usize) {
        match self {
            Raster::Single(data) => {
                let (rows, cols) = data.dim();
                (rows, cols, 1)
            }
            Raster::Multi(data) => data.dim(),
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Raster::Multi(_))
    }

    /// View the raster with an explicit trailing channel axis.
    pub fn channel_view(&self) -> ArrayView3<'_, f64> {
        match self {
            Raster::Single(data) => data.view().insert_axis(Axis(2)),
            Raster::Multi(data) => data.view(),
        }
    }

    /// View of one channel.
    ///
    /// # Panics
    /// If `channel >= self.channels()`.
    pub fn band(&self, channel: usize) -> ArrayView2<'_, f64> {
        self.channel_view().index_axis_move(Axis(2), channel)
    }

    /// Rebuild a raster of the same variant as `self` from channel-last data.
    pub(crate) fn with_same_layout(&self, data: Array3<f64>) -> Result<Raster> {
        if self.is_multi() {
            return Ok(Raster::Multi(data));
        }
        let (rows, cols, _) = data.dim();
        Ok(Raster::Single(data.into_shape_with_order((rows, cols))?))
    }
}

impl From<Array2<f64>> for Raster {
    fn from(data: Array2<f64>) -> Self {
        Raster::Single(data)
    }
}

impl From<Array3<f64>> for Raster {
    fn from(data: Array3<f64>) -> Self {
        Raster::Multi(data)
    }
}
