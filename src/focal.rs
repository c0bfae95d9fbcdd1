use crate::error::Result;
use crate::mask::{MaskGeometry, MaskKind, WindowSize};
use crate::padded::PaddedRaster;
use crate::raster::Raster;
use crate::stats::Statistic;
use log::{debug, info, warn};
use ndarray::Array3;
use rayon::prelude::*;

/// Parameters for focal statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocalParams {
    /// Statistic to compute
    pub statistic: Statistic,
    /// Requested mask extent (even dimensions grow by one cell)
    pub window: WindowSize,
    /// Mask shape
    pub mask: MaskKind,
}

impl Default for FocalParams {
    fn default() -> Self {
        Self {
            statistic: Statistic::Mean,
            window: WindowSize::default(),
            mask: MaskKind::Rectangular,
        }
    }
}

impl FocalParams {
    /// Build parameters from user-facing names, e.g. `("median", (5, 3), "elliptical")`.
    pub fn from_names(statistic: &str, window: (usize, usize), mask: &str) -> Result<Self> {
        Ok(Self {
            statistic: statistic.parse()?,
            window: WindowSize::new(window.0, window.1)?,
            mask: mask.parse()?,
        })
    }
}

/// A focal filter with its statistic and mask geometry resolved up front.
#[derive(Debug, Clone)]
pub struct FocalFilter {
    statistic: Statistic,
    mask: MaskGeometry,
}

impl FocalFilter {
    pub fn new(statistic: Statistic, window: WindowSize, kind: MaskKind) -> Result<Self> {
        let mask = MaskGeometry::new(kind, window)?;
        Ok(Self { statistic, mask })
    }

    pub fn from_params(params: &FocalParams) -> Result<Self> {
        Self::new(params.statistic, params.window, params.mask)
    }

    pub fn statistic(&self) -> Statistic {
        self.statistic
    }

    pub fn mask(&self) -> &MaskGeometry {
        &self.mask
    }

    /// Compute the focal statistic for every pixel and channel of `raster`.
    ///
    /// The output has the same variant and shape as the input.
    pub fn apply(&self, raster: &Raster) -> Result<Raster> {
        let (rows, cols, channels) = raster.shape();
        let window = self.mask.window();

        info!(
            "Computing focal {} over {} mask {} ({} cells) on {}x{}x{} raster",
            self.statistic,
            self.mask.kind(),
            window,
            self.mask.cell_count(),
            rows,
            cols,
            channels
        );

        if window.height > rows || window.width > cols {
            warn!(
                "Window {} is larger than the {}x{} raster; every mask will include padding",
                window, rows, cols
            );
        }

        let padded = PaddedRaster::new(raster.channel_view(), self.mask.spacing())?;
        let data = self.filter_padded(&padded)?;
        raster.with_same_layout(data)
    }

    fn filter_padded(&self, padded: &PaddedRaster) -> Result<Array3<f64>> {
        let (rows, cols, channels) = padded.source_dim();
        let offsets = self.mask.offsets();
        let statistic = self.statistic;

        // Each worker refills its own sample buffer for every pixel and channel
        let row_values: Vec<Vec<f64>> = (0..rows)
            .into_par_iter()
            .map_init(
                || Vec::with_capacity(offsets.len()),
                |samples: &mut Vec<f64>, row| {
                    let mut values = Vec::with_capacity(cols * channels);
                    for col in 0..cols {
                        let window = padded.window(row, col);
                        for channel in 0..channels {
                            samples.clear();
                            samples.extend(
                                offsets.iter().map(|&(dr, dc)| window[[dr, dc, channel]]),
                            );
                            values.push(statistic.reduce(samples));
                        }
                    }
                    values
                },
            )
            .collect();

        debug!("Filtered {} rows", row_values.len());

        let flat_data: Vec<f64> = row_values.into_iter().flatten().collect();
        Ok(Array3::from_shape_vec((rows, cols, channels), flat_data)?)
    }
}

/// Compute focal statistics on a raster
pub fn focal_statistics(raster: &Raster, params: &FocalParams) -> Result<Raster> {
    FocalFilter::from_params(params)?.apply(raster)
}
