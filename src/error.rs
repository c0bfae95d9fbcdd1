use thiserror::Error;

#[derive(Error, Debug)]
pub enum FocalStatsError {
    #[cfg(feature = "gdal")]
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Array shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Band {band} has shape {actual_rows}x{actual_cols}, expected {rows}x{cols}")]
    ShapeMismatch {
        band: usize,
        rows: usize,
        cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    #[error("Input raster has invalid dimensions: {0}x{1}")]
    InvalidDimensions(usize, usize),

    #[error("Input raster has no bands")]
    NoBands,
}

impl FocalStatsError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        FocalStatsError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, FocalStatsError>;
