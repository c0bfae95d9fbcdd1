// Library exports for testing and reuse

pub mod cli;
pub mod ellipse;
pub mod error;
pub mod focal;
#[cfg(feature = "gdal")]
pub mod io;
pub mod mask;
pub mod padded;
pub mod raster;
pub mod stats;

// Re-export commonly used types
pub use ellipse::{rasterize_ellipse, Ellipse};
pub use error::{FocalStatsError, Result};
pub use focal::{focal_statistics, FocalFilter, FocalParams};
#[cfg(feature = "gdal")]
pub use io::{read_raster, write_raster, RasterMetadata};
pub use mask::{parity_cell_count, MaskGeometry, MaskKind, Spacing, WindowSize};
pub use padded::PaddedRaster;
pub use raster::Raster;
pub use stats::Statistic;
