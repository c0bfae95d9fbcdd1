use crate::error::{FocalStatsError, Result};
use crate::raster::Raster;
use gdal::raster::{Buffer, RasterBand};
use gdal::{Dataset, DriverManager};
use log::{debug, info};
use ndarray::Array2;

#[derive(Debug, Clone)]
pub struct RasterMetadata {
    pub width: usize,
    pub height: usize,
    pub band_count: usize,
    /// Passed through to the output untouched; `None` for plain images.
    pub geotransform: Option<[f64; 6]>,
    pub projection: String,
    pub nodata: Option<f64>,
}

/// Read every band of a raster as `f64`, turning nodata cells into NaN.
pub fn read_raster(path: &str, nodata_override: Option<f64>) -> Result<(Raster, RasterMetadata)> {
    info!("Opening input raster: {}", path);
    let dataset = Dataset::open(path)?;
    let metadata = extract_metadata(&dataset)?;
    let (width, height) = (metadata.width, metadata.height);

    let mut bands = Vec::with_capacity(metadata.band_count);
    for index in 1..=metadata.band_count {
        let rasterband: RasterBand = dataset.rasterband(index)?;
        let nodata = nodata_override.or_else(|| rasterband.no_data_value());

        let buffer = rasterband.read_as::<f64>((0, 0), (width, height), (width, height), None)?;
        let data_vec: Vec<f64> = buffer.into_iter().collect();
        let mut data = Array2::from_shape_vec((height, width), data_vec)?;

        if let Some(nd) = nodata {
            let masked = mask_nodata(&mut data, nd);
            debug!("Band {}: {} nodata cells ({}) set to NaN", index, masked, nd);
        }
        bands.push(data);
    }

    let raster = Raster::from_bands(bands)?;
    info!(
        "Read {}x{} raster with {} band(s)",
        width,
        height,
        raster.channels()
    );
    Ok((raster, metadata))
}

/// Extract metadata from a dataset without reading pixel data
pub fn extract_metadata(dataset: &Dataset) -> Result<RasterMetadata> {
    let band_count = dataset.raster_count();
    if band_count == 0 {
        return Err(FocalStatsError::NoBands);
    }

    let rasterband: RasterBand = dataset.rasterband(1)?;
    let width = rasterband.x_size();
    let height = rasterband.y_size();

    if width == 0 || height == 0 {
        return Err(FocalStatsError::InvalidDimensions(width, height));
    }

    // Plain images (PNG, JPEG) carry no geotransform
    let geotransform = dataset.geo_transform().ok();

    debug!("Raster dimensions: {}x{}, {} band(s)", width, height, band_count);

    Ok(RasterMetadata {
        width,
        height,
        band_count,
        geotransform,
        projection: dataset.projection(),
        nodata: rasterband.no_data_value(),
    })
}

/// Write a raster as a Float64 GeoTIFF, one band per channel, NaN as nodata.
pub fn write_raster(path: &str, raster: &Raster, metadata: &RasterMetadata) -> Result<()> {
    info!("Creating output raster: {}", path);
    let (rows, cols, channels) = raster.shape();

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut dataset = driver.create_with_band_type::<f64, _>(path, cols, rows, channels)?;

    if let Some(geotransform) = &metadata.geotransform {
        dataset.set_geo_transform(geotransform)?;
    }
    if !metadata.projection.is_empty() {
        dataset.set_projection(&metadata.projection)?;
    }

    for channel in 0..channels {
        let band_index = channel + 1;
        debug!("Writing band {}", band_index);

        // Logical iteration order is row-major, which is what GDAL expects
        let values: Vec<f64> = raster.band(channel).iter().copied().collect();
        let mut buffer = Buffer::new((cols, rows), values);

        let mut raster_band = dataset.rasterband(band_index)?;
        raster_band.write((0, 0), (cols, rows), &mut buffer)?;
        raster_band.set_no_data_value(Some(f64::NAN))?;
    }

    info!("Successfully wrote {} band(s) to output", channels);
    Ok(())
}

/// Replace every cell equal to `nodata` with NaN, returning how many changed.
pub fn mask_nodata(data: &mut Array2<f64>, nodata: f64) -> usize {
    let mut masked = 0;
    data.mapv_inplace(|v| {
        if v == nodata {
            masked += 1;
            f64::NAN
        } else {
            v
        }
    });
    masked
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_mask_nodata() {
        let mut data = arr2(&[[1.0, -9999.0], [-9999.0, 4.0]]);
        assert_eq!(mask_nodata(&mut data, -9999.0), 2);
        assert_eq!(data[[0, 0]], 1.0);
        assert!(data[[0, 1]].is_nan());
        assert!(data[[1, 0]].is_nan());
        assert_eq!(data[[1, 1]], 4.0);
    }

    #[test]
    fn test_mask_nodata_nan_is_noop() {
        let mut data = arr2(&[[1.0, f64::NAN]]);
        assert_eq!(mask_nodata(&mut data, f64::NAN), 0);
        assert_eq!(data[[0, 0]], 1.0);
    }
}
