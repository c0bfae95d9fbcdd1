use crate::focal::FocalParams;
use crate::mask::{MaskKind, WindowSize};
use crate::stats::Statistic;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "focal-stats")]
#[command(about = "Compute focal (moving window) statistics over a raster")]
#[command(version)]
pub struct Args {
    /// Input raster path (any GDAL-readable format, one or more bands)
    #[arg(short, long, value_name = "FILE")]
    pub input: String,

    /// Output GeoTIFF path (float64, one band per input band)
    #[arg(short, long, value_name = "FILE")]
    pub output: String,

    /// Statistic to compute: mean, max, min, median, std or var
    #[arg(short, long, value_name = "STAT", default_value = "mean")]
    pub stat: Statistic,

    /// Window size as N, HxW or H,W (even dimensions grow by one cell)
    #[arg(long, value_name = "SIZE", default_value = "3x3")]
    pub size: WindowSize,

    /// Mask shape: rectangular (square) or elliptical (circular)
    #[arg(short, long, value_name = "KIND", default_value = "rectangular")]
    pub mask: MaskKind,

    /// Override nodata value (default: read from input)
    #[arg(long, value_name = "VALUE")]
    pub nodata: Option<f64>,

    /// Number of threads (default: all available)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn focal_params(&self) -> FocalParams {
        FocalParams {
            statistic: self.stat,
            window: self.size,
            mask: self.mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["focal-stats", "-i", "in.tif", "-o", "out.tif"]).unwrap();
        assert_eq!(args.focal_params(), FocalParams::default());
        assert_eq!(args.nodata, None);
        assert!(!args.verbose);
    }

    #[test]
    fn test_full_options() {
        let args = Args::try_parse_from([
            "focal-stats",
            "--input",
            "in.png",
            "--output",
            "out.tif",
            "--stat",
            "median",
            "--size",
            "5x3",
            "--mask",
            "circular",
            "--nodata",
            "-9999",
            "--threads",
            "4",
        ])
        .unwrap();

        let params = args.focal_params();
        assert_eq!(params.statistic, Statistic::Median);
        assert_eq!(params.window, WindowSize::new(5, 3).unwrap());
        assert_eq!(params.mask, MaskKind::Elliptical);
        assert_eq!(args.nodata, Some(-9999.0));
        assert_eq!(args.threads, Some(4));
    }

    #[test]
    fn test_rejects_bad_values() {
        let base = ["focal-stats", "-i", "a", "-o", "b"];
        let with = |extra: &[&'static str]| {
            let mut argv = base.to_vec();
            argv.extend_from_slice(extra);
            Args::try_parse_from(argv)
        };

        assert!(with(&["--stat", "mode"]).is_err());
        assert!(with(&["--size", "0x3"]).is_err());
        assert!(with(&["--mask", "hexagon"]).is_err());
    }
}
