use clap::Parser;
use env_logger::Env;
use log::info;

use focal_stats::cli::Args;
use focal_stats::{io, FocalFilter, Result};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("=== Focal Statistics ===");

    // Set thread pool size if specified
    if let Some(n_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build_global()?;
        info!("Using {} threads", n_threads);
    } else {
        info!("Using all available threads");
    }

    // Resolve the mask before touching any pixels
    let filter = FocalFilter::from_params(&args.focal_params())?;

    info!("Reading input raster: {}", args.input);
    let (raster, metadata) = io::read_raster(&args.input, args.nodata)?;

    if let Some(nd) = args.nodata.or(metadata.nodata) {
        info!("Using nodata value: {}", nd);
    } else {
        info!("No nodata value specified");
    }

    let filtered = filter.apply(&raster)?;

    info!("Writing output: {}", args.output);
    io::write_raster(&args.output, &filtered, &metadata)?;

    info!("=== Done! ===");
    Ok(())
}
