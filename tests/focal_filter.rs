use focal_stats::{
    focal_statistics, FocalFilter, FocalParams, MaskKind, Raster, Statistic, WindowSize,
};
use ndarray::{Array2, Array3, Axis};

fn params(statistic: Statistic, height: usize, width: usize, mask: MaskKind) -> FocalParams {
    FocalParams {
        statistic,
        window: WindowSize::new(height, width).unwrap(),
        mask,
    }
}

fn ramp(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(r, c)| (r * cols + c) as f64)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_mean_3x3_on_5x5_ramp() {
    let raster = Raster::Single(ramp(5, 5));
    let out = focal_statistics(&raster, &params(Statistic::Mean, 3, 3, MaskKind::Rectangular)).unwrap();
    let Raster::Single(out) = out else {
        panic!("expected a single-channel raster");
    };

    // Interior: mean of 6,7,8,11,12,13,16,17,18
    assert_close(out[[2, 2]], 12.0);
    // Corner: 0,1,5,6
    assert_close(out[[0, 0]], 3.0);
    // Top edge: 1,2,3,6,7,8
    assert_close(out[[0, 2]], 4.5);
    // Bottom-right corner: 18,19,23,24
    assert_close(out[[4, 4]], 21.0);
    // Left edge: 5,6,10,11,15,16
    assert_close(out[[2, 0]], 10.5);
}

#[test]
fn test_shape_preserved() {
    let single = Raster::Single(ramp(6, 9));
    let multi = Raster::Multi(Array3::from_shape_fn((4, 7, 3), |(r, c, k)| (r + c * k) as f64));

    for stat in Statistic::ALL {
        for mask in [MaskKind::Rectangular, MaskKind::Elliptical] {
            for (h, w) in [(1, 1), (2, 5), (4, 4), (7, 3)] {
                let p = params(stat, h, w, mask);
                let out = focal_statistics(&single, &p).unwrap();
                assert!(!out.is_multi());
                assert_eq!(out.shape(), single.shape());

                let out = focal_statistics(&multi, &p).unwrap();
                assert!(out.is_multi());
                assert_eq!(out.shape(), multi.shape());
            }
        }
    }
}

#[test]
fn test_channel_independence() {
    let mut data = Array3::from_shape_fn((6, 5, 3), |(r, c, k)| ((r * 7 + c * 3) % 11) as f64 * (k + 1) as f64);
    data[[2, 2, 1]] = f64::NAN;
    data[[0, 4, 2]] = f64::NAN;
    let multi = Raster::Multi(data.clone());

    for stat in Statistic::ALL {
        for mask in [MaskKind::Rectangular, MaskKind::Elliptical] {
            let filter = FocalFilter::from_params(&params(stat, 5, 4, mask)).unwrap();
            let together = filter.apply(&multi).unwrap();

            for k in 0..3 {
                let alone = filter
                    .apply(&Raster::Single(data.index_axis(Axis(2), k).to_owned()))
                    .unwrap();
                let Raster::Single(alone) = alone else {
                    panic!("expected a single-channel raster");
                };
                for (a, b) in together.band(k).iter().zip(alone.iter()) {
                    assert!(
                        a == b || (a.is_nan() && b.is_nan()),
                        "{} {} channel {}: {} != {}",
                        stat,
                        mask,
                        k,
                        a,
                        b
                    );
                }
            }
        }
    }
}

#[test]
fn test_constant_raster() {
    let v = 7.0;
    let raster = Raster::Single(Array2::from_elem((6, 8), v));

    for mask in [MaskKind::Rectangular, MaskKind::Elliptical] {
        for (h, w) in [(1, 1), (3, 3), (4, 2), (9, 5), (15, 15)] {
            for stat in Statistic::ALL {
                let out = focal_statistics(&raster, &params(stat, h, w, mask)).unwrap();
                let expected = match stat {
                    Statistic::Std | Statistic::Var => 0.0,
                    _ => v,
                };
                for &value in out.band(0).iter() {
                    assert_close(value, expected);
                }
            }
        }
    }
}

#[test]
fn test_elliptical_excludes_corners() {
    // 7x7 elliptical mask drops the four corner cells of its box
    let mut data = Array2::zeros((7, 7));
    data[[0, 0]] = 100.0;
    data[[6, 6]] = 100.0;
    data[[0, 3]] = 1.0;
    let raster = Raster::Single(data);

    let ellipse = focal_statistics(&raster, &params(Statistic::Max, 7, 7, MaskKind::Elliptical)).unwrap();
    let rect = focal_statistics(&raster, &params(Statistic::Max, 7, 7, MaskKind::Rectangular)).unwrap();

    assert_eq!(ellipse.band(0)[[3, 3]], 1.0);
    assert_eq!(rect.band(0)[[3, 3]], 100.0);
}

#[test]
fn test_median_and_var_over_rectangle() {
    let raster = Raster::Single(ramp(3, 3));
    let median = focal_statistics(&raster, &params(Statistic::Median, 3, 3, MaskKind::Rectangular)).unwrap();
    let var = focal_statistics(&raster, &params(Statistic::Var, 3, 3, MaskKind::Rectangular)).unwrap();
    let std = focal_statistics(&raster, &params(Statistic::Std, 3, 3, MaskKind::Rectangular)).unwrap();

    assert_close(median.band(0)[[1, 1]], 4.0);
    // Corner (0,0): 0,1,3,4 → median 2
    assert_close(median.band(0)[[0, 0]], 2.0);
    // Population variance of 0..=8
    assert_close(var.band(0)[[1, 1]], 60.0 / 9.0);
    assert_close(std.band(0)[[1, 1]], (60.0f64 / 9.0).sqrt());
}

#[test]
fn test_invalid_configuration_rejected_up_front() {
    assert!(WindowSize::new(0, 1).is_err());
    assert!("avg".parse::<Statistic>().is_err());
    assert!(FocalParams::from_names("mean", (3, 3), "triangle").is_err());
}
