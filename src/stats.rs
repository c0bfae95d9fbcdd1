use crate::error::{FocalStatsError, Result};
use ndarray::{Array, ArrayBase, Axis, Data, RemoveAxis};
use std::fmt;
use std::str::FromStr;

/// Available focal statistics
///
/// Every reducer skips missing (NaN) samples. A window whose samples are all
/// missing reduces to NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Arithmetic mean
    Mean,
    /// Maximum value
    Max,
    /// Minimum value
    Min,
    /// Median value (mean of the two middle values for even counts)
    Median,
    /// Standard deviation (population)
    Std,
    /// Variance (population)
    Var,
}

impl Statistic {
    pub const ALL: [Statistic; 6] = [
        Statistic::Mean,
        Statistic::Max,
        Statistic::Min,
        Statistic::Median,
        Statistic::Std,
        Statistic::Var,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Max => "max",
            Statistic::Min => "min",
            Statistic::Median => "median",
            Statistic::Std => "std",
            Statistic::Var => "var",
        }
    }

    /// Reduce `samples` to a single value, ignoring NaN entries.
    ///
    /// The slice is used as scratch space: its order is not preserved.
    pub fn reduce(self, samples: &mut [f64]) -> f64 {
        let len = partition_valid(samples);
        if len == 0 {
            return f64::NAN;
        }
        let valid = &mut samples[..len];

        match self {
            Statistic::Mean => mean(valid),
            Statistic::Max => valid.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Statistic::Min => valid.iter().copied().fold(f64::INFINITY, f64::min),
            Statistic::Median => median(valid),
            Statistic::Var => variance(valid),
            Statistic::Std => variance(valid).sqrt(),
        }
    }

    /// Reduce a stack of samples along `axis`, e.g. a `(rows, cols, n)` stack
    /// of mask samples along `Axis(2)`.
    pub fn reduce_axis<S, D>(self, samples: &ArrayBase<S, D>, axis: Axis) -> Array<f64, D::Smaller>
    where
        S: Data<Elem = f64>,
        D: RemoveAxis,
    {
        let mut scratch = Vec::with_capacity(samples.len_of(axis));
        samples.map_axis(axis, |lane| {
            scratch.clear();
            scratch.extend(lane.iter().copied());
            self.reduce(&mut scratch)
        })
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statistic {
    type Err = FocalStatsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Statistic::ALL
            .into_iter()
            .find(|stat| stat.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                FocalStatsError::config(format!(
                    "unknown statistic '{}' (expected one of mean, max, min, median, std, var)",
                    s
                ))
            })
    }
}

/// Move every non-NaN sample to the front of the slice and return how many there are.
fn partition_valid(samples: &mut [f64]) -> usize {
    let mut len = 0;
    for i in 0..samples.len() {
        if !samples[i].is_nan() {
            samples.swap(len, i);
            len += 1;
        }
    }
    len
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

fn median(values: &mut [f64]) -> f64 {
    let n = values.len();
    let mid = n / 2;
    let (lower, upper, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;

    if n % 2 == 1 {
        upper
    } else {
        let lower_max = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (lower_max + upper) / 2.0
    }
}
