use serde::Serialize;

/// A score paired with the number of individual ratings behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub score: f64,
    pub sample_size: u64,
}

impl Sample {
    pub fn new(score: f64, sample_size: impl Into<u64>) -> Self {
        Self {
            score,
            sample_size: sample_size.into(),
        }
    }
}

/// Count-weighted mean, unrounded. Zero when there is nothing to average.
pub fn weighted_average<I>(samples: I) -> f64
where
    I: IntoIterator<Item = Sample>,
{
    let (weighted_sum, total) = samples
        .into_iter()
        .fold((0.0, 0u64), |(sum, total), sample| {
            (
                sum + sample.score * sample.sample_size as f64,
                total + sample.sample_size,
            )
        });

    if total == 0 {
        0.0
    } else {
        weighted_sum / total as f64
    }
}

/// Total ratings behind a set of samples.
pub fn total_samples<I>(samples: I) -> u64
where
    I: IntoIterator<Item = Sample>,
{
    samples.into_iter().map(|sample| sample.sample_size).sum()
}

/// Rounds to two decimals; applied only where a score leaves a component.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
