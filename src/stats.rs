//! Fork stability statistics
//!
//! - Coefficient of variation (CV) of each fork's samples, in percent
//! - Relative performance deviation (RPD) between adjacent forks
//!
//! Standard deviation is the population form (divisor `n`), matching the
//! plots produced by earlier tooling.

use crate::error::{ForkstatError, Result};
use crate::measurements::ForkSeries;
use serde::Serialize;

/// CV of a single fork
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForkCv {
    pub fork: usize,
    /// Percentage; 0 also covers the degenerate zero-mean case
    pub percent: f64,
}

/// RPD between fork `pair` and fork `pair + 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForkPairRpd {
    pub pair: usize,
    pub ratio: f64,
}

/// Per-benchmark statistics derived from a [`ForkSeries`]
///
/// CV is defined for every non-empty fork. RPD can still be undefined (a
/// zero-mean denominator fork); that only affects the RPD series.
#[derive(Debug, Clone, PartialEq)]
pub struct StatSeries {
    pub cv_per_fork: Vec<ForkCv>,
    rpd_per_fork_pair: std::result::Result<Vec<ForkPairRpd>, String>,
}

impl StatSeries {
    /// Compute CV for every fork and RPD for every adjacent pair
    ///
    /// Fails with [`ForkstatError::Domain`] when there are no forks or when a
    /// fork has no samples. A zero RPD denominator is kept as an undefined
    /// RPD series, surfaced by [`StatSeries::rpd_per_fork_pair`].
    pub fn compute(series: &ForkSeries) -> Result<Self> {
        if series.is_empty() {
            return Err(ForkstatError::Domain(
                "benchmark has no forks".to_string(),
            ));
        }

        let cv_per_fork = series
            .forks()
            .iter()
            .enumerate()
            .map(|(fork, samples)| {
                coefficient_of_variation(samples)
                    .map(|percent| ForkCv { fork, percent })
                    .map_err(|e| in_context(e, format!("fork {}", fork)))
            })
            .collect::<Result<Vec<_>>>()?;

        let rpd_per_fork_pair = series
            .forks()
            .windows(2)
            .enumerate()
            .map(|(pair, w)| {
                relative_performance_deviation(&w[0], &w[1])
                    .map(|ratio| ForkPairRpd { pair, ratio })
                    .map_err(|e| in_context(e, format!("forks {} and {}", pair, pair + 1)))
            })
            .collect::<Result<Vec<_>>>()
            .map_err(domain_reason);

        Ok(Self {
            cv_per_fork,
            rpd_per_fork_pair,
        })
    }

    pub fn cv_values(&self) -> Vec<f64> {
        self.cv_per_fork.iter().map(|c| c.percent).collect()
    }

    /// RPD for every adjacent pair, or [`ForkstatError::Domain`] if any pair is undefined
    pub fn rpd_per_fork_pair(&self) -> Result<&[ForkPairRpd]> {
        self.rpd_per_fork_pair
            .as_deref()
            .map_err(|reason| ForkstatError::Domain(reason.clone()))
    }

    pub fn rpd_values(&self) -> Result<Vec<f64>> {
        Ok(self.rpd_per_fork_pair()?.iter().map(|r| r.ratio).collect())
    }

    pub fn rpd_is_defined(&self) -> bool {
        self.rpd_per_fork_pair.is_ok()
    }
}

fn domain_reason(err: ForkstatError) -> String {
    match err {
        ForkstatError::Domain(msg) => msg,
        other => other.to_string(),
    }
}

fn in_context(err: ForkstatError, context: String) -> ForkstatError {
    match err {
        ForkstatError::Domain(msg) => ForkstatError::Domain(format!("{}: {}", context, msg)),
        other => other,
    }
}

/// Arithmetic mean; undefined for an empty slice
pub fn mean(samples: &[f64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(ForkstatError::Domain(
            "mean of an empty sample set".to_string(),
        ));
    }
    let n = samples.len() as f64;
    let sum = samples.iter().sum::<f64>();
    let m = if sum.is_finite() {
        sum / n
    } else {
        // sum overflowed; divide first
        samples.iter().map(|x| x / n).sum::<f64>()
    };
    if !m.is_finite() {
        return Err(ForkstatError::Domain(
            "mean of non-finite samples".to_string(),
        ));
    }
    Ok(m)
}

/// Population standard deviation (divisor `n`)
pub fn population_stddev(samples: &[f64]) -> Result<f64> {
    let m = mean(samples)?;
    let n = samples.len() as f64;
    let variance = samples.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n;
    if variance.is_finite() {
        return Ok(variance.sqrt());
    }

    // Squared deviations overflowed: rescale by the largest deviation
    let scale = samples.iter().fold(0.0_f64, |acc, x| acc.max((x - m).abs()));
    if !scale.is_finite() {
        return Err(ForkstatError::Domain(
            "sample spread exceeds f64 range".to_string(),
        ));
    }
    let scaled = samples
        .iter()
        .map(|x| ((x - m) / scale).powi(2))
        .sum::<f64>()
        / n;
    Ok(scale * scaled.sqrt())
}

/// `100 * stddev / mean`, saturating to 0 when the mean is exactly zero
///
/// A result of 0 is ambiguous: either the samples have no spread or they
/// are all zero.
pub fn coefficient_of_variation(samples: &[f64]) -> Result<f64> {
    let m = mean(samples)?;
    if m == 0.0 {
        return Ok(0.0);
    }
    let std = population_stddev(samples)?;
    Ok(100.0 * (std / m))
}

/// `|mean(a) - mean(b)| / mean(a)`
///
/// Not commutative: the first fork's mean is always the denominator.
pub fn relative_performance_deviation(fork_a: &[f64], fork_b: &[f64]) -> Result<f64> {
    let mean_a = mean(fork_a)?;
    let mean_b = mean(fork_b)?;
    if mean_a == 0.0 {
        return Err(ForkstatError::Domain(
            "RPD denominator (mean of first fork) is zero".to_string(),
        ));
    }
    Ok((mean_a - mean_b).abs() / mean_a)
}
