//! Round-trip error metrics.
//!
//! Compares an original grid against its reconstruction. Absolute and
//! relative errors are aggregated as root-mean-square (`mean_*`) and
//! root-median-square (`median_*`). Relative errors only count entries whose
//! original magnitude exceeds a threshold; when none do, the relative figures
//! are `0.0` and [`ErrorReport::relative_defined`] is `false`.

use alloc::vec::Vec;
use core::fmt;

use crate::num::{Complex, Float};

/// Magnitude below which an entry is left out of the relative error.
pub const DEFAULT_RELATIVE_THRESHOLD: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsError {
    Empty,
    ShapeMismatch { original: usize, reconstructed: usize },
    /// Relative-error threshold is negative or NaN.
    InvalidThreshold,
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("nothing to compare"),
            Self::InvalidThreshold => {
                f.write_str("relative-error threshold must be a non-negative number")
            }
            Self::ShapeMismatch {
                original,
                reconstructed,
            } => write!(
                f,
                "original has {} entries but reconstruction has {}",
                original, reconstructed
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MetricsError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorReport {
    pub mean_abs: f64,
    pub median_abs: f64,
    pub max_abs: f64,
    pub mean_rel: f64,
    pub median_rel: f64,
    /// Entries that passed the relative-error threshold.
    pub relative_count: usize,
    pub total: usize,
}

impl ErrorReport {
    /// Whether any entry contributed to the relative error.
    pub fn relative_defined(&self) -> bool {
        self.relative_count > 0
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean absolute error: {:e}", self.mean_abs)?;
        writeln!(f, "Median absolute error: {:e}", self.median_abs)?;
        writeln!(f, "Max absolute error: {:e}", self.max_abs)?;
        if self.relative_defined() {
            writeln!(
                f,
                "Mean relative error: {:e} (over {} of {} entries)",
                self.mean_rel, self.relative_count, self.total
            )?;
            write!(f, "Median relative error: {:e}", self.median_rel)
        } else {
            write!(f, "Relative error: undefined (no entry above threshold)")
        }
    }
}

/// Compare real samples entry by entry.
pub fn compare_real<T: Float>(
    original: &[T],
    reconstructed: &[T],
    threshold: f64,
) -> Result<ErrorReport, MetricsError> {
    check_inputs(original.len(), reconstructed.len(), threshold)?;
    let pairs = original
        .iter()
        .zip(reconstructed)
        .map(|(&a, &b)| (libm::fabs(a.to_f64() - b.to_f64()), libm::fabs(a.to_f64())));
    Ok(aggregate(pairs, threshold))
}

/// Compare complex samples by the magnitude of their difference.
pub fn compare_complex<T: Float>(
    original: &[Complex<T>],
    reconstructed: &[Complex<T>],
    threshold: f64,
) -> Result<ErrorReport, MetricsError> {
    check_inputs(original.len(), reconstructed.len(), threshold)?;
    let pairs = original.iter().zip(reconstructed).map(|(&a, &b)| {
        let d = a - b;
        (magnitude(d.re.to_f64(), d.im.to_f64()), magnitude(a.re.to_f64(), a.im.to_f64()))
    });
    Ok(aggregate(pairs, threshold))
}

fn magnitude(re: f64, im: f64) -> f64 {
    libm::sqrt(re * re + im * im)
}

fn check_inputs(original: usize, reconstructed: usize, threshold: f64) -> Result<(), MetricsError> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(MetricsError::InvalidThreshold);
    }
    if original != reconstructed {
        return Err(MetricsError::ShapeMismatch {
            original,
            reconstructed,
        });
    }
    if original == 0 {
        return Err(MetricsError::Empty);
    }
    Ok(())
}

/// `pairs` yields `(|error|, |original|)` per entry.
fn aggregate(pairs: impl Iterator<Item = (f64, f64)>, threshold: f64) -> ErrorReport {
    let mut abs_sq = Vec::new();
    let mut rel_sq = Vec::new();
    let mut max_abs = 0.0f64;
    for (err, mag) in pairs {
        abs_sq.push(err * err);
        if err > max_abs || err.is_nan() {
            max_abs = err;
        }
        if mag > threshold {
            let rel = err / mag;
            rel_sq.push(rel * rel);
        }
    }
    let total = abs_sq.len();
    let relative_count = rel_sq.len();
    ErrorReport {
        mean_abs: libm::sqrt(mean(&abs_sq)),
        median_abs: libm::sqrt(median(&mut abs_sq)),
        max_abs,
        mean_rel: libm::sqrt(mean(&rel_sq)),
        median_rel: libm::sqrt(median(&mut rel_sq)),
        relative_count,
        total,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; averages the two middle values for even counts, `0.0` when empty.
fn median(values: &mut [f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sort_unstable_by(f64::total_cmp);
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}
