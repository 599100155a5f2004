// src/metrics.rs
//! Linear min/max normalization of metric populations.

use crate::error::{ModgraphError, Result};

/// Maps samples from their observed `[min, max]` onto a target range.
///
/// Build one per population (internal import counts, external import
/// counts, line counts); populations have different ranges and must not be
/// mixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricNormalizer {
    min: f64,
    max: f64,
    new_min: f64,
    new_max: f64,
}

impl MetricNormalizer {
    /// # Errors
    /// Returns `InvalidInput` for an empty population, a non-finite sample or
    /// a non-finite target bound.
    pub fn new<I>(samples: I, new_min: f64, new_max: f64) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        if !new_min.is_finite() || !new_max.is_finite() {
            return Err(ModgraphError::InvalidInput(format!(
                "target range [{new_min}, {new_max}] is not finite"
            )));
        }

        let mut bounds: Option<(f64, f64)> = None;
        for sample in samples {
            if !sample.is_finite() {
                return Err(ModgraphError::InvalidInput(format!(
                    "cannot normalize non-finite sample {sample}"
                )));
            }
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(sample), hi.max(sample)),
                None => (sample, sample),
            });
        }

        let (min, max) = bounds.ok_or_else(|| {
            ModgraphError::InvalidInput("cannot normalize an empty population".to_string())
        })?;
        Ok(Self {
            min,
            max,
            new_min,
            new_max,
        })
    }

    /// Convenience for integer populations such as counts.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an empty population.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts<I>(counts: I, new_min: f64, new_max: f64) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        Self::new(counts.into_iter().map(|c| c as f64), new_min, new_max)
    }

    /// `new_min + (value - min) * (new_max - new_min) / (max - min)`.
    ///
    /// A degenerate population (`max == min`) maps everything to the midpoint
    /// of the target range. Values outside the observed range extrapolate.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return self.midpoint();
        }
        self.new_min + (value - self.min) * (self.new_max - self.new_min) / (self.max - self.min)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn normalize_count(&self, value: usize) -> f64 {
        self.normalize(value as f64)
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.new_min + self.new_max) / 2.0
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }
}
