//! Unscented transform weights and sigma-point recombination.
//!
//! The filter core proper (prediction/update recursion, Kalman gain) lives
//! outside this crate; what lives here is the measurement-space consumer
//! surface: Merwe scaled sigma weights and the weighted recombination of
//! sigma points into a predicted measurement mean and covariance.

use log::warn;
use nalgebra::{SMatrix, SVector};
use serde::{Deserialize, Serialize};

use crate::error::{FusionError, FusionResult};
use crate::measurement::MeasurementVector;

/// Merwe scaled unscented transform parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MerweConfig {
    /// Spread of sigma points around the mean (typically 1e-3)
    pub alpha: f64,
    /// Prior knowledge of the distribution (2.0 for Gaussian)
    pub beta: f64,
    /// Secondary scaling (0.0 or 3-n)
    pub kappa: f64,
}

impl Default for MerweConfig {
    fn default() -> Self {
        Self {
            alpha: 1e-3,
            beta: 2.0,
            kappa: 0.0,
        }
    }
}

/// Mean and covariance weight sets for `2n + 1` sigma points.
#[derive(Clone, Debug)]
pub struct SigmaWeights {
    lambda: f64,
    mean: Vec<f64>,
    covariance: Vec<f64>,
}

impl SigmaWeights {
    /// Computes the weight sets for a state of dimension `state_dim`.
    pub fn new(state_dim: usize, config: &MerweConfig) -> FusionResult<Self> {
        if config.alpha <= 0.0 {
            return Err(FusionError::InvalidSigmaSpread {
                alpha: config.alpha,
            });
        }

        let n = state_dim as f64;
        let lambda = config.alpha * config.alpha * (n + config.kappa) - n;
        let scale = n + lambda;
        if scale.abs() < 1e-12 {
            warn!(
                "sigma scaling collapsed for n = {} with alpha = {}, kappa = {}",
                state_dim, config.alpha, config.kappa
            );
            return Err(FusionError::DegenerateScaling);
        }

        let count = 2 * state_dim + 1;
        let mut mean = vec![1.0 / (2.0 * scale); count];
        let mut covariance = mean.clone();
        mean[0] = lambda / scale;
        covariance[0] =
            lambda / scale + (1.0 - config.alpha * config.alpha + config.beta);

        Ok(Self {
            lambda,
            mean,
            covariance,
        })
    }

    /// Number of sigma points these weights expect.
    pub fn count(&self) -> usize {
        self.mean.len()
    }

    /// Combined scaling parameter.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Mean weights, center point first.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Covariance weights, center point first.
    pub fn covariance(&self) -> &[f64] {
        &self.covariance
    }
}

/// Weighted sigma-point mean over any measurement vector flavor.
///
/// Purely positional: every field is combined elementwise, no field is
/// special-cased.
pub fn weighted_mean<V: MeasurementVector>(
    sigmas: &[V],
    weights: &SigmaWeights,
) -> FusionResult<V> {
    if sigmas.len() != weights.count() {
        return Err(FusionError::SigmaCountMismatch {
            expected: weights.count(),
            actual: sigmas.len(),
        });
    }

    let mut mean = V::zeros();
    for (sigma, w) in sigmas.iter().zip(weights.mean()) {
        mean += *sigma * *w;
    }
    Ok(mean)
}

/// Weighted sigma-point covariance over the flattened vector form.
///
/// Flavors participate through their whole-vector reading (`as_vector`).
pub fn weighted_covariance<const N: usize>(
    sigmas: &[SVector<f64, N>],
    mean: &SVector<f64, N>,
    weights: &SigmaWeights,
) -> FusionResult<SMatrix<f64, N, N>> {
    if sigmas.len() != weights.count() {
        return Err(FusionError::SigmaCountMismatch {
            expected: weights.count(),
            actual: sigmas.len(),
        });
    }

    let mut covariance = SMatrix::<f64, N, N>::zeros();
    for (sigma, w) in sigmas.iter().zip(weights.covariance()) {
        let residual = sigma - mean;
        covariance += residual * residual.transpose() * *w;
    }
    Ok(covariance)
}

/// Innovation between an observed and a predicted measurement, evaluated
/// through the flavor's residual semantics.
pub fn innovation<V: MeasurementVector>(observed: &V, predicted: &V) -> V {
    observed.residual(predicted)
}
