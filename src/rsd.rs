//! Robust Soliton Distribution: the degree probability mass function that
//! drives both the encoder's degree sampler and (informatively) the
//! decoder's expected overhead.

use crate::config::{DEFAULT_RSD_C, DEFAULT_RSD_DELTA};

/// A probability mass function over degrees `1..=k`, stored 0-indexed:
/// `pmf()[d - 1]` is the probability of degree `d`.
#[derive(Debug, Clone, PartialEq)]
pub struct RobustSoliton {
    k: usize,
    mu: Vec<f64>,
}

impl RobustSoliton {
    /// Builds the RSD for `k` input symbols with the published defaults
    /// (`c = 0.1`, `delta = 0.5`).
    pub fn new(k: usize) -> Self {
        Self::with_params(k, DEFAULT_RSD_C, DEFAULT_RSD_DELTA)
    }

    /// Builds the RSD for `k` input symbols with explicit `c` and `delta`.
    ///
    /// `c` must be > 0 and `delta` must lie in `(0, 1)`; `k` must be >= 1.
    /// Degenerate `k == 1` always yields `mu == [1.0]`.
    pub fn with_params(k: usize, c: f64, delta: f64) -> Self {
        assert!(k >= 1, "RSD requires k >= 1");
        assert!(c > 0.0, "RSD requires c > 0");
        assert!(delta > 0.0 && delta < 1.0, "RSD requires 0 < delta < 1");

        if k == 1 {
            return RobustSoliton {
                k,
                mu: vec![1.0],
            };
        }

        let k_f = k as f64;
        let r = c * (k_f / delta).ln() * k_f.sqrt();
        let m = ((k_f / r).floor() as usize).clamp(1, k);

        let mut rho = vec![0.0f64; k];
        rho[0] = 1.0 / k_f;
        for d in 2..=k {
            rho[d - 1] = 1.0 / (d as f64 * (d as f64 - 1.0));
        }

        let mut tau = vec![0.0f64; k];
        for d in 1..m {
            tau[d - 1] = r / (d as f64 * k_f);
        }
        if m >= 1 && m <= k {
            tau[m - 1] = r * (r / delta).ln() / k_f;
        }

        let combined: Vec<f64> = rho.iter().zip(tau.iter()).map(|(a, b)| a + b).collect();
        let z: f64 = combined.iter().sum();
        let mu: Vec<f64> = combined.iter().map(|v| v / z).collect();

        RobustSoliton { k, mu }
    }

    /// Number of input symbols this distribution is over.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The probability mass function, 0-indexed by `degree - 1`.
    pub fn pmf(&self) -> &[f64] {
        &self.mu
    }
}
