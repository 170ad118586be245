//! Convective and radiative exchange of a boundary node with its surroundings.
//!
//! `φ_out(θ) = -h·(θ - θ_amb) - k·(θ⁴ - θ_amb⁴)`, `k = ε·σ`
//!
//! Positive φ_out heats the rod. No clamping of θ: the quartic term is evaluated for any
//! real θ, it is physically meaningful only for θ > 0 K.
use super::heat_error::HeatError;
use super::parameters::HeatParameters;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Net flux into the rod through a boundary at temperature `theta`
pub fn outward_flux(theta: f64, h: f64, k: f64, T_amb: f64) -> f64 {
    -h * (theta - T_amb) - k * (theta.powi(4) - T_amb.powi(4))
}

/// Boundary exchange constants taken from the parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryLoss {
    pub h: f64,
    /// ε·σ
    pub k: f64,
    pub T_amb: f64,
}

impl BoundaryLoss {
    pub fn new(h: f64, k: f64, T_amb: f64) -> Self {
        Self { h, k, T_amb }
    }

    pub fn from_parameters(params: &HeatParameters) -> Self {
        Self::new(params.h, params.k_rad(), params.T_amb)
    }

    pub fn flux(&self, theta: f64) -> f64 {
        outward_flux(theta, self.h, self.k, self.T_amb)
    }

    /// Vector shaped like `theta`, zero except at both ends where it holds φ_out of that node
    pub fn forcing_vector(&self, theta: &DVector<f64>) -> Result<DVector<f64>, HeatError> {
        let N = theta.len();
        if N < 2 {
            return Err(HeatError::InvalidState(format!(
                "boundary forcing needs two end nodes, state has {}",
                N
            )));
        }
        let mut phi = DVector::zeros(N);
        phi[0] = self.flux(theta[0]);
        phi[N - 1] = self.flux(theta[N - 1]);
        Ok(phi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeatEquation::parameters::SIGMA_SB;
    use approx::assert_relative_eq;

    #[test]
    fn test_flux_vanishes_at_ambient() {
        let loss = BoundaryLoss::new(10.0, 0.6 * SIGMA_SB, 298.0);
        assert_eq!(loss.flux(298.0), 0.0);
        assert!(loss.flux(1000.0) < 0.0);
        assert!(loss.flux(200.0) > 0.0);
    }

    #[test]
    fn test_flux_value() {
        let k = 0.6 * SIGMA_SB;
        let expected = -10.0 * 702.0 - k * (1000.0_f64.powi(4) - 298.0_f64.powi(4));
        assert_relative_eq!(
            outward_flux(1000.0, 10.0, k, 298.0),
            expected,
            max_relative = 1e-12
        );
        // radiation dominates convection at 1000 K
        assert!(expected < -30_000.0);
    }

    #[test]
    fn test_no_clamping_for_negative_temperature() {
        let loss = BoundaryLoss::new(0.0, 1.0, 0.0);
        // θ⁴ is even: a negative temperature loses heat like its mirror image
        assert_eq!(loss.flux(-2.0), -16.0);
    }

    #[test]
    fn test_forcing_vector_only_at_ends() {
        let loss = BoundaryLoss::new(5.0, 0.0, 300.0);
        let theta = DVector::from_vec(vec![310.0, 500.0, 500.0, 290.0]);
        let phi = loss.forcing_vector(&theta).unwrap();
        assert_eq!(phi.len(), 4);
        assert_eq!(phi[0], -50.0);
        assert_eq!(phi[1], 0.0);
        assert_eq!(phi[2], 0.0);
        assert_eq!(phi[3], 50.0);
    }

    #[test]
    fn test_forcing_vector_rejects_short_state() {
        let loss = BoundaryLoss::new(5.0, 0.0, 300.0);
        for len in [0, 1] {
            let theta = DVector::from_element(len, 310.0);
            assert!(matches!(
                loss.forcing_vector(&theta),
                Err(HeatError::InvalidState(_))
            ));
        }
    }
}
