//! Closed-form eigenfunction series for the rod with initial profile θ0(x) = m·(L·x - x²).
//!
//! ```text
//! Dirichlet (θ = 0 at both ends):
//!   θ(x,t) = Σ b_n·sin(nπx/L)·exp(-α(nπ/L)²t),   b_n = 8mL²/(nπ)³ for odd n, 0 for even n
//!
//! zero-Neumann (insulated ends):
//!   θ(x,t) = mL²/6 + Σ a_n·cos(nπx/L)·exp(-α(nπ/L)²t),   a_n = -4mL²/(nπ)² for even n, 0 for odd n
//! ```
//!
//! `order` is the number of modes n = 1..=order kept in the sum.
use super::discretization::{BoundaryKind, Grid};
use super::heat_error::HeatError;
use nalgebra::DVector;
use std::f64::consts::PI;

fn decay(n: usize, t: f64, L: f64, alpha: f64) -> f64 {
    let k = n as f64 * PI / L;
    (-alpha * k * k * t).exp()
}

pub fn dirichlet_series(x: f64, t: f64, L: f64, alpha: f64, m: f64, order: usize) -> f64 {
    (1..=order)
        .filter(|n| n % 2 == 1)
        .map(|n| {
            let npi = n as f64 * PI;
            let b_n = 8.0 * m * L * L / npi.powi(3);
            b_n * (npi * x / L).sin() * decay(n, t, L, alpha)
        })
        .sum()
}

pub fn neumann_series(x: f64, t: f64, L: f64, alpha: f64, m: f64, order: usize) -> f64 {
    let mean = m * L * L / 6.0;
    let modes: f64 = (1..=order)
        .filter(|n| n % 2 == 0)
        .map(|n| {
            let npi = n as f64 * PI;
            let a_n = -4.0 * m * L * L / npi.powi(2);
            a_n * (npi * x / L).cos() * decay(n, t, L, alpha)
        })
        .sum();
    mean + modes
}

/// Series solution sampled on every grid node
pub fn series_profile(
    kind: BoundaryKind,
    grid: &Grid,
    t: f64,
    alpha: f64,
    m: f64,
    order: usize,
) -> Result<DVector<f64>, HeatError> {
    let L = grid.length();
    let series: fn(f64, f64, f64, f64, f64, usize) -> f64 = match kind {
        BoundaryKind::Dirichlet => dirichlet_series,
        BoundaryKind::ZeroNeumann => neumann_series,
        other => {
            return Err(HeatError::InvalidConfiguration(format!(
                "no closed-form series for {:?} boundaries",
                other
            )));
        }
    };
    if order == 0 {
        return Err(HeatError::InvalidConfiguration(
            "series order must be at least 1".to_string(),
        ));
    }
    Ok(grid.points().map(|x| series(x, t, L, alpha, m, order)))
}
