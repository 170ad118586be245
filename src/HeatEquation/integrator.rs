//! # Forward-Euler Integrator
//!
//! Fixed-step explicit integration of `dy/dt = f(t, y)` from `t0` to `t_final`:
//!
//! ```text
//! y_{k+1} = y_k + Δt·f(t_k, y_k)
//! ```
//!
//! The last step is shortened so that the run ends exactly at `t_final`. Every
//! `output_every`-th state is recorded; the initial and the final state are always kept.
//!
//! No stability check is enforced here. For the diffusion operator the explicit scheme is
//! stable only for `Δt < 0.5·Δx²/α`; `integrate_model` logs a warning when that bound is
//! exceeded and integrates anyway.
use super::discretization::Grid;
use super::dynamics::{HeatDynamics, HeatModel};
use super::heat_error::HeatError;
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Largest number of steps a single run may take
pub const MAX_STEPS: usize = 1_000_000_000;
/// Recorded states reserved up front; longer records grow on demand
const PREALLOCATED_RECORDS: usize = 1 << 16;

fn default_output_every() -> usize {
    1
}

/// Time span, step and recording stride
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    pub t0: f64,
    pub t_final: f64,
    pub dt: f64,
    /// Record every n-th step
    #[serde(default = "default_output_every")]
    pub output_every: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            t0: 0.0,
            t_final: 2000.0,
            dt: 1.0,
            output_every: 1,
        }
    }
}

impl SolverSettings {
    pub fn new(t0: f64, t_final: f64, dt: f64) -> Self {
        Self {
            t0,
            t_final,
            dt,
            output_every: 1,
        }
    }

    pub fn with_output_every(mut self, output_every: usize) -> Self {
        self.output_every = output_every;
        self
    }

    pub fn validate(&self) -> Result<(), HeatError> {
        if !self.t0.is_finite() || !self.t_final.is_finite() || self.t_final <= self.t0 {
            return Err(HeatError::InvalidConfiguration(format!(
                "time span must satisfy t_final > t0, got [{}, {}]",
                self.t0, self.t_final
            )));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(HeatError::InvalidConfiguration(format!(
                "time step must be positive, got {}",
                self.dt
            )));
        }
        if self.output_every == 0 {
            return Err(HeatError::InvalidConfiguration(
                "output_every must be at least 1".to_string(),
            ));
        }
        self.n_steps()?;
        Ok(())
    }

    /// Number of steps taken, the last one possibly shortened; at most `MAX_STEPS`
    pub fn n_steps(&self) -> Result<usize, HeatError> {
        let ratio = (self.t_final - self.t0) / self.dt;
        if !ratio.is_finite() || ratio > MAX_STEPS as f64 {
            return Err(HeatError::InvalidConfiguration(format!(
                "time span [{}, {}] with step {} needs {:e} steps, at most {} allowed",
                self.t0, self.t_final, self.dt, ratio, MAX_STEPS
            )));
        }
        // rounding noise in the ratio must not add a vanishing extra step
        Ok(((ratio - 1e-9).ceil() as usize).max(1))
    }
}

/// Recorded time instants and states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub t: Vec<f64>,
    pub states: Vec<DVector<f64>>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn final_time(&self) -> Option<f64> {
        self.t.last().copied()
    }

    pub fn final_state(&self) -> Option<&DVector<f64>> {
        self.states.last()
    }

    /// Index of the recorded instant closest to `t`
    pub fn index_at(&self, t: f64) -> Option<usize> {
        self.t
            .iter()
            .enumerate()
            .min_by(|a, b| (a.1 - t).abs().total_cmp(&(b.1 - t).abs()))
            .map(|(i, _)| i)
    }

    /// Temperatures θ[0..N] at the recorded instant closest to `t`
    pub fn profile_at(&self, t: f64, N: usize) -> Option<DVector<f64>> {
        let i = self.index_at(t)?;
        let state = &self.states[i];
        if state.len() < N {
            return None;
        }
        Some(state.rows(0, N).into_owned())
    }

    /// Time history of state entry `i`
    pub fn trace_at(&self, i: usize) -> Option<Vec<f64>> {
        self.states.iter().map(|s| s.get(i).copied()).collect()
    }

    /// Measured output θ[N-1] over time
    pub fn output(&self, N: usize) -> Option<Vec<f64>> {
        if N == 0 {
            return None;
        }
        self.trace_at(N - 1)
    }

    /// Rows: recorded instants, columns: state entries
    pub fn to_matrix(&self) -> DMatrix<f64> {
        let n_cols = self.states.first().map(|s| s.len()).unwrap_or(0);
        DMatrix::from_fn(self.states.len(), n_cols, |i, j| self.states[i][j])
    }

    /// Trapezoidal heat content of every recorded state
    pub fn total_heat(&self, grid: &Grid) -> Vec<f64> {
        self.states.iter().map(|s| grid.total_heat(s)).collect()
    }

    /// Largest |value| over all recorded states; NaN is reported as infinity
    pub fn max_abs(&self) -> f64 {
        self.states
            .iter()
            .flat_map(|s| s.iter())
            .fold(0.0_f64, |acc, v| {
                if v.is_finite() {
                    acc.max(v.abs())
                } else {
                    f64::INFINITY
                }
            })
    }
}

/// Integrate `rhs` with the explicit Euler scheme
pub fn forward_euler<F>(
    mut rhs: F,
    y0: &DVector<f64>,
    settings: &SolverSettings,
) -> Result<Trajectory, HeatError>
where
    F: FnMut(f64, &DVector<f64>) -> Result<DVector<f64>, HeatError>,
{
    settings.validate()?;
    let n_steps = settings.n_steps()?;
    let capacity = (n_steps / settings.output_every + 2).min(PREALLOCATED_RECORDS);
    let mut t_rec = Vec::with_capacity(capacity);
    let mut y_rec = Vec::with_capacity(capacity);

    let mut t = settings.t0;
    let mut y = y0.clone();
    t_rec.push(t);
    y_rec.push(y.clone());

    for k in 1..=n_steps {
        let h = if k == n_steps {
            settings.t_final - t
        } else {
            settings.dt
        };
        let dy = rhs(t, &y)?;
        if dy.len() != y.len() {
            return Err(HeatError::InvalidState(format!(
                "right-hand side returned {} entries for a state of {}",
                dy.len(),
                y.len()
            )));
        }
        y.axpy(h, &dy, 1.0);
        t = if k == n_steps {
            settings.t_final
        } else {
            settings.t0 + k as f64 * settings.dt
        };
        if k % settings.output_every == 0 || k == n_steps {
            t_rec.push(t);
            y_rec.push(y.clone());
        }
    }
    Ok(Trajectory {
        t: t_rec,
        states: y_rec,
    })
}

/// Integrate a heat model, warning when the step exceeds the diffusion stability bound
pub fn integrate_model(
    model: &HeatModel,
    y0: &DVector<f64>,
    settings: &SolverSettings,
    stability_limit: Option<f64>,
) -> Result<Trajectory, HeatError> {
    if y0.len() != model.state_dim() {
        return Err(HeatError::InvalidState(format!(
            "initial state has {} entries, model expects {}",
            y0.len(),
            model.state_dim()
        )));
    }
    if let Some(limit) = stability_limit {
        if settings.dt >= limit {
            warn!(
                "time step {:.4e} s is not below the explicit stability bound {:.4e} s, the solution may diverge",
                settings.dt, limit
            );
        }
    }
    let trajectory = forward_euler(|t, y| model.derivative(t, y), y0, settings)?;
    info!(
        "forward Euler finished: {} steps, {} states recorded",
        settings.n_steps()?,
        trajectory.len()
    );
    Ok(trajectory)
}
