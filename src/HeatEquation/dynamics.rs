//! # Dynamics Evaluator
//!
//! Right-hand sides of the semi-discretized heat equation for every regime. Each model is
//! assembled once from the discretization and the parameter set and afterwards is a pure
//! function `(t, state) -> dstate/dt`.
//!
//! ## Models
//!
//! - **`FreeDiffusion`**: `dθ = (α/Δx²)·M·θ` (Dirichlet or zero-Neumann operator)
//! - **`RadiativeBoundary`**: `dθ = (α/Δx²)·M·θ + (2α/Δx)·Φ_out(θ)`
//! - **`ProportionalControl`**: `dθ = A·θ + B·u + E·w`, `u = Kp·(y_ref - θ[N-1])`
//! - **`PiControl`**: `dz = Acl·z + Bcl·y_ref + Ecl·w(z[N-1])`, `z = [θ; ε]`
//!
//! with `A = (α/Δx²)·M`, `B = 2α·b/(λ·Δx)·e₀`, `E = 2α/(λ·Δx)·e_{N-1}`,
//! `C = e_{N-1}ᵀ` and `w = φ_out(θ[N-1])`.
//!
//! ## Closed loop with integral action
//!
//! ```text
//! Acl = [ A - Kp·B·C    Ki·B ]     Bcl = [ Kp·B ]     Ecl = [ E ]
//!       [    -C          0   ]           [  1   ]           [ 0 ]
//! ```
//!
//! All models share the `HeatDynamics` trait and are dispatched through `HeatModel`
//! with `enum_dispatch`.
use super::boundary_flux::BoundaryLoss;
use super::discretization::{BoundaryKind, Discretization, DiffusionOperator};
use super::heat_error::HeatError;
use super::parameters::{ControllerConfig, HeatParameters, HeatRegime};
use enum_dispatch::enum_dispatch;
use log::debug;
use nalgebra::{DMatrix, DVector, RowDVector};

/// State derivative of a semi-discretized heat model
#[enum_dispatch]
pub trait HeatDynamics {
    /// Length of the state vector the model expects
    fn state_dim(&self) -> usize;
    /// dstate/dt at time `t`
    fn derivative(&self, t: f64, state: &DVector<f64>) -> Result<DVector<f64>, HeatError>;
}

fn check_state(state: &DVector<f64>, expected: usize) -> Result<(), HeatError> {
    if state.len() != expected {
        return Err(HeatError::InvalidState(format!(
            "state has {} entries, model expects {}",
            state.len(),
            expected
        )));
    }
    Ok(())
}

/// Diffusion without boundary forcing
#[derive(Debug, Clone)]
pub struct FreeDiffusion {
    operator: DiffusionOperator,
    /// α/Δx²
    coeff: f64,
}

impl FreeDiffusion {
    pub fn new(disc: &Discretization, params: &HeatParameters) -> Result<Self, HeatError> {
        match disc.operator.kind() {
            BoundaryKind::Dirichlet | BoundaryKind::ZeroNeumann => {}
            kind => {
                return Err(HeatError::InvalidConfiguration(format!(
                    "free diffusion needs a Dirichlet or zero-Neumann operator, got {:?}",
                    kind
                )));
            }
        }
        Ok(Self {
            operator: disc.operator.clone(),
            coeff: params.alpha() / disc.grid.dx().powi(2),
        })
    }
}

impl HeatDynamics for FreeDiffusion {
    fn state_dim(&self) -> usize {
        self.operator.dim()
    }

    fn derivative(&self, _t: f64, state: &DVector<f64>) -> Result<DVector<f64>, HeatError> {
        check_state(state, self.state_dim())?;
        Ok(self.operator.apply(state) * self.coeff)
    }
}

/// Convective and radiative loss at both ends, no control
#[derive(Debug, Clone)]
pub struct RadiativeBoundary {
    operator: DiffusionOperator,
    /// α/Δx²
    coeff: f64,
    /// 2α/Δx
    flux_coeff: f64,
    loss: BoundaryLoss,
}

impl RadiativeBoundary {
    pub fn new(disc: &Discretization, params: &HeatParameters) -> Result<Self, HeatError> {
        if disc.operator.kind() != BoundaryKind::Robin {
            return Err(HeatError::InvalidConfiguration(format!(
                "radiative boundary needs a Robin operator, got {:?}",
                disc.operator.kind()
            )));
        }
        let dx = disc.grid.dx();
        let alpha = params.alpha();
        Ok(Self {
            operator: disc.operator.clone(),
            coeff: alpha / dx.powi(2),
            flux_coeff: 2.0 * alpha / dx,
            loss: BoundaryLoss::from_parameters(params),
        })
    }
}

impl HeatDynamics for RadiativeBoundary {
    fn state_dim(&self) -> usize {
        self.operator.dim()
    }

    fn derivative(&self, _t: f64, state: &DVector<f64>) -> Result<DVector<f64>, HeatError> {
        let n = self.state_dim();
        check_state(state, n)?;
        let phi = self.loss.forcing_vector(state)?;
        Ok(self.operator.apply(state) * self.coeff + phi * self.flux_coeff)
    }
}

/// Open-loop state-space matrices of the actuated rod: dθ = A·θ + B·u + E·w, y = C·θ
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace {
    pub A: DMatrix<f64>,
    pub B: DVector<f64>,
    pub E: DVector<f64>,
    pub C: RowDVector<f64>,
}

impl StateSpace {
    pub fn new(
        disc: &Discretization,
        params: &HeatParameters,
        controller: &ControllerConfig,
    ) -> Result<Self, HeatError> {
        if disc.operator.kind() != BoundaryKind::RobinActuated {
            return Err(HeatError::InvalidConfiguration(format!(
                "controlled rod needs an actuated Robin operator, got {:?}",
                disc.operator.kind()
            )));
        }
        let n = disc.operator.dim();
        let dx = disc.grid.dx();
        let alpha = params.alpha();
        let gain = 2.0 * alpha / (params.Lambda * dx);

        let A = disc.operator.to_dense() * (alpha / dx.powi(2));
        let mut B = DVector::zeros(n);
        B[0] = gain * controller.b;
        let mut E = DVector::zeros(n);
        E[n - 1] = gain;
        let mut C = RowDVector::zeros(n);
        C[n - 1] = 1.0;
        Ok(Self { A, B, E, C })
    }

    pub fn dim(&self) -> usize {
        self.B.len()
    }
}

/// Proportional controller acting at x = 0, measuring θ(L)
#[derive(Debug, Clone)]
pub struct ProportionalControl {
    ss: StateSpace,
    Kp: f64,
    y_ref: f64,
    loss: BoundaryLoss,
}

impl ProportionalControl {
    pub fn new(
        disc: &Discretization,
        params: &HeatParameters,
        controller: &ControllerConfig,
    ) -> Result<Self, HeatError> {
        controller.validate()?;
        let ss = StateSpace::new(disc, params, controller)?;
        Ok(Self {
            ss,
            Kp: controller.Kp,
            y_ref: controller.y_ref,
            loss: BoundaryLoss::from_parameters(params),
        })
    }

    pub fn state_space(&self) -> &StateSpace {
        &self.ss
    }

    /// e(t) = y_ref - θ[N-1]
    pub fn error(&self, state: &DVector<f64>) -> Result<f64, HeatError> {
        let n = self.ss.dim();
        check_state(state, n)?;
        Ok(self.y_ref - state[n - 1])
    }

    /// u(t) = Kp·e(t)
    pub fn control_input(&self, state: &DVector<f64>) -> Result<f64, HeatError> {
        Ok(self.Kp * self.error(state)?)
    }
}

impl HeatDynamics for ProportionalControl {
    fn state_dim(&self) -> usize {
        self.ss.dim()
    }

    fn derivative(&self, _t: f64, state: &DVector<f64>) -> Result<DVector<f64>, HeatError> {
        let n = self.state_dim();
        let u = self.control_input(state)?;
        let w = self.loss.flux(state[n - 1]);
        Ok(&self.ss.A * state + &self.ss.B * u + &self.ss.E * w)
    }
}

/// Closed-loop matrices of the PI-controlled rod, state z = [θ; ε]
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedLoop {
    pub Acl: DMatrix<f64>,
    pub Bcl: DVector<f64>,
    pub Ecl: DVector<f64>,
}

impl ClosedLoop {
    pub fn assemble(ss: &StateSpace, Kp: f64, Ki: f64) -> Self {
        let n = ss.dim();
        let feedback = &ss.A - (&ss.B * &ss.C) * Kp;

        let mut Acl = DMatrix::zeros(n + 1, n + 1);
        for i in 0..n {
            for j in 0..n {
                Acl[(i, j)] = feedback[(i, j)];
            }
            Acl[(i, n)] = Ki * ss.B[i];
            Acl[(n, i)] = -ss.C[i];
        }

        let mut Bcl = DVector::zeros(n + 1);
        let mut Ecl = DVector::zeros(n + 1);
        for i in 0..n {
            Bcl[i] = Kp * ss.B[i];
            Ecl[i] = ss.E[i];
        }
        Bcl[n] = 1.0;
        Self { Acl, Bcl, Ecl }
    }

    pub fn dim(&self) -> usize {
        self.Bcl.len()
    }
}

/// Proportional-integral controller acting at x = 0, measuring θ(L)
#[derive(Debug, Clone)]
pub struct PiControl {
    closed_loop: ClosedLoop,
    Kp: f64,
    Ki: f64,
    y_ref: f64,
    loss: BoundaryLoss,
}

impl PiControl {
    pub fn new(
        disc: &Discretization,
        params: &HeatParameters,
        controller: &ControllerConfig,
    ) -> Result<Self, HeatError> {
        controller.validate()?;
        let ss = StateSpace::new(disc, params, controller)?;
        let closed_loop = ClosedLoop::assemble(&ss, controller.Kp, controller.Ki);
        debug!(
            "PI closed loop assembled: {}x{}",
            closed_loop.Acl.nrows(),
            closed_loop.Acl.ncols()
        );
        Ok(Self {
            closed_loop,
            Kp: controller.Kp,
            Ki: controller.Ki,
            y_ref: controller.y_ref,
            loss: BoundaryLoss::from_parameters(params),
        })
    }

    pub fn closed_loop(&self) -> &ClosedLoop {
        &self.closed_loop
    }

    /// e(t) = y_ref - θ[N-1], state z = [θ; ε]
    pub fn error(&self, state: &DVector<f64>) -> Result<f64, HeatError> {
        let n_aug = self.closed_loop.dim();
        check_state(state, n_aug)?;
        Ok(self.y_ref - state[n_aug - 2])
    }

    /// u(t) = Kp·e(t) + Ki·ε(t)
    pub fn control_input(&self, state: &DVector<f64>) -> Result<f64, HeatError> {
        let e = self.error(state)?;
        Ok(self.Kp * e + self.Ki * state[self.closed_loop.dim() - 1])
    }
}

impl HeatDynamics for PiControl {
    fn state_dim(&self) -> usize {
        self.closed_loop.dim()
    }

    fn derivative(&self, _t: f64, state: &DVector<f64>) -> Result<DVector<f64>, HeatError> {
        let n_aug = self.state_dim();
        check_state(state, n_aug)?;
        let w = self.loss.flux(state[n_aug - 2]);
        let cl = &self.closed_loop;
        Ok(&cl.Acl * state + &cl.Bcl * self.y_ref + &cl.Ecl * w)
    }
}

/// Any of the heat models
#[enum_dispatch(HeatDynamics)]
#[derive(Debug, Clone)]
pub enum HeatModel {
    FreeDiffusion,
    RadiativeBoundary,
    ProportionalControl,
    PiControl,
}

impl HeatModel {
    /// Build the evaluator of `regime` on an already built discretization
    pub fn from_regime(
        regime: HeatRegime,
        disc: &Discretization,
        params: &HeatParameters,
        controller: Option<&ControllerConfig>,
    ) -> Result<Self, HeatError> {
        if disc.operator.kind() != regime.boundary_kind() {
            return Err(HeatError::InvalidConfiguration(format!(
                "operator built for {:?}, regime {} needs {:?}",
                disc.operator.kind(),
                regime,
                regime.boundary_kind()
            )));
        }
        let require_controller = || {
            controller.ok_or_else(|| {
                HeatError::MissingData(format!("regime {} needs a controller", regime))
            })
        };
        let model = match regime {
            HeatRegime::Dirichlet | HeatRegime::ZeroNeumann => {
                HeatModel::from(FreeDiffusion::new(disc, params)?)
            }
            HeatRegime::Radiative => HeatModel::from(RadiativeBoundary::new(disc, params)?),
            HeatRegime::Proportional => {
                HeatModel::from(ProportionalControl::new(disc, params, require_controller()?)?)
            }
            HeatRegime::ProportionalIntegral => {
                HeatModel::from(PiControl::new(disc, params, require_controller()?)?)
            }
        };
        Ok(model)
    }
}
