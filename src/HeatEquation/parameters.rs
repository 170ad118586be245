//! # Problem Parameters
//!
//! Immutable records describing one simulation run:
//!
//! - **`HeatParameters`**: material constants, boundary-transfer constants and grid size
//! - **`ControllerConfig`**: gains, actuation gain and set-point of the boundary controller
//! - **`HeatRegime`**: which boundary regime / control law is simulated
//! - **`InitialProfile`**: initial temperature distribution
//!
//! PAY ATTENTION TO THE UNITS: temperatures are absolute (K) because the radiative
//! term is quartic in θ.
use super::discretization::{BoundaryKind, Grid};
use super::heat_error::HeatError;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stefan–Boltzmann constant W/(m²·K⁴)
pub const SIGMA_SB: f64 = 5.670374419e-8;

fn default_sigma() -> f64 {
    SIGMA_SB
}

/// Physical, boundary-transfer and discretization constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatParameters {
    /// Thermal conductivity (W/m·K)
    pub Lambda: f64,
    /// Specific heat capacity (J/kg·K)
    pub c: f64,
    /// Density (kg/m³)
    pub ro: f64,
    /// Heat transfer coefficient (W/m²·K)
    pub h: f64,
    /// Emissivity (0–1)
    pub emissivity: f64,
    /// Stefan–Boltzmann constant (W/m²·K⁴)
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    /// Ambient temperature (K)
    pub T_amb: f64,
    /// Rod length (m)
    pub L: f64,
    /// Number of grid points
    pub N: usize,
}

impl Default for HeatParameters {
    /// Steel rod, 10 cm, losing heat to a 298 K environment
    fn default() -> Self {
        Self {
            Lambda: 50.0,
            c: 500.0,
            ro: 7800.0,
            h: 10.0,
            emissivity: 0.6,
            sigma: SIGMA_SB,
            T_amb: 298.0,
            L: 0.1,
            N: 11,
        }
    }
}

impl HeatParameters {
    pub fn new(Lambda: f64, c: f64, ro: f64, L: f64, N: usize) -> Self {
        Self {
            Lambda,
            c,
            ro,
            L,
            N,
            ..Self::default()
        }
    }

    /// Set heat transfer coefficient, emissivity and ambient temperature
    pub fn with_boundary_transfer(mut self, h: f64, emissivity: f64, T_amb: f64) -> Self {
        self.h = h;
        self.emissivity = emissivity;
        self.T_amb = T_amb;
        self
    }

    /// Diffusivity α = λ/(c·ρ)
    pub fn alpha(&self) -> f64 {
        self.Lambda / (self.c * self.ro)
    }

    /// Grid spacing Δx = L/(N-1)
    pub fn dx(&self) -> f64 {
        self.L / (self.N as f64 - 1.0)
    }

    /// Radiative constant k = ε·σ
    pub fn k_rad(&self) -> f64 {
        self.emissivity * self.sigma
    }

    /// Largest forward-Euler step that keeps the diffusion term stable: 0.5·Δx²/α
    pub fn stability_limit(&self) -> f64 {
        0.5 * self.dx().powi(2) / self.alpha()
    }

    pub fn validate(&self) -> Result<(), HeatError> {
        if self.N < 3 {
            return Err(HeatError::InvalidConfiguration(format!(
                "N must be at least 3, got {}",
                self.N
            )));
        }
        let positive = [
            ("L", self.L),
            ("Lambda", self.Lambda),
            ("c", self.c),
            ("ro", self.ro),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(HeatError::InvalidConfiguration(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        let non_negative = [
            ("h", self.h),
            ("emissivity", self.emissivity),
            ("sigma", self.sigma),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(HeatError::InvalidConfiguration(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        if !self.T_amb.is_finite() {
            return Err(HeatError::InvalidConfiguration(
                "T_amb must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Boundary controller: gains, actuation gain and reference temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Proportional gain (W/m²·K)
    pub Kp: f64,
    /// Integral gain (W/m²·K·s), unused by the proportional controller
    #[serde(default)]
    pub Ki: f64,
    /// Actuation gain: the flux injected at x = 0 is b·u
    pub b: f64,
    /// Reference temperature for θ(L) (K)
    pub y_ref: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            Kp: 1000.0,
            Ki: 0.1,
            b: 1.0,
            y_ref: 400.0,
        }
    }
}

impl ControllerConfig {
    pub fn proportional(Kp: f64, b: f64, y_ref: f64) -> Self {
        Self {
            Kp,
            Ki: 0.0,
            b,
            y_ref,
        }
    }

    pub fn proportional_integral(Kp: f64, Ki: f64, b: f64, y_ref: f64) -> Self {
        Self { Kp, Ki, b, y_ref }
    }

    pub fn validate(&self) -> Result<(), HeatError> {
        for (name, value) in [
            ("Kp", self.Kp),
            ("Ki", self.Ki),
            ("b", self.b),
            ("y_ref", self.y_ref),
        ] {
            if !value.is_finite() {
                return Err(HeatError::InvalidConfiguration(format!(
                    "controller parameter {} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Boundary regime / control law of the simulated rod
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatRegime {
    /// Boundary nodes held at their initial values
    Dirichlet,
    /// Insulated ends
    ZeroNeumann,
    /// Convective and radiative loss at both ends
    Radiative,
    /// Actuation at x = 0 by a proportional controller, loss at x = L
    Proportional,
    /// Actuation at x = 0 by a proportional-integral controller, loss at x = L
    ProportionalIntegral,
}

impl HeatRegime {
    /// Boundary kind the diffusion operator is built with
    pub fn boundary_kind(&self) -> BoundaryKind {
        match self {
            HeatRegime::Dirichlet => BoundaryKind::Dirichlet,
            HeatRegime::ZeroNeumann => BoundaryKind::ZeroNeumann,
            HeatRegime::Radiative => BoundaryKind::Robin,
            HeatRegime::Proportional | HeatRegime::ProportionalIntegral => {
                BoundaryKind::RobinActuated
            }
        }
    }

    pub fn needs_controller(&self) -> bool {
        matches!(
            self,
            HeatRegime::Proportional | HeatRegime::ProportionalIntegral
        )
    }

    /// Extra state entries appended to the N temperatures
    pub fn augmented_states(&self) -> usize {
        match self {
            HeatRegime::ProportionalIntegral => 1,
            _ => 0,
        }
    }

    pub fn all() -> [HeatRegime; 5] {
        [
            HeatRegime::Dirichlet,
            HeatRegime::ZeroNeumann,
            HeatRegime::Radiative,
            HeatRegime::Proportional,
            HeatRegime::ProportionalIntegral,
        ]
    }
}

impl fmt::Display for HeatRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeatRegime::Dirichlet => "Dirichlet",
            HeatRegime::ZeroNeumann => "zero-Neumann",
            HeatRegime::Radiative => "radiative Robin",
            HeatRegime::Proportional => "P control",
            HeatRegime::ProportionalIntegral => "PI control",
        };
        write!(f, "{}", name)
    }
}

/// Initial temperature distribution θ0(x)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InitialProfile {
    /// θ0(x) = value
    Uniform(f64),
    /// θ0(x) = m·(L·x - x²)
    Parabolic { m: f64 },
    /// One value per grid point
    Custom(Vec<f64>),
}

impl Default for InitialProfile {
    fn default() -> Self {
        InitialProfile::Uniform(300.0)
    }
}

impl InitialProfile {
    /// Sample the profile on the grid
    pub fn generate(&self, grid: &Grid) -> Result<DVector<f64>, HeatError> {
        let L = grid.length();
        let profile = match self {
            InitialProfile::Uniform(value) => DVector::from_element(grid.len(), *value),
            InitialProfile::Parabolic { m } => grid.points().map(|x| m * (L * x - x * x)),
            InitialProfile::Custom(values) => {
                if values.len() != grid.len() {
                    return Err(HeatError::InvalidConfiguration(format!(
                        "custom initial profile has {} values, grid has {} points",
                        values.len(),
                        grid.len()
                    )));
                }
                DVector::from_vec(values.clone())
            }
        };
        if profile.iter().any(|v| !v.is_finite()) {
            return Err(HeatError::InvalidConfiguration(
                "initial profile contains non-finite values".to_string(),
            ));
        }
        Ok(profile)
    }

    /// Initial state of the simulated system: temperatures plus `extra` zeros
    /// (integrated tracking error of the PI loop starts at zero)
    pub fn initial_state(&self, grid: &Grid, extra: usize) -> Result<DVector<f64>, HeatError> {
        let theta = self.generate(grid)?;
        if extra == 0 {
            return Ok(theta);
        }
        let n = theta.len();
        Ok(theta.resize_vertically(n + extra, 0.0))
    }
}
