//! # Discretization Builder
//!
//! Builds the uniform grid and the tridiagonal second-derivative operator `M` for a
//! given boundary kind. `M` is kept in banded form (sub-, main and super-diagonal);
//! a dense copy is produced only where block matrices are assembled.
//!
//! ```text
//!        Dirichlet                 zero-Neumann / Robin
//!   [ 0  0  0 ... 0 ]          [-2  2  0 ...  0 ]
//!   [ 1 -2  1 ... 0 ]          [ 1 -2  1 ...  0 ]
//!   [      ...      ]          [      ...       ]
//!   [ 0 ... 1 -2  1 ]          [ 0 ...  1 -2  1 ]
//!   [ 0 ... 0  0  0 ]          [ 0 ...  0  2 -2 ]
//! ```
//!
//! The doubled entry comes from eliminating the ghost node with a central
//! difference of the boundary flux: `θ₋₁ = θ₁ + 2Δx·q/λ`.
use super::heat_error::HeatError;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// How the boundary rows of the diffusion operator are closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryKind {
    /// Fixed boundary values: rows 0 and N-1 are zero
    Dirichlet,
    /// Insulated boundary
    ZeroNeumann,
    /// Flux depends on the boundary temperature (convection + radiation)
    Robin,
    /// Robin loss at x = L, controlled actuation flux at x = 0
    RobinActuated,
}

impl BoundaryKind {
    /// true for every kind closed with the reflected ghost point
    pub fn is_flux(&self) -> bool {
        !matches!(self, BoundaryKind::Dirichlet)
    }
}

/// Uniform grid x[n] = n·Δx on [0, L]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    L: f64,
    dx: f64,
    x: DVector<f64>,
}

impl Grid {
    pub fn new(L: f64, N: usize) -> Result<Self, HeatError> {
        if N < 3 {
            return Err(HeatError::InvalidConfiguration(format!(
                "grid needs at least 3 points to form an interior stencil, got {}",
                N
            )));
        }
        if !L.is_finite() || L <= 0.0 {
            return Err(HeatError::InvalidConfiguration(format!(
                "rod length must be positive, got {}",
                L
            )));
        }
        let dx = L / (N as f64 - 1.0);
        let x = DVector::from_fn(N, |n, _| n as f64 * dx);
        Ok(Self { L, dx, x })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn length(&self) -> f64 {
        self.L
    }

    pub fn points(&self) -> &DVector<f64> {
        &self.x
    }

    /// Index of the grid node closest to `x` (clamped to the rod)
    pub fn nearest_index(&self, x: f64) -> usize {
        let idx = (x / self.dx).round();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(self.len() - 1)
        }
    }

    /// Trapezoidal heat content ∫θ dx over the first N entries of `theta`.
    /// Invariant in time for the insulated rod: the boundary nodes own half a cell each.
    pub fn total_heat(&self, theta: &DVector<f64>) -> f64 {
        let n = self.len();
        let interior: f64 = theta.rows(1, n - 2).sum();
        self.dx * (0.5 * theta[0] + interior + 0.5 * theta[n - 1])
    }
}

/// Tridiagonal second-derivative operator (without the 1/Δx² factor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffusionOperator {
    kind: BoundaryKind,
    /// entry (i, i-1) for i = 1..N
    sub: Vec<f64>,
    /// entry (i, i)
    diag: Vec<f64>,
    /// entry (i, i+1) for i = 0..N-1
    sup: Vec<f64>,
}

impl DiffusionOperator {
    pub fn new(N: usize, kind: BoundaryKind) -> Result<Self, HeatError> {
        if N < 3 {
            return Err(HeatError::InvalidConfiguration(format!(
                "diffusion operator needs at least 3 points, got {}",
                N
            )));
        }
        let mut sub = vec![1.0; N - 1];
        let mut diag = vec![-2.0; N];
        let mut sup = vec![1.0; N - 1];
        match kind {
            BoundaryKind::Dirichlet => {
                diag[0] = 0.0;
                sup[0] = 0.0;
                diag[N - 1] = 0.0;
                sub[N - 2] = 0.0;
            }
            BoundaryKind::ZeroNeumann | BoundaryKind::Robin | BoundaryKind::RobinActuated => {
                sup[0] = 2.0;
                sub[N - 2] = 2.0;
            }
        }
        Ok(Self {
            kind,
            sub,
            diag,
            sup,
        })
    }

    pub fn dim(&self) -> usize {
        self.diag.len()
    }

    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    pub fn entry(&self, i: usize, j: usize) -> f64 {
        let n = self.dim();
        if i >= n || j >= n {
            return 0.0;
        }
        if i == j {
            self.diag[i]
        } else if j + 1 == i {
            self.sub[j]
        } else if i + 1 == j {
            self.sup[i]
        } else {
            0.0
        }
    }

    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.dim()).map(|j| self.entry(i, j)).collect()
    }

    /// M·θ using the first N entries of `theta`
    pub fn apply(&self, theta: &DVector<f64>) -> DVector<f64> {
        let n = self.dim();
        DVector::from_fn(n, |i, _| {
            let mut acc = self.diag[i] * theta[i];
            if i > 0 {
                acc += self.sub[i - 1] * theta[i - 1];
            }
            if i + 1 < n {
                acc += self.sup[i] * theta[i + 1];
            }
            acc
        })
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let n = self.dim();
        DMatrix::from_fn(n, n, |i, j| self.entry(i, j))
    }
}

/// Grid and operator of one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discretization {
    pub grid: Grid,
    pub operator: DiffusionOperator,
}

/// Build grid and diffusion operator for a rod of length `L` with `N` points
pub fn build_discretization(
    L: f64,
    N: usize,
    kind: BoundaryKind,
) -> Result<Discretization, HeatError> {
    let grid = Grid::new(L, N)?;
    let operator = DiffusionOperator::new(N, kind)?;
    Ok(Discretization { grid, operator })
}
