//! # One-Dimensional Heat Equation Module
//!
//! Finite-difference models of heat conduction in a rod of length `L` with several
//! boundary regimes and two closed-loop temperature controllers.
//!
//! ## Mathematical Model
//!
//! ### Nomenclature
//!
//! | Symbol | Description | Units |
//! |--------|-------------|-------|
//! | `λ` | Thermal conductivity | W/(m·K) |
//! | `c` | Specific heat capacity | J/(kg·K) |
//! | `ρ` | Density | kg/m³ |
//! | `α` | Diffusivity `λ/(c·ρ)` | m²/s |
//! | `h` | Heat transfer coefficient | W/(m²·K) |
//! | `ε` | Emissivity | - |
//! | `σ` | Stefan–Boltzmann constant | W/(m²·K⁴) |
//! | `θ_amb` | Ambient temperature | K |
//!
//! ### Governing equation
//!
//! ```text
//! ∂θ/∂t = α ∂²θ/∂x²,   0 < x < L
//! ```
//!
//! ### Semi-discretization
//!
//! With `N` nodes `x_n = n·Δx`, `Δx = L/(N-1)`, the second derivative is replaced by the
//! tridiagonal stencil `[1, -2, 1]/Δx²`. Boundary rows depend on the regime:
//!
//! - **Dirichlet**: boundary rows are zero, boundary nodes keep their initial values
//! - **Zero-Neumann / Robin**: the ghost node `x₋₁` (`x_N`) is eliminated with the flux
//!   condition, which doubles the single off-diagonal entry of the boundary row
//!
//! ```text
//! dθ/dt = (α/Δx²)·M·θ                               Dirichlet, zero-Neumann
//! dθ/dt = (α/Δx²)·M·θ + (2α/Δx)·Φ_out(θ)            radiative boundary
//! dθ/dt = A·θ + B·u + E·w(θ[N-1])                   proportional control
//! dz/dt = Acl·z + Bcl·y_ref + Ecl·w(z[N-1])         proportional-integral control
//! ```
//!
//! where `φ_out(θ) = -h·(θ - θ_amb) - ε·σ·(θ⁴ - θ_amb⁴)`.
//!
//! ## Workflow
//!
//! `HeatTask::new()` → setters → `setup()` (operator + evaluator) → `solve()` (forward Euler)
//! → post-processing on the `Trajectory`.
pub mod analytical;
pub mod boundary_flux;
pub mod discretization;
pub mod dynamics;
pub mod heat_error;
pub mod heat_task;
mod heat_tests;
pub mod integrator;
pub mod parameters;
pub mod task_io;
