//! # Heat Task
//!
//! `HeatTask` aggregates everything one simulation run needs and drives the workflow:
//!
//! 1. parameters, regime, controller, initial profile and time span are set (setters or a
//!    `HeatTaskConfig` document)
//! 2. `check_task()` validates the input
//! 3. `setup()` builds grid, diffusion operator and dynamics model
//! 4. `solve()` integrates with forward Euler and keeps the `Trajectory`
//! 5. post-processing: profiles, traces, space-time matrix, steady-state error, heat content,
//!    pretty printing and `save_result()`
//!
//! Changing any input after `setup()` drops the derived objects, so a stale model is never
//! integrated. The input fields are public: `solve()` compares them with the ones the model
//! was built from and runs `setup()` again when they differ. Post-processing reads node
//! counts from the built grid, never from the current parameters.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut task = HeatTask::new();
//! task.set_regime(HeatRegime::Proportional);
//! task.set_controller(ControllerConfig::proportional(1000.0, 1.0, 400.0));
//! task.set_initial_profile(InitialProfile::Uniform(300.0));
//! task.set_time_span(0.0, 2000.0, 3.0);
//! task.solve()?;
//! println!("steady-state error {}", task.steady_state_error()?);
//! ```
use super::discretization::{Discretization, Grid, build_discretization};
use super::dynamics::{ClosedLoop, HeatDynamics, HeatModel};
use super::heat_error::HeatError;
use super::integrator::{SolverSettings, Trajectory, integrate_model};
use super::parameters::{ControllerConfig, HeatParameters, HeatRegime, InitialProfile};
use super::task_io::load_task_from_file;
use log::info;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn default_regime() -> HeatRegime {
    HeatRegime::Radiative
}

/// Serializable description of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatTaskConfig {
    #[serde(default)]
    pub problem_name: Option<String>,
    #[serde(default)]
    pub problem_description: Option<String>,
    #[serde(default = "default_regime")]
    pub regime: HeatRegime,
    #[serde(default)]
    pub parameters: HeatParameters,
    #[serde(default)]
    pub controller: Option<ControllerConfig>,
    #[serde(default)]
    pub initial: InitialProfile,
    #[serde(default)]
    pub solver: SolverSettings,
}

impl Default for HeatTaskConfig {
    fn default() -> Self {
        Self {
            problem_name: None,
            problem_description: None,
            regime: default_regime(),
            parameters: HeatParameters::default(),
            controller: None,
            initial: InitialProfile::default(),
            solver: SolverSettings::default(),
        }
    }
}

/// Result document written by `save_result`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatResult {
    pub problem_name: Option<String>,
    pub regime: HeatRegime,
    pub parameters: HeatParameters,
    pub controller: Option<ControllerConfig>,
    /// grid nodes
    pub x: Vec<f64>,
    /// recorded instants
    pub t: Vec<f64>,
    /// one state vector per recorded instant
    pub states: Vec<Vec<f64>>,
}

/// Inputs the current grid and model were built from
#[derive(Debug, Clone, PartialEq)]
struct ModelInputs {
    regime: HeatRegime,
    parameters: HeatParameters,
    controller: Option<ControllerConfig>,
}

#[derive(Debug, Clone)]
pub struct HeatTask {
    pub problem_name: Option<String>,
    pub problem_description: Option<String>,
    pub regime: HeatRegime,
    pub parameters: HeatParameters,
    /// required by the controlled regimes only
    pub controller: Option<ControllerConfig>,
    pub initial: InitialProfile,
    pub solver_settings: SolverSettings,
    discretization: Option<Discretization>,
    model: Option<HeatModel>,
    built_from: Option<ModelInputs>,
    solution: Option<Trajectory>,
}

impl Default for HeatTask {
    fn default() -> Self {
        Self::new()
    }
}

impl HeatTask {
    /// Steel rod with radiative ends, uniform 300 K start
    pub fn new() -> Self {
        Self::from_config(HeatTaskConfig::default())
    }

    pub fn from_config(config: HeatTaskConfig) -> Self {
        Self {
            problem_name: config.problem_name,
            problem_description: config.problem_description,
            regime: config.regime,
            parameters: config.parameters,
            controller: config.controller,
            initial: config.initial,
            solver_settings: config.solver,
            discretization: None,
            model: None,
            built_from: None,
            solution: None,
        }
    }

    /// Read a task document (see `task_io`) and build the task from it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HeatError> {
        let config = load_task_from_file(path)?;
        Ok(Self::from_config(config))
    }

    pub fn to_config(&self) -> HeatTaskConfig {
        HeatTaskConfig {
            problem_name: self.problem_name.clone(),
            problem_description: self.problem_description.clone(),
            regime: self.regime,
            parameters: self.parameters.clone(),
            controller: self.controller.clone(),
            initial: self.initial.clone(),
            solver: self.solver_settings.clone(),
        }
    }

    fn reset(&mut self) {
        self.discretization = None;
        self.model = None;
        self.built_from = None;
        self.solution = None;
    }

    fn current_inputs(&self) -> ModelInputs {
        ModelInputs {
            regime: self.regime,
            parameters: self.parameters.clone(),
            controller: self.controller.clone(),
        }
    }

    /// True when no model is built or an input field changed since `setup()`
    pub fn needs_setup(&self) -> bool {
        self.model.is_none() || self.built_from.as_ref() != Some(&self.current_inputs())
    }

    pub fn set_problem_name(&mut self, name: &str) {
        self.problem_name = Some(name.to_string());
    }

    pub fn set_problem_description(&mut self, description: &str) {
        self.problem_description = Some(description.to_string());
    }

    pub fn set_regime(&mut self, regime: HeatRegime) {
        self.regime = regime;
        self.reset();
    }

    pub fn set_parameters(&mut self, parameters: HeatParameters) {
        self.parameters = parameters;
        self.reset();
    }

    /// Set conductivity, heat capacity and density
    pub fn set_material(&mut self, Lambda: f64, c: f64, ro: f64) {
        self.parameters.Lambda = Lambda;
        self.parameters.c = c;
        self.parameters.ro = ro;
        self.reset();
    }

    /// Set heat transfer coefficient, emissivity and ambient temperature
    pub fn set_boundary_transfer(&mut self, h: f64, emissivity: f64, T_amb: f64) {
        self.parameters.h = h;
        self.parameters.emissivity = emissivity;
        self.parameters.T_amb = T_amb;
        self.reset();
    }

    pub fn set_grid(&mut self, L: f64, N: usize) {
        self.parameters.L = L;
        self.parameters.N = N;
        self.reset();
    }

    pub fn set_controller(&mut self, controller: ControllerConfig) {
        self.controller = Some(controller);
        self.reset();
    }

    pub fn set_initial_profile(&mut self, initial: InitialProfile) {
        self.initial = initial;
        self.reset();
    }

    pub fn set_solver_settings(&mut self, settings: SolverSettings) {
        self.solver_settings = settings;
        self.solution = None;
    }

    pub fn set_time_span(&mut self, t0: f64, t_final: f64, dt: f64) {
        self.solver_settings.t0 = t0;
        self.solver_settings.t_final = t_final;
        self.solver_settings.dt = dt;
        self.solution = None;
    }

    /// Step as a fraction of the explicit stability bound 0.5·Δx²/α
    pub fn set_dt_fraction_of_limit(&mut self, fraction: f64) {
        self.solver_settings.dt = fraction * self.parameters.stability_limit();
        self.solution = None;
    }

    pub fn set_output_every(&mut self, output_every: usize) {
        self.solver_settings.output_every = output_every;
        self.solution = None;
    }

    /// Validate input before any object is built
    pub fn check_task(&self) -> Result<(), HeatError> {
        self.parameters.validate()?;
        self.solver_settings.validate()?;
        if self.regime.needs_controller() {
            match &self.controller {
                Some(controller) => controller.validate()?,
                None => {
                    return Err(HeatError::MissingData(format!(
                        "regime {} needs controller settings",
                        self.regime
                    )));
                }
            }
        }
        if let InitialProfile::Custom(values) = &self.initial {
            if values.len() != self.parameters.N {
                return Err(HeatError::InvalidConfiguration(format!(
                    "custom initial profile has {} values, N = {}",
                    values.len(),
                    self.parameters.N
                )));
            }
        }
        Ok(())
    }

    /// Build grid, operator and dynamics model
    pub fn setup(&mut self) -> Result<(), HeatError> {
        self.reset();
        self.check_task()?;
        info!("task checked!");
        let disc = build_discretization(
            self.parameters.L,
            self.parameters.N,
            self.regime.boundary_kind(),
        )?;
        info!(
            "discretization built: N = {}, dx = {:.4e} m, boundary {:?}",
            disc.grid.len(),
            disc.grid.dx(),
            disc.operator.kind()
        );
        let model = HeatModel::from_regime(
            self.regime,
            &disc,
            &self.parameters,
            self.controller.as_ref(),
        )?;
        info!(
            "dynamics model for {} created, state dimension {}",
            self.regime,
            model.state_dim()
        );
        self.discretization = Some(disc);
        self.model = Some(model);
        self.built_from = Some(self.current_inputs());
        info!("setup completed!");
        Ok(())
    }

    /// Integrate from the initial profile; runs `setup()` first if needed
    pub fn solve(&mut self) -> Result<(), HeatError> {
        if self.needs_setup() {
            if self.model.is_some() {
                info!("inputs changed since setup, rebuilding the model");
            }
            self.setup()?;
        }
        self.solver_settings.validate()?;
        let (disc, model) = match (&self.discretization, &self.model) {
            (Some(disc), Some(model)) => (disc, model),
            _ => return Err(HeatError::MissingData("setup did not finish".to_string())),
        };
        let y0 = self
            .initial
            .initial_state(&disc.grid, self.regime.augmented_states())?;
        let trajectory = integrate_model(
            model,
            &y0,
            &self.solver_settings,
            Some(self.parameters.stability_limit()),
        )?;
        info!(
            "{} solved on [{}, {}] s",
            self.regime, self.solver_settings.t0, self.solver_settings.t_final
        );
        self.solution = Some(trajectory);
        Ok(())
    }

    pub fn get_solution(&self) -> Option<&Trajectory> {
        self.solution.as_ref()
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.discretization.as_ref().map(|d| &d.grid)
    }

    pub fn discretization(&self) -> Option<&Discretization> {
        self.discretization.as_ref()
    }

    pub fn model(&self) -> Option<&HeatModel> {
        self.model.as_ref()
    }

    /// Closed-loop matrices (Acl, Bcl, Ecl) of the PI regime
    pub fn closed_loop(&self) -> Option<&ClosedLoop> {
        match &self.model {
            Some(HeatModel::PiControl(pi)) => Some(pi.closed_loop()),
            _ => None,
        }
    }

    fn built_grid(&self) -> Result<&Grid, HeatError> {
        self.grid()
            .ok_or_else(|| HeatError::MissingData("grid not built".to_string()))
    }

    fn solution_ref(&self) -> Result<&Trajectory, HeatError> {
        self.solution
            .as_ref()
            .ok_or_else(|| HeatError::MissingData("no solution, call solve() first".to_string()))
    }

    /// Temperatures at the end of the run
    pub fn final_profile(&self) -> Result<DVector<f64>, HeatError> {
        let solution = self.solution_ref()?;
        let t_end = solution
            .final_time()
            .ok_or_else(|| HeatError::MissingData("empty trajectory".to_string()))?;
        self.profile_at(t_end)
    }

    /// Temperatures at the recorded instant closest to `t`
    pub fn profile_at(&self, t: f64) -> Result<DVector<f64>, HeatError> {
        let n = self.built_grid()?.len();
        self.solution_ref()?
            .profile_at(t, n)
            .ok_or_else(|| HeatError::MissingData(format!("no profile near t = {}", t)))
    }

    /// Temperature history at the grid node closest to `x`
    pub fn trace_at(&self, x: f64) -> Result<Vec<f64>, HeatError> {
        let i = self.built_grid()?.nearest_index(x);
        self.solution_ref()?
            .trace_at(i)
            .ok_or_else(|| HeatError::InvalidState(format!("node {} out of state range", i)))
    }

    /// Measured output θ(L, t)
    pub fn output_trace(&self) -> Result<Vec<f64>, HeatError> {
        let n = self.built_grid()?.len();
        self.solution_ref()?
            .output(n)
            .ok_or_else(|| HeatError::InvalidState("output node out of state range".to_string()))
    }

    /// Space-time temperature matrix: rows are recorded instants, columns grid nodes
    pub fn space_time_matrix(&self) -> Result<DMatrix<f64>, HeatError> {
        let full = self.solution_ref()?.to_matrix();
        let n = self.built_grid()?.len().min(full.ncols());
        Ok(full.columns(0, n).into_owned())
    }

    /// y_ref - θ(L) at the end of a controlled run
    pub fn steady_state_error(&self) -> Result<f64, HeatError> {
        let controller = self.controller.as_ref().ok_or_else(|| {
            HeatError::MissingData("steady-state error needs a reference temperature".to_string())
        })?;
        let profile = self.final_profile()?;
        Ok(controller.y_ref - profile[profile.len() - 1])
    }

    /// Trapezoidal ∫θ dx of every recorded state
    pub fn heat_content(&self) -> Result<Vec<f64>, HeatError> {
        Ok(self.solution_ref()?.total_heat(self.built_grid()?))
    }

    pub fn pretty_print_task(&self) {
        use prettytable::{Table, row};
        println!("\n=== HEAT TASK SUMMARY ===");
        println!("Problem Name: {:?}", self.problem_name);
        println!("Problem Description: {:?}", self.problem_description);
        println!("Regime: {}", self.regime);

        let p = &self.parameters;
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value", "Units"]);
        table.add_row(row![
            "Thermal Conductivity (Lambda)",
            format!("{:.3}", p.Lambda),
            "W/m/K"
        ]);
        table.add_row(row!["Heat Capacity (c)", format!("{:.2}", p.c), "J/kg/K"]);
        table.add_row(row!["Density (ro)", format!("{:.2}", p.ro), "kg/m3"]);
        table.add_row(row!["Diffusivity (alpha)", format!("{:.4e}", p.alpha()), "m2/s"]);
        table.add_row(row!["Heat Transfer (h)", format!("{:.3}", p.h), "W/m2/K"]);
        table.add_row(row!["Emissivity", format!("{:.3}", p.emissivity), "-"]);
        table.add_row(row!["Ambient Temperature", format!("{:.2}", p.T_amb), "K"]);
        table.add_row(row!["Rod Length (L)", format!("{:.4}", p.L), "m"]);
        table.add_row(row!["Grid Points (N)", p.N, "-"]);
        table.add_row(row!["Grid Step (dx)", format!("{:.4e}", p.dx()), "m"]);
        println!("\nRod:");
        table.printstd();

        if let Some(ctrl) = &self.controller {
            let mut table = Table::new();
            table.add_row(row!["Parameter", "Value", "Units"]);
            table.add_row(row!["Kp", format!("{:.3}", ctrl.Kp), "W/m2/K"]);
            table.add_row(row!["Ki", format!("{:.4}", ctrl.Ki), "W/m2/K/s"]);
            table.add_row(row!["Actuation gain (b)", format!("{:.3}", ctrl.b), "-"]);
            table.add_row(row!["Reference (y_ref)", format!("{:.2}", ctrl.y_ref), "K"]);
            println!("\nController:");
            table.printstd();
        }

        let s = &self.solver_settings;
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value", "Units"]);
        table.add_row(row!["t0", format!("{:.3}", s.t0), "s"]);
        table.add_row(row!["t_final", format!("{:.3}", s.t_final), "s"]);
        table.add_row(row!["dt", format!("{:.4e}", s.dt), "s"]);
        table.add_row(row![
            "Stability bound",
            format!("{:.4e}", p.stability_limit()),
            "s"
        ]);
        table.add_row(row!["Output every", s.output_every, "steps"]);
        println!("\nTime integration:");
        table.printstd();
        println!("Initial profile: {:?}", self.initial);
    }

    /// Final profile and, for controlled regimes, the tracking error
    pub fn pretty_print_solution(&self) -> Result<(), HeatError> {
        use prettytable::{Table, row};
        let profile = self.final_profile()?;
        let grid = self
            .grid()
            .ok_or_else(|| HeatError::MissingData("grid not built".to_string()))?;
        let mut table = Table::new();
        table.add_row(row!["x, m", "theta, K"]);
        for (x, theta) in grid.points().iter().zip(profile.iter()) {
            table.add_row(row![format!("{:.4}", x), format!("{:.4}", theta)]);
        }
        println!("\nFinal temperature profile:");
        table.printstd();
        if self.controller.is_some() && self.regime.needs_controller() {
            println!("steady-state error: {:.4} K", self.steady_state_error()?);
        }
        Ok(())
    }

    /// Write grid, time array and state history as pretty JSON
    pub fn save_result<P: AsRef<Path>>(&self, path: P) -> Result<(), HeatError> {
        let solution = self.solution_ref()?;
        let grid = self
            .grid()
            .ok_or_else(|| HeatError::MissingData("grid not built".to_string()))?;
        let result = HeatResult {
            problem_name: self.problem_name.clone(),
            regime: self.regime,
            parameters: self.parameters.clone(),
            controller: self.controller.clone(),
            x: grid.points().iter().copied().collect(),
            t: solution.t.clone(),
            states: solution
                .states
                .iter()
                .map(|s| s.iter().copied().collect())
                .collect(),
        };
        let json = serde_json::to_string_pretty(&result)?;
        let mut file = File::create(path.as_ref())?;
        file.write_all(json.as_bytes())?;
        info!("result saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::NamedTempFile;

    fn short_radiative_task() -> HeatTask {
        let mut task = HeatTask::new();
        task.set_problem_name("radiative cooling");
        task.set_initial_profile(InitialProfile::Uniform(1000.0));
        let dt = 0.4 * task.parameters.stability_limit();
        task.set_time_span(0.0, 50.0 * dt, dt);
        task
    }

    #[test]
    fn test_new_task_defaults() {
        let task = HeatTask::new();
        assert_eq!(task.regime, HeatRegime::Radiative);
        assert_eq!(task.parameters, HeatParameters::default());
        assert!(task.check_task().is_ok());
        assert!(task.get_solution().is_none());
        assert!(task.grid().is_none());
    }

    #[test]
    fn test_check_task_requires_controller() {
        let mut task = HeatTask::new();
        task.set_regime(HeatRegime::ProportionalIntegral);
        assert!(matches!(task.check_task(), Err(HeatError::MissingData(_))));
        task.set_controller(ControllerConfig::default());
        assert!(task.check_task().is_ok());
    }

    #[test]
    fn test_check_task_rejects_bad_input() {
        let mut task = HeatTask::new();
        task.set_grid(0.1, 2);
        assert!(matches!(
            task.check_task(),
            Err(HeatError::InvalidConfiguration(_))
        ));

        let mut task = HeatTask::new();
        task.set_time_span(0.0, 0.0, 1.0);
        assert!(task.check_task().is_err());

        let mut task = HeatTask::new();
        task.set_time_span(0.0, 10.0, 0.0);
        assert!(task.setup().is_err());

        let mut task = HeatTask::new();
        task.set_initial_profile(InitialProfile::Custom(vec![300.0; 4]));
        assert!(task.check_task().is_err());
    }

    #[test]
    fn test_post_processing_before_solve() {
        let task = HeatTask::new();
        assert!(matches!(task.final_profile(), Err(HeatError::MissingData(_))));
        assert!(task.output_trace().is_err());
        assert!(task.save_result("never_written.json").is_err());
    }

    #[test]
    fn test_setup_builds_model() {
        let mut task = HeatTask::new();
        task.set_regime(HeatRegime::ProportionalIntegral);
        task.set_controller(ControllerConfig::default());
        task.setup().unwrap();
        let n = task.parameters.N;
        assert_eq!(task.grid().unwrap().len(), n);
        assert_eq!(task.model().unwrap().state_dim(), n + 1);
        let cl = task.closed_loop().unwrap();
        assert_eq!(cl.Acl.shape(), (n + 1, n + 1));

        // changing an input drops the derived objects
        task.set_regime(HeatRegime::Proportional);
        assert!(task.model().is_none());
        assert!(task.closed_loop().is_none());
    }

    #[test]
    fn test_solve_rebuilds_after_direct_field_change() {
        let mut task = short_radiative_task();
        task.setup().unwrap();
        assert!(!task.needs_setup());
        assert_eq!(task.grid().unwrap().len(), 11);

        task.parameters.N = 21;
        task.solver_settings.dt = 0.4 * task.parameters.stability_limit();
        assert!(task.needs_setup());
        task.solve().unwrap();

        assert!(!task.needs_setup());
        assert_eq!(task.grid().unwrap().len(), 21);
        assert_eq!(task.model().unwrap().state_dim(), 21);
        let state = task.get_solution().unwrap().final_state().unwrap();
        assert_eq!(state.len(), 21);
        let profile = task.final_profile().unwrap();
        assert_eq!(profile.len(), 21);
        assert!(profile.iter().all(|&v| v > task.parameters.T_amb && v <= 1000.0));
    }

    #[test]
    fn test_controller_change_marks_model_stale() {
        let mut task = HeatTask::new();
        task.set_regime(HeatRegime::Proportional);
        task.set_controller(ControllerConfig::proportional(1000.0, 1.0, 400.0));
        task.setup().unwrap();
        assert!(!task.needs_setup());
        if let Some(controller) = task.controller.as_mut() {
            controller.y_ref = 450.0;
        }
        assert!(task.needs_setup());
        // a different initial profile reuses the built model
        task.setup().unwrap();
        task.initial = InitialProfile::Uniform(350.0);
        assert!(!task.needs_setup());
    }

    #[test]
    fn test_solve_radiative_short_run() {
        let mut task = short_radiative_task();
        task.solve().unwrap();
        let solution = task.get_solution().unwrap();
        assert_eq!(solution.len(), 51);

        let profile = task.final_profile().unwrap();
        assert_eq!(profile.len(), task.parameters.N);
        // ends cool first, nothing drops below ambient
        assert!(profile[0] < 1000.0);
        assert!(profile[0] < profile[5]);
        assert!(profile.iter().all(|&v| v > task.parameters.T_amb && v <= 1000.0));
        assert_relative_eq!(profile[0], profile[10], max_relative = 1e-12);

        let trace = task.trace_at(0.0).unwrap();
        assert_eq!(trace.len(), 51);
        assert_eq!(trace[0], 1000.0);
        assert_eq!(task.space_time_matrix().unwrap().shape(), (51, 11));

        let heat = task.heat_content().unwrap();
        assert!(heat.last().unwrap() < &heat[0]);

        // no reference temperature without a controller
        assert!(task.steady_state_error().is_err());
    }

    #[test]
    fn test_pi_state_includes_integral() {
        let mut task = HeatTask::new();
        task.set_regime(HeatRegime::ProportionalIntegral);
        task.set_controller(ControllerConfig::default());
        task.set_dt_fraction_of_limit(0.5);
        let dt = task.solver_settings.dt;
        task.set_time_span(0.0, 20.0 * dt, dt);
        task.solve().unwrap();
        let last = task.get_solution().unwrap().final_state().unwrap().clone();
        assert_eq!(last.len(), task.parameters.N + 1);
        // θ(L) is still below y_ref, so the integrated error grows
        assert!(last[task.parameters.N] > 0.0);
        assert_eq!(task.final_profile().unwrap().len(), task.parameters.N);
        assert!(task.steady_state_error().unwrap() > 0.0);
    }

    #[test]
    fn test_config_round_trip_through_json() {
        let mut task = HeatTask::new();
        task.set_problem_description("P control of a steel rod");
        task.set_regime(HeatRegime::Proportional);
        task.set_controller(ControllerConfig::proportional(1000.0, 1.0, 400.0));
        task.set_initial_profile(InitialProfile::Parabolic { m: 2.0 });
        let config = task.to_config();
        let json = serde_json::to_string(&config).unwrap();
        let back: HeatTaskConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        let rebuilt = HeatTask::from_config(back);
        assert_eq!(rebuilt.regime, HeatRegime::Proportional);
        assert_eq!(rebuilt.initial, InitialProfile::Parabolic { m: 2.0 });
    }

    #[test]
    fn test_save_result() {
        let mut task = short_radiative_task();
        task.set_output_every(10);
        task.solve().unwrap();
        let file = NamedTempFile::new().unwrap();
        task.save_result(file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let result: HeatResult = serde_json::from_str(&content).unwrap();
        assert_eq!(result.problem_name.as_deref(), Some("radiative cooling"));
        assert_eq!(result.regime, HeatRegime::Radiative);
        assert_eq!(result.x.len(), 11);
        assert_eq!(result.t.len(), 6);
        assert_eq!(result.states.len(), 6);
        assert_eq!(result.states[0], vec![1000.0; 11]);
        assert_relative_eq!(result.x[10], 0.1, epsilon = 1e-12);
    }
}
