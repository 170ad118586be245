#[cfg(test)]
mod tests {
    use super::super::analytical::{dirichlet_series, neumann_series, series_profile};
    use super::super::discretization::BoundaryKind;
    use super::super::heat_task::*;
    use super::super::parameters::{
        ControllerConfig, HeatParameters, HeatRegime, InitialProfile,
    };
    use approx::assert_relative_eq;

    /// Steel rod, 11 nodes, radiative/convective exchange with a 298 K environment
    fn steel_rod_task(regime: HeatRegime) -> HeatTask {
        let mut task = HeatTask::new();
        task.set_problem_name(&format!("steel rod, {}", regime));
        task.set_regime(regime);
        task
    }

    /// Unit rod (α = 1) with 101 nodes for comparison with the series solutions
    fn unit_rod_task(regime: HeatRegime) -> HeatTask {
        let mut task = HeatTask::new();
        task.set_regime(regime);
        task.set_parameters(HeatParameters::new(1.0, 1.0, 1.0, 1.0, 101));
        task.set_initial_profile(InitialProfile::Parabolic { m: 1.0 });
        task
    }

    #[test]
    fn insulated_rod_conserves_heat() {
        let mut task = steel_rod_task(HeatRegime::ZeroNeumann);
        task.set_initial_profile(InitialProfile::Custom(vec![
            300.0, 900.0, 450.0, 310.0, 1200.0, 700.0, 650.0, 298.0, 800.0, 500.0, 350.0,
        ]));
        task.set_dt_fraction_of_limit(0.4);
        let dt = task.solver_settings.dt;
        task.set_time_span(0.0, 500.0 * dt, dt);
        task.solve().unwrap();

        let heat = task.heat_content().unwrap();
        assert_eq!(heat.len(), 501);
        for q in &heat {
            assert_relative_eq!(*q, heat[0], max_relative = 1e-10);
        }
        // the profile flattens towards the mean while the content stays put
        let profile = task.final_profile().unwrap();
        let spread = profile.max() - profile.min();
        assert!(spread < 900.0);
    }

    #[test]
    fn radiative_rod_relaxes_to_ambient() {
        let mut task = steel_rod_task(HeatRegime::Radiative);
        task.set_initial_profile(InitialProfile::Uniform(1000.0));
        task.set_dt_fraction_of_limit(0.4);
        let dt = task.solver_settings.dt;
        task.set_time_span(0.0, 10000.0, dt);
        task.set_output_every(100);
        task.solve().unwrap();

        let T_amb = task.parameters.T_amb;
        let profile = task.final_profile().unwrap();
        for theta in profile.iter() {
            assert!((theta - T_amb).abs() < 1e-3, "theta = {}", theta);
        }
        let solution = task.get_solution().unwrap();
        assert_relative_eq!(solution.final_time().unwrap(), 10000.0, epsilon = 1e-9);
        // cooling is monotone at the boundary
        let trace = task.trace_at(0.0).unwrap();
        assert!(trace.windows(2).all(|w| w[1] <= w[0] + 1e-9));
    }

    #[test]
    fn explicit_step_above_stability_bound_diverges() {
        let mut task = steel_rod_task(HeatRegime::ZeroNeumann);
        task.set_initial_profile(InitialProfile::Parabolic { m: 4.0e5 });
        task.set_dt_fraction_of_limit(1.01);
        let dt = task.solver_settings.dt;
        task.set_time_span(0.0, 2000.0 * dt, dt);
        task.set_output_every(50);
        task.solve().unwrap();

        let growth = task.get_solution().unwrap().max_abs();
        assert!(!growth.is_finite() || growth > 1e6, "max |theta| = {}", growth);
    }

    #[test]
    fn explicit_step_below_stability_bound_stays_bounded() {
        let mut task = steel_rod_task(HeatRegime::ZeroNeumann);
        task.set_initial_profile(InitialProfile::Parabolic { m: 4.0e5 });
        task.set_dt_fraction_of_limit(0.99);
        let dt = task.solver_settings.dt;
        task.set_time_span(0.0, 2000.0 * dt, dt);
        task.set_output_every(50);
        task.solve().unwrap();

        // θ0 spans [0, 1000] K; no recorded value may leave that range
        let solution = task.get_solution().unwrap();
        for state in &solution.states {
            assert!(state.iter().all(|&v| (-1e-6..=1000.0 + 1e-6).contains(&v)));
        }
        // and the rod settles at the mean m·L²/6
        let profile = task.final_profile().unwrap();
        let mean = 4.0e5 * 0.1 * 0.1 / 6.0;
        assert!((profile[5] - mean).abs() < 50.0);
    }

    fn controlled_task(regime: HeatRegime, controller: ControllerConfig, t_final: f64) -> HeatTask {
        let mut task = steel_rod_task(regime);
        task.set_controller(controller);
        task.set_initial_profile(InitialProfile::Uniform(300.0));
        task.set_dt_fraction_of_limit(0.8);
        let dt = task.solver_settings.dt;
        task.set_time_span(0.0, t_final, dt);
        task.set_output_every(20);
        task
    }

    #[test]
    fn proportional_control_keeps_an_offset() {
        let mut task = controlled_task(
            HeatRegime::Proportional,
            ControllerConfig::proportional(1000.0, 1.0, 400.0),
            2000.0,
        );
        task.solve().unwrap();

        let output = task.output_trace().unwrap();
        assert_eq!(output[0], 300.0);
        let error = task.steady_state_error().unwrap();
        // θ(L) approaches 400 K from below but the losses at x = L are never fully cancelled
        assert!(error > 0.5 && error < 5.0, "error = {}", error);
        let y = output[output.len() - 1];
        assert!(y > 390.0 && y < 400.0);
    }

    #[test]
    fn pi_control_removes_the_offset() {
        // the integral time constant Kp/Ki is 1e4 s, so the offset dies out over several of them
        let t_final = 60000.0;
        let mut p_task = controlled_task(
            HeatRegime::Proportional,
            ControllerConfig::proportional(1000.0, 1.0, 400.0),
            t_final,
        );
        p_task.solve().unwrap();
        let p_error = p_task.steady_state_error().unwrap();

        let mut pi_task = controlled_task(
            HeatRegime::ProportionalIntegral,
            ControllerConfig::proportional_integral(1000.0, 0.1, 1.0, 400.0),
            t_final,
        );
        pi_task.solve().unwrap();
        let pi_error = pi_task.steady_state_error().unwrap();

        assert!(p_error.abs() > 1.0, "P error = {}", p_error);
        assert!(pi_error.abs() < 0.02, "PI error = {}", pi_error);

        let final_state = pi_task.get_solution().unwrap().final_state().unwrap();
        assert_eq!(final_state.len(), 12);
        // the integrated error carries the actuation that P control lacks
        assert!(final_state[11] > 0.0);
    }

    #[test]
    fn dirichlet_rod_matches_sine_series() {
        let mut task = unit_rod_task(HeatRegime::Dirichlet);
        task.set_dt_fraction_of_limit(0.4);
        let dt = task.solver_settings.dt;
        task.set_time_span(0.0, 0.05, dt);
        task.set_output_every(100);
        task.solve().unwrap();

        let profile = task.final_profile().unwrap();
        assert_eq!(profile[0], 0.0);
        assert_eq!(profile[100], 0.0);
        for (node, x) in [(50, 0.5), (25, 0.25)] {
            let exact = dirichlet_series(x, 0.05, 1.0, 1.0, 1.0, 15);
            assert_relative_eq!(profile[node], exact, max_relative = 1e-2);
        }
    }

    #[test]
    fn insulated_rod_matches_cosine_series() {
        let mut task = unit_rod_task(HeatRegime::ZeroNeumann);
        task.set_dt_fraction_of_limit(0.4);
        let dt = task.solver_settings.dt;
        task.set_time_span(0.0, 0.05, dt);
        task.set_output_every(100);
        task.solve().unwrap();

        let profile = task.final_profile().unwrap();
        let grid = task.grid().unwrap();
        let exact = series_profile(BoundaryKind::ZeroNeumann, grid, 0.05, 1.0, 1.0, 20).unwrap();
        for node in [0, 25, 50, 75, 100] {
            assert_relative_eq!(profile[node], exact[node], max_relative = 1e-2);
        }
        assert_relative_eq!(
            profile[50],
            neumann_series(0.5, 0.05, 1.0, 1.0, 1.0, 10),
            max_relative = 1e-2
        );
    }
}
