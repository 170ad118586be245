use crate::HeatEquation::analytical::series_profile;
use crate::HeatEquation::heat_error::HeatError;
use crate::HeatEquation::heat_task::{HeatTask, HeatTaskConfig};
use crate::HeatEquation::parameters::{
    ControllerConfig, HeatParameters, HeatRegime, InitialProfile,
};
use crate::HeatEquation::task_io::save_task_to_file;
use log::info;
use prettytable::{Table, row};
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

const TEMPLATE_FILE: &str = "heat_task_template.txt";

pub fn heat_menu() {
    loop {
        println!("\n=== Rod Problems ===");
        for (i, regime) in HeatRegime::all().iter().enumerate() {
            println!("\x1b[33m{}. {}\x1b[0m", i + 1, regime);
        }
        println!("\x1b[33m0. Back to main menu\x1b[0m");
        let choice = match prompt("Enter your choice: ") {
            Ok(choice) => choice,
            Err(e) => {
                println!("Error: {}", e);
                break;
            }
        };
        if choice == "0" || choice.is_empty() {
            break;
        }
        let regime = match choice
            .parse::<usize>()
            .ok()
            .and_then(|i| HeatRegime::all().get(i.wrapping_sub(1)).copied())
        {
            Some(regime) => regime,
            None => {
                println!("Invalid choice. Please try again.");
                continue;
            }
        };
        if let Err(e) = run_regime(regime) {
            println!("Error: {}", e);
        }
    }
}

fn run_regime(regime: HeatRegime) -> Result<(), HeatError> {
    let mut task = HeatTask::new();
    task.set_problem_name(&format!("{} rod", regime));
    task.set_regime(regime);
    task.set_parameters(input_parameters()?);
    if regime.needs_controller() {
        task.set_controller(input_controller(regime)?);
    }
    task.set_initial_profile(input_initial_profile()?);

    println!(
        "explicit stability bound: dt < {:.4e} s",
        task.parameters.stability_limit()
    );
    let t_final = read_value("Final time, s", 2000.0)?;
    let fraction = read_value("Time step as a fraction of the bound", 0.4)?;
    let output_every = read_value("Record every n-th step", 10usize)?;
    task.set_dt_fraction_of_limit(fraction);
    let dt = task.solver_settings.dt;
    task.set_time_span(0.0, t_final, dt);
    task.set_output_every(output_every);

    solve_and_report(&mut task)
}

fn solve_and_report(task: &mut HeatTask) -> Result<(), HeatError> {
    task.pretty_print_task();
    println!("Solving...");
    task.solve()?;
    task.pretty_print_solution()?;
    let save = prompt("Save result to file (empty to skip): ")?;
    if !save.is_empty() {
        task.save_result(PathBuf::from(save))?;
    }
    Ok(())
}

pub fn solve_from_file() {
    let run = || -> Result<(), HeatError> {
        let path = PathBuf::from(prompt("Enter file path: ")?);
        let mut task = HeatTask::from_file(&path)?;
        info!("task loaded from {}", path.display());
        solve_and_report(&mut task)
    };
    if let Err(e) = run() {
        println!("Error: {}", e);
    }
}

pub fn write_template() {
    let config = HeatTaskConfig {
        problem_name: Some("steel rod, PI control".to_string()),
        problem_description: Some("set-point tracking of the far end".to_string()),
        regime: HeatRegime::ProportionalIntegral,
        controller: Some(ControllerConfig::default()),
        ..HeatTaskConfig::default()
    };
    match save_task_to_file(&config, TEMPLATE_FILE) {
        Ok(()) => println!("Template written to {}", TEMPLATE_FILE),
        Err(e) => println!("Error: {}", e),
    }
}

/// Dirichlet and zero-Neumann rods with θ0 = m·(L·x - x²) against their series solutions
pub fn compare_with_series() {
    let run = || -> Result<(), HeatError> {
        let t_final = read_value("Comparison time, s", 0.05)?;
        let order = read_value("Series order", 20usize)?;
        let mut table = Table::new();
        table.add_row(row!["Regime", "x", "numerical", "series", "rel. error"]);
        for regime in [HeatRegime::Dirichlet, HeatRegime::ZeroNeumann] {
            let mut task = HeatTask::new();
            task.set_regime(regime);
            task.set_parameters(HeatParameters::new(1.0, 1.0, 1.0, 1.0, 101));
            task.set_initial_profile(InitialProfile::Parabolic { m: 1.0 });
            task.set_dt_fraction_of_limit(0.4);
            let dt = task.solver_settings.dt;
            task.set_time_span(0.0, t_final, dt);
            task.set_output_every(1000);
            task.solve()?;
            let profile = task.final_profile()?;
            let grid = task
                .grid()
                .ok_or_else(|| HeatError::MissingData("grid not built".to_string()))?;
            let exact = series_profile(
                regime.boundary_kind(),
                grid,
                t_final,
                task.parameters.alpha(),
                1.0,
                order,
            )?;
            for node in [10, 25, 50] {
                let rel = (profile[node] - exact[node]).abs() / exact[node].abs();
                table.add_row(row![
                    regime,
                    format!("{:.2}", grid.points()[node]),
                    format!("{:.6}", profile[node]),
                    format!("{:.6}", exact[node]),
                    format!("{:.2e}", rel)
                ]);
            }
        }
        table.printstd();
        Ok(())
    };
    if let Err(e) = run() {
        println!("Error: {}", e);
    }
}

fn input_parameters() -> Result<HeatParameters, HeatError> {
    let d = HeatParameters::default();
    println!("\nRod parameters (press Enter to keep the steel rod default):");
    let mut params = HeatParameters::new(
        read_value("Thermal conductivity Lambda, W/m/K", d.Lambda)?,
        read_value("Heat capacity c, J/kg/K", d.c)?,
        read_value("Density ro, kg/m3", d.ro)?,
        read_value("Rod length L, m", d.L)?,
        read_value("Number of grid points N", d.N)?,
    );
    params = params.with_boundary_transfer(
        read_value("Heat transfer coefficient h, W/m2/K", d.h)?,
        read_value("Emissivity", d.emissivity)?,
        read_value("Ambient temperature, K", d.T_amb)?,
    );
    params.validate()?;
    Ok(params)
}

fn input_controller(regime: HeatRegime) -> Result<ControllerConfig, HeatError> {
    let d = ControllerConfig::default();
    println!("\nController:");
    let kp = read_value("Kp, W/m2/K", d.Kp)?;
    let ki = if regime == HeatRegime::ProportionalIntegral {
        read_value("Ki, W/m2/K/s", d.Ki)?
    } else {
        0.0
    };
    let b = read_value("Actuation gain b", d.b)?;
    let y_ref = read_value("Reference temperature y_ref, K", d.y_ref)?;
    Ok(ControllerConfig::proportional_integral(kp, ki, b, y_ref))
}

fn input_initial_profile() -> Result<InitialProfile, HeatError> {
    println!("\nInitial profile: 1. uniform  2. parabolic m(Lx - x^2)");
    match prompt("Enter choice (default 1): ")?.as_str() {
        "" | "1" => Ok(InitialProfile::Uniform(read_value(
            "Initial temperature, K",
            300.0,
        )?)),
        "2" => Ok(InitialProfile::Parabolic {
            m: read_value("Curvature m, K/m2", 4.0e5)?,
        }),
        other => Err(HeatError::InvalidConfiguration(format!(
            "unknown profile choice '{}'",
            other
        ))),
    }
}

fn prompt(message: &str) -> Result<String, HeatError> {
    print!("\x1b[36m{}\x1b[0m", message);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Read a value, keeping `default` on empty input
fn read_value<T>(name: &str, default: T) -> Result<T, HeatError>
where
    T: FromStr + std::fmt::Display,
{
    let input = prompt(&format!("{} [{}]: ", name, default))?;
    if input.is_empty() {
        return Ok(default);
    }
    input.parse::<T>().map_err(|_| {
        HeatError::InvalidConfiguration(format!("cannot parse '{}' for {}", input, name))
    })
}
