//! Task files.
//!
//! A task file is plain text holding a JSON `HeatTaskConfig` under a `HEAT_TASK` header.
//! The section runs until the next all-uppercase header line or the end of the file, so
//! notes under other headers may share the file:
//!
//! ```text
//! HEAT_TASK
//! {
//!   "regime": "Proportional",
//!   "controller": {"Kp": 1000.0, "b": 1.0, "y_ref": 400.0},
//!   "initial": {"Uniform": 300.0},
//!   "solver": {"t0": 0.0, "t_final": 2000.0, "dt": 3.0}
//! }
//! NOTES
//! steel rod, P control
//! ```
//!
//! A file without any header is parsed as a single JSON document.
use super::heat_error::HeatError;
use super::heat_task::HeatTaskConfig;
use log::{error, info};
use std::fs;
use std::path::Path;

pub const TASK_HEADER: &str = "HEAT_TASK";

fn is_header(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.chars().any(|c| c.is_alphabetic())
        && trimmed.chars().all(|c| c.is_uppercase() || c == '_')
}

/// Line range [start, end) of the task section; the whole text when there is no header
fn task_section(lines: &[&str]) -> (usize, usize) {
    let start = lines
        .iter()
        .position(|line| line.trim().to_uppercase() == TASK_HEADER)
        .map(|i| i + 1);
    match start {
        Some(start) => {
            let end = lines[start..]
                .iter()
                .position(|line| is_header(line))
                .map(|i| start + i)
                .unwrap_or(lines.len());
            (start, end)
        }
        None => (0, lines.len()),
    }
}

/// Parse the task section of a document
pub fn parse_task_document(content: &str) -> Result<HeatTaskConfig, HeatError> {
    let lines: Vec<&str> = content.lines().collect();
    let (start, end) = task_section(&lines);
    let section = lines[start..end].join("\n");
    if section.trim().is_empty() {
        return Err(HeatError::MissingData(format!(
            "no task data found under '{}'",
            TASK_HEADER
        )));
    }
    match serde_json::from_str::<HeatTaskConfig>(&section) {
        Ok(config) => Ok(config),
        Err(e) => {
            let file_line = start + e.line();
            error!(
                "Error parsing task data at line {}, column {} (line {} in file): {}",
                e.line(),
                e.column(),
                file_line,
                e
            );
            if let Some(problem_line) = lines.get(file_line.saturating_sub(1)) {
                error!("Problematic line: {}", problem_line);
                if e.column() >= 1 && e.column() <= problem_line.len() {
                    error!("{}^", " ".repeat(e.column() - 1));
                }
            }
            Err(HeatError::Json(e))
        }
    }
}

pub fn load_task_from_file<P: AsRef<Path>>(path: P) -> Result<HeatTaskConfig, HeatError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let config = parse_task_document(&content)?;
    info!("Successfully parsed task data from file '{}'", path.display());
    Ok(config)
}

/// Write `config` under a `HEAT_TASK` header
pub fn save_task_to_file<P: AsRef<Path>>(config: &HeatTaskConfig, path: P) -> Result<(), HeatError> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path.as_ref(), format!("{}\n{}\n", TASK_HEADER, json))?;
    Ok(())
}
