#[allow(non_snake_case)]
pub mod HeatEquation;
pub mod cli;
