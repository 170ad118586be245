//! Interactive terminal front-end of the `heat1d` binary
pub mod cli_heat;
pub mod cli_main;
