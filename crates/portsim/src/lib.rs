//! Command-line front end for the portsim projection engine
//!
//! Reads a YAML savings request, runs the analysis from `portsim_core`, and prints
//! the report as a table, JSON or YAML.

pub mod logging;
pub mod report;
pub mod util;

pub use logging::init_logging;
pub use report::{OutputFormat, render};
pub use util::io::{RequestFile, load_request};
