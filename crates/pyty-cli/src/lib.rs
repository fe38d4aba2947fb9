//! Library side of the `pyty` binary: argument parsing, the query driver,
//! result reporting and tracing setup.
pub mod args;
pub mod driver;
pub mod reporter;
pub mod tracing_config;
