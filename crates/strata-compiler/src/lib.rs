//! Strata compiler front end
//!
//! Turns a compile request (upstream relation plus raw export-sink config)
//! into a lowered plan operator, with config and logging for the CLI.

pub mod config;
pub mod driver;
pub mod logging;
pub mod request;

pub use config::{CompilerConfig, Config, ConfigError, OutputFormat};
pub use driver::{compile, CompiledSink, DriverError, Summary};
pub use request::CompileRequest;
