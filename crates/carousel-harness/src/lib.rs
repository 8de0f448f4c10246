#![forbid(unsafe_code)]

pub mod check;
pub mod cli;
pub mod error;
pub mod logging;
pub mod replay;
pub mod script;

pub use cli::run_from_env;
pub use error::{HarnessError, Result};
