#![forbid(unsafe_code)]

use std::path::PathBuf;

use carousel_core::{CarouselConfig, ConfigError};
use clap::Args;

use crate::error::{HarnessError, Result};

#[derive(Debug, Clone, Args)]
pub struct CheckConfigArgs {
    /// TOML configuration file to validate.
    pub path: PathBuf,
}

/// Load and validate a configuration file, returning the effective config.
pub fn check_config(path: &std::path::Path) -> Result<CarouselConfig> {
    if !path.exists() {
        return Err(HarnessError::MissingPath {
            path: path.to_path_buf(),
        });
    }
    let config = CarouselConfig::from_toml_file(path)?;
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors).into());
    }
    Ok(config)
}

pub fn run_check_config(args: CheckConfigArgs) -> Result<()> {
    let config = check_config(&args.path)?;
    println!("{}", config.to_toml_string()?.trim_end());
    Ok(())
}
