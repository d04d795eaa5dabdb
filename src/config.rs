//! Run configuration resolved from the command line.

use crate::error::{ErdError, Result};
use crate::render::TEMPLATE_FILE;
use std::path::PathBuf;

/// Inputs for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database to inspect
    pub database: PathBuf,
    /// Template file; always [`TEMPLATE_FILE`] in the working directory
    pub template: PathBuf,
}

impl Config {
    /// Build the configuration from the optional database argument
    pub fn new(database: Option<PathBuf>) -> Result<Self> {
        let database = database.ok_or(ErdError::NoDatabase)?;
        Ok(Self {
            database,
            template: PathBuf::from(TEMPLATE_FILE),
        })
    }
}
