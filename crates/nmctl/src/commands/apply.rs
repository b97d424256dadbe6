//! `nmctl apply <file>`: parameters from a JSON or YAML file.
//!
//! The file uses the same flat parameter names as the flags (`resource_type`,
//! `name`, `network`, `state`, ...). Connection flags still override it.

use std::path::Path;

use nmctl_core::ModuleParams;

use crate::error::CliError;

/// Read and parse a parameter file. `.json` is parsed as JSON, anything
/// else as YAML.
pub fn load(path: &Path) -> Result<ModuleParams, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(&contents)?)
    } else {
        Ok(serde_yaml::from_str(&contents)?)
    }
}
