use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "prelint.toml";

/// Look for `prelint.toml` in `dir` and then in each of its parents.
pub fn find_prelint_toml(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

pub fn parse_prelint_toml(path: &Path) -> Result<TomlOptions, ConfigError> {
    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    toml::from_str(&content)
        .map_err(|source| ConfigError::Deserialize { path: path.to_path_buf(), source })
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TomlOptions {
    pub lint: Option<LintTomlOptions>,
    pub bundle: Option<BundleTomlOptions>,
    pub output: Option<OutputTomlOptions>,
}

/// `[lint]`: the linter command, which must print a JSON report.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LintTomlOptions {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

/// `[bundle]`: the preprocessor run after linting.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct BundleTomlOptions {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    pub create_dirs: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct OutputTomlOptions {
    pub color: Option<bool>,
}
