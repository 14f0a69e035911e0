use crate::error::{CliError, Result};
use beamline::core::units::Length;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// A distance in a settings file: a number in metres or a literal with a unit.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FileLength {
    Meters(f64),
    Literal(String),
}

impl FileLength {
    pub fn to_length(&self) -> Result<Length> {
        match self {
            FileLength::Meters(value) => Ok(Length::meters(*value)),
            FileLength::Literal(text) => text
                .parse()
                .map_err(|e| CliError::Config(format!("invalid distance '{}': {}", text, e))),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePlacementConfig {
    pub reference_placement: Option<String>,
    pub length_key: Option<String>,
    pub max_iterations: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileExpansionConfig {
    pub enabled: Option<bool>,
    pub drift_kind: Option<String>,
    pub drift_epsilon: Option<FileLength>,
}

/// Settings read from `--config`.
///
/// ```toml
/// [placement]
/// reference-placement = "center"
/// max-iterations = 4
///
/// [expansion]
/// drift-kind = "DRIFT"
/// drift-epsilon = "1 um"
/// ```
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub placement: Option<FilePlacementConfig>,
    pub expansion: Option<FileExpansionConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading settings file {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
