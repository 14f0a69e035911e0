use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::ExpandConfig;
use crate::cli::ExpandArgs;
use crate::error::{CliError, Result};
use beamline::core::io::line::LineDescription;
use beamline::core::models::element::ElementKind;
use beamline::core::models::placement::ReferencePlacement;
use beamline::core::units::Length;
use beamline::engine::config::SequenceConfigBuilder;
use tracing::debug;

/// Merges the settings for `expand`.
///
/// Command-line arguments win over the line description, which wins over the
/// settings file, which wins over the built-in defaults. The line description
/// only carries `reference-placement` and `length-key`.
pub fn build_config(args: &ExpandArgs, line: &LineDescription) -> Result<ExpandConfig> {
    let defaults = DefaultsConfig::default();

    let mut file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let placement_file = file_config.placement.take().unwrap_or_default();
    let expansion_file = file_config.expansion.take().unwrap_or_default();

    let reference_placement = match args.reference_placement.as_deref() {
        Some(raw) => parse_reference_placement(raw)?,
        None => match line.reference_placement {
            Some(placement) => placement,
            None => parse_reference_placement(
                placement_file
                    .reference_placement
                    .as_deref()
                    .unwrap_or(&defaults.reference_placement),
            )?,
        },
    };

    let length_key = args
        .length_key
        .clone()
        .or_else(|| line.length_key.clone())
        .or(placement_file.length_key)
        .unwrap_or(defaults.length_key);

    let max_iterations = args
        .max_iterations
        .or(placement_file.max_iterations)
        .unwrap_or(defaults.max_iterations);

    let drift_epsilon = match (&args.epsilon, &expansion_file.drift_epsilon) {
        (Some(raw), _) => raw
            .parse::<Length>()
            .map_err(|e| CliError::Argument(format!("--epsilon '{}': {}", raw, e)))?,
        (None, Some(file_length)) => file_length.to_length()?,
        (None, None) => Length::meters(defaults.drift_epsilon),
    };

    let drift_kind_raw = args
        .drift_kind
        .as_deref()
        .or(expansion_file.drift_kind.as_deref())
        .unwrap_or(&defaults.drift_kind);
    let drift_kind: ElementKind = drift_kind_raw
        .parse()
        .map_err(|e| CliError::Config(format!("drift kind: {}", e)))?;

    let expand = if args.no_expand {
        false
    } else {
        expansion_file.enabled.unwrap_or(defaults.expand)
    };

    let sequence_config = SequenceConfigBuilder::new()
        .reference_placement(reference_placement)
        .length_key(&length_key)
        .max_iterations(max_iterations)
        .drift_epsilon(drift_epsilon)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    debug!("Merged sequence configuration: {:?}", sequence_config);

    Ok(ExpandConfig {
        output_path: args.output.clone(),
        drift_kind,
        expand,
        sequence_config,
    })
}

fn parse_reference_placement(raw: &str) -> Result<ReferencePlacement> {
    raw.parse::<ReferencePlacement>()
        .map_err(|e| CliError::Config(e.to_string()))
}
