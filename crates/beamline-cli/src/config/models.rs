use beamline::core::models::element::ElementKind;
use beamline::engine::config::SequenceConfig;
use std::path::PathBuf;

/// Fully merged settings for one `expand` run.
#[derive(Debug, Clone)]
pub struct ExpandConfig {
    pub output_path: Option<PathBuf>,
    pub drift_kind: ElementKind,
    pub expand: bool,
    pub sequence_config: SequenceConfig,
}
