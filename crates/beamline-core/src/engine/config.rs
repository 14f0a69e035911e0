use crate::core::io::line::LineDescription;
use crate::core::models::placement::ReferencePlacement;
use crate::core::units::Length;
use thiserror::Error;

pub const DEFAULT_LENGTH_KEY: &str = "L";
pub const DEFAULT_MAX_ITERATIONS: usize = 3;
pub const DEFAULT_DRIFT_EPSILON: Length = Length::meters(1.0e-6);

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// Maps the logical roles the resolver needs onto element attribute names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementKeys {
    pub length: String,
}

impl Default for ElementKeys {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceConfig {
    /// Which point the `at` hint refers to.
    pub reference_placement: ReferencePlacement,
    pub element_keys: ElementKeys,
    /// Upper bound on derivation passes when resolving one element.
    pub max_iterations: usize,
    /// Gaps at or below this distance are treated as closed.
    pub drift_epsilon: Length,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            reference_placement: ReferencePlacement::default(),
            element_keys: ElementKeys::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            drift_epsilon: DEFAULT_DRIFT_EPSILON,
        }
    }
}

impl SequenceConfig {
    pub fn builder() -> SequenceConfigBuilder {
        SequenceConfigBuilder::new()
    }
}

#[derive(Debug, Default, Clone)]
pub struct SequenceConfigBuilder {
    reference_placement: Option<ReferencePlacement>,
    length_key: Option<String>,
    max_iterations: Option<usize>,
    drift_epsilon: Option<Length>,
}

impl SequenceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the builder with the settings a line description declares.
    pub fn from_line(line: &LineDescription) -> Self {
        Self {
            reference_placement: line.reference_placement,
            length_key: line.length_key.clone(),
            ..Self::default()
        }
    }

    pub fn reference_placement(mut self, placement: ReferencePlacement) -> Self {
        self.reference_placement = Some(placement);
        self
    }
    pub fn length_key(mut self, key: &str) -> Self {
        self.length_key = Some(key.to_string());
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn drift_epsilon(mut self, epsilon: Length) -> Self {
        self.drift_epsilon = Some(epsilon);
        self
    }

    pub fn build(self) -> Result<SequenceConfig, ConfigError> {
        let max_iterations = self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);
        if max_iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_iterations",
                reason: "must be at least 1".to_string(),
            });
        }

        let drift_epsilon = self.drift_epsilon.unwrap_or(DEFAULT_DRIFT_EPSILON);
        if !drift_epsilon.is_finite() || drift_epsilon < Length::ZERO {
            return Err(ConfigError::InvalidParameter {
                parameter: "drift_epsilon",
                reason: format!("must be a finite, non-negative distance (got {})", drift_epsilon),
            });
        }

        let length = self
            .length_key
            .unwrap_or_else(|| DEFAULT_LENGTH_KEY.to_string());
        if length.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                parameter: "length_key",
                reason: "attribute name cannot be empty".to_string(),
            });
        }

        Ok(SequenceConfig {
            reference_placement: self.reference_placement.unwrap_or_default(),
            element_keys: ElementKeys { length },
            max_iterations,
            drift_epsilon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_without_overrides_matches_default() {
        assert_eq!(SequenceConfig::builder().build().unwrap(), SequenceConfig::default());
    }

    #[test]
    fn builder_applies_every_override() {
        let config = SequenceConfigBuilder::new()
            .reference_placement(ReferencePlacement::Center)
            .length_key("XL")
            .max_iterations(5)
            .drift_epsilon(Length::meters(1e-3))
            .build()
            .unwrap();
        assert_eq!(config.reference_placement, ReferencePlacement::Center);
        assert_eq!(config.element_keys.length, "XL");
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.drift_epsilon, Length::meters(1e-3));
    }

    #[test]
    fn build_rejects_zero_iterations() {
        let err = SequenceConfigBuilder::new().max_iterations(0).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter { parameter: "max_iterations", .. }
        ));
    }

    #[test]
    fn build_rejects_negative_or_non_finite_epsilon() {
        for epsilon in [Length::meters(-1e-6), Length::meters(f64::NAN), Length::meters(f64::INFINITY)] {
            let err = SequenceConfigBuilder::new().drift_epsilon(epsilon).build().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidParameter { parameter: "drift_epsilon", .. }
            ));
        }
    }

    #[test]
    fn build_rejects_blank_length_key() {
        assert!(SequenceConfigBuilder::new().length_key("  ").build().is_err());
    }

    #[test]
    fn from_line_takes_declared_settings() {
        let line = LineDescription::parse(
            "name = \"l\"\nreference-placement = \"exit\"\nlength-key = \"XL\"\n",
            "inline",
        )
        .unwrap();
        let config = SequenceConfigBuilder::from_line(&line).build().unwrap();
        assert_eq!(config.reference_placement, ReferencePlacement::Exit);
        assert_eq!(config.element_keys.length, "XL");
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
