use super::config::SequenceConfig;
use crate::core::models::element::Element;
use crate::core::models::placement::PlacementRecord;
use crate::core::units::Length;

/// Read-only view of a sequence handed to the engine tasks.
#[derive(Debug, Clone, Copy)]
pub struct SequenceContext<'a> {
    pub sequence: &'a str,
    pub config: &'a SequenceConfig,
    pub placed: &'a [PlacementRecord],
}

impl<'a> SequenceContext<'a> {
    pub fn new(sequence: &'a str, config: &'a SequenceConfig, placed: &'a [PlacementRecord]) -> Self {
        Self {
            sequence,
            config,
            placed,
        }
    }

    /// Reads an element's length through the configured attribute name.
    pub fn length_of(&self, element: &Element) -> Option<Length> {
        element.length(&self.config.element_keys.length)
    }

    /// The record with the given name. Names are unique within a sequence.
    pub fn find(&self, name: &str) -> Option<&'a PlacementRecord> {
        self.placed.iter().find(|r| r.name() == name)
    }
}
