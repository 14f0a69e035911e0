use super::element::Element;
use crate::core::units::Length;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Which point of an element a bare `at` hint refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePlacement {
    #[default]
    Entry,
    #[serde(alias = "centre")]
    Center,
    Exit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid reference placement '{0}' (expected entry, center or exit)")]
pub struct ParseReferencePlacementError(pub String);

impl FromStr for ReferencePlacement {
    type Err = ParseReferencePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entry" => Ok(ReferencePlacement::Entry),
            "center" | "centre" => Ok(ReferencePlacement::Center),
            "exit" => Ok(ReferencePlacement::Exit),
            _ => Err(ParseReferencePlacementError(s.to_string())),
        }
    }
}

impl fmt::Display for ReferencePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferencePlacement::Entry => "entry",
            ReferencePlacement::Center => "center",
            ReferencePlacement::Exit => "exit",
        })
    }
}

/// Partial placement information supplied by the caller for one element.
///
/// Any subset may be given. `at` is an alias for whichever point the sequence's
/// [`ReferencePlacement`] selects. With `following`, every position is relative
/// to the exit of the named, previously placed element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementHints {
    pub at: Option<Length>,
    pub at_entry: Option<Length>,
    pub at_center: Option<Length>,
    pub at_exit: Option<Length>,
    pub following: Option<String>,
}

impl PlacementHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, position: Length) -> Self {
        self.at = Some(position);
        self
    }
    pub fn at_entry(mut self, position: Length) -> Self {
        self.at_entry = Some(position);
        self
    }
    pub fn at_center(mut self, position: Length) -> Self {
        self.at_center = Some(position);
        self
    }
    pub fn at_exit(mut self, position: Length) -> Self {
        self.at_exit = Some(position);
        self
    }
    pub fn following(mut self, name: &str) -> Self {
        self.following = Some(name.to_string());
        self
    }

    /// Whether no position at all was supplied.
    pub fn has_no_position(&self) -> bool {
        self.at.is_none()
            && self.at_entry.is_none()
            && self.at_center.is_none()
            && self.at_exit.is_none()
    }
}

/// Entry, center and exit of an element along the line. Any of them may be
/// undefined until the placement has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Positions {
    pub entry: Option<Length>,
    pub center: Option<Length>,
    pub exit: Option<Length>,
}

impl Positions {
    pub fn is_resolved(&self) -> bool {
        self.entry.is_some() && self.center.is_some() && self.exit.is_some()
    }

    pub fn is_undefined(&self) -> bool {
        self.entry.is_none() && self.center.is_none() && self.exit.is_none()
    }
}

/// One placed element. Records are created by the sequence and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    element: Arc<Element>,
    positions: Positions,
}

impl PlacementRecord {
    pub(crate) fn new(element: Arc<Element>, positions: Positions) -> Self {
        Self { element, positions }
    }

    pub fn element(&self) -> &Arc<Element> {
        &self.element
    }

    pub fn name(&self) -> &str {
        &self.element.name
    }

    pub fn positions(&self) -> Positions {
        self.positions
    }

    pub fn entry(&self) -> Option<Length> {
        self.positions.entry
    }

    pub fn center(&self) -> Option<Length> {
        self.positions.center
    }

    pub fn exit(&self) -> Option<Length> {
        self.positions.exit
    }
}
