use super::value::Value;
use crate::core::units::Length;
use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The keyword family of a beamline element.
///
/// Each kind maps to the keyword the tracking engine expects in its input deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    AgsMainMagnet,
    AgsQuadrupole,
    Aimant,
    Bend,
    Decapole,
    Dipole,
    DipoleM,
    Dipoles,
    Dodecapole,
    Drift,
    Emma,
    Ffag,
    FfagSpirale,
    Marker,
    Multipole,
    Octupole,
    Ps170,
    Quadisex,
    Quadrupole,
    SexQuad,
    Sextupole,
    Solenoid,
    Undulator,
    Venus,
}

static KEYWORDS: Map<&'static str, ElementKind> = phf_map! {
    "AGSMM" => ElementKind::AgsMainMagnet,
    "AGSQUAD" => ElementKind::AgsQuadrupole,
    "AIMANT" => ElementKind::Aimant,
    "BEND" => ElementKind::Bend,
    "DECAPOLE" => ElementKind::Decapole,
    "DIPOLE" => ElementKind::Dipole,
    "DIPOLE-M" => ElementKind::DipoleM,
    "DIPOLES" => ElementKind::Dipoles,
    "DODECAPO" => ElementKind::Dodecapole,
    "DODECAPOLE" => ElementKind::Dodecapole,
    "DRIFT" => ElementKind::Drift,
    "ESL" => ElementKind::Drift,
    "EMMA" => ElementKind::Emma,
    "FFAG" => ElementKind::Ffag,
    "FFAG-SPI" => ElementKind::FfagSpirale,
    "MARKER" => ElementKind::Marker,
    "MULTIPOL" => ElementKind::Multipole,
    "MULTIPOLE" => ElementKind::Multipole,
    "OCTUPOLE" => ElementKind::Octupole,
    "PS170" => ElementKind::Ps170,
    "QUADISEX" => ElementKind::Quadisex,
    "QUADRUPO" => ElementKind::Quadrupole,
    "QUADRUPOLE" => ElementKind::Quadrupole,
    "SEXQUAD" => ElementKind::SexQuad,
    "SEXTUPOL" => ElementKind::Sextupole,
    "SEXTUPOLE" => ElementKind::Sextupole,
    "SOLENOID" => ElementKind::Solenoid,
    "UNDULATOR" => ElementKind::Undulator,
    "VENUS" => ElementKind::Venus,
};

impl ElementKind {
    /// The keyword written to the engine's input deck.
    pub fn keyword(self) -> &'static str {
        match self {
            ElementKind::AgsMainMagnet => "AGSMM",
            ElementKind::AgsQuadrupole => "AGSQUAD",
            ElementKind::Aimant => "AIMANT",
            ElementKind::Bend => "BEND",
            ElementKind::Decapole => "DECAPOLE",
            ElementKind::Dipole => "DIPOLE",
            ElementKind::DipoleM => "DIPOLE-M",
            ElementKind::Dipoles => "DIPOLES",
            ElementKind::Dodecapole => "DODECAPO",
            ElementKind::Drift => "DRIFT",
            ElementKind::Emma => "EMMA",
            ElementKind::Ffag => "FFAG",
            ElementKind::FfagSpirale => "FFAG-SPI",
            ElementKind::Marker => "MARKER",
            ElementKind::Multipole => "MULTIPOL",
            ElementKind::Octupole => "OCTUPOLE",
            ElementKind::Ps170 => "PS170",
            ElementKind::Quadisex => "QUADISEX",
            ElementKind::Quadrupole => "QUADRUPO",
            ElementKind::SexQuad => "SEXQUAD",
            ElementKind::Sextupole => "SEXTUPOL",
            ElementKind::Solenoid => "SOLENOID",
            ElementKind::Undulator => "UNDULATOR",
            ElementKind::Venus => "VENUS",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown element keyword '{0}'")]
pub struct ParseElementKindError(pub String);

impl FromStr for ElementKind {
    type Err = ParseElementKindError;

    /// Parses an engine keyword (or a common long-form alias), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KEYWORDS
            .get(s.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| ParseElementKindError(s.to_string()))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A beamline element: a name, a keyword family and a set of named attributes.
///
/// Attributes keep their insertion order, which is also the column order used
/// when a sequence is projected to a table. Sequences share elements through
/// `Arc` and never mutate them.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub kind: ElementKind,
    attributes: Vec<(String, Value)>,
}

impl Element {
    pub fn new(name: &str, kind: ElementKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            attributes: Vec::new(),
        }
    }

    /// Creates a gap filler of the given kind whose length is stored under `length_key`.
    /// The kind is usually [`ElementKind::Drift`].
    pub fn drift(name: &str, kind: ElementKind, length_key: &str, length: Length) -> Self {
        Self::new(name, kind).with(length_key, length)
    }

    /// Builder-style variant of [`Element::set`].
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets an attribute, replacing any previous value under the same key.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reads the length stored under `key`, if present and of length type.
    pub fn length(&self, key: &str) -> Option<Length> {
        self.attribute(key).and_then(Value::as_length)
    }
}
