use crate::core::models::element::{Element, ElementKind, ParseElementKindError};
use crate::core::models::placement::{PlacementHints, ReferencePlacement};
use crate::core::models::value::{Header, Value};
use crate::core::units::{Length, UnitError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

const DEFAULT_LENGTH_KEY: &str = "L";

#[derive(Debug, Error)]
pub enum LineFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid length for '{field}' of element '{element}': {source}")]
    Unit {
        element: String,
        field: String,
        source: UnitError,
    },
    #[error("Element '{element}': {source}")]
    UnknownKind {
        element: String,
        source: ParseElementKindError,
    },
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    fn to_length(&self) -> Result<Length, UnitError> {
        match self {
            Scalar::Number(n) => Ok(Length::meters(*n)),
            Scalar::Text(s) => s.parse(),
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Number(n) => Value::Number(n),
            Scalar::Text(t) => Value::Text(t),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawElement {
    name: String,
    kind: String,
    #[serde(default)]
    attributes: BTreeMap<String, Scalar>,
    at: Option<Scalar>,
    at_entry: Option<Scalar>,
    at_center: Option<Scalar>,
    at_exit: Option<Scalar>,
    following: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawLine {
    name: String,
    reference_placement: Option<ReferencePlacement>,
    length_key: Option<String>,
    #[serde(default)]
    header: BTreeMap<String, Scalar>,
    #[serde(default, rename = "element")]
    elements: Vec<RawElement>,
}

/// An element together with the placement hints it was declared with.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredElement {
    pub element: Element,
    pub hints: PlacementHints,
}

/// A transport line declared in a TOML file, in declaration order.
///
/// ```toml
/// name = "transfer-line"
/// reference-placement = "entry"
///
/// [header]
/// PARTICLE = "proton"
/// PC = 0.25
///
/// [[element]]
/// name = "QF"
/// kind = "QUADRUPO"
/// attributes = { L = "50 cm", B0 = 0.8 }
/// at-entry = 1.0
/// ```
///
/// The attribute named by `length-key` (default `L`) is read as a length; a
/// bare number is taken in metres. Positions follow the same rule.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDescription {
    pub name: String,
    pub reference_placement: Option<ReferencePlacement>,
    pub length_key: Option<String>,
    pub header: Header,
    pub elements: Vec<DeclaredElement>,
}

impl LineDescription {
    pub fn load(path: &Path) -> Result<Self, LineFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| LineFileError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    /// Parses a line description from TOML text. `origin` names the source in errors.
    pub fn parse(content: &str, origin: &str) -> Result<Self, LineFileError> {
        let raw: RawLine = toml::from_str(content).map_err(|e| LineFileError::Toml {
            path: origin.to_string(),
            source: e,
        })?;

        let length_key = raw
            .length_key
            .clone()
            .unwrap_or_else(|| DEFAULT_LENGTH_KEY.to_string());
        let elements = raw
            .elements
            .into_iter()
            .map(|e| convert_element(e, &length_key))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: raw.name,
            reference_placement: raw.reference_placement,
            length_key: raw.length_key,
            header: raw
                .header
                .into_iter()
                .map(|(k, v)| (k, v.into()))
                .collect(),
            elements,
        })
    }
}

fn convert_element(raw: RawElement, length_key: &str) -> Result<DeclaredElement, LineFileError> {
    let kind: ElementKind = raw.kind.parse().map_err(|e| LineFileError::UnknownKind {
        element: raw.name.clone(),
        source: e,
    })?;
    let unit_err = |field: &str, source: UnitError| LineFileError::Unit {
        element: raw.name.clone(),
        field: field.to_string(),
        source,
    };

    let mut element = Element::new(&raw.name, kind);
    for (key, value) in &raw.attributes {
        if key == length_key {
            let length = value.to_length().map_err(|e| unit_err(key.as_str(), e))?;
            element.set(key, length);
        } else {
            element.set(key, Value::from(value.clone()));
        }
    }

    let position = |field: &str, value: &Option<Scalar>| {
        value
            .as_ref()
            .map(|v| v.to_length().map_err(|e| unit_err(field, e)))
            .transpose()
    };
    let hints = PlacementHints {
        at: position("at", &raw.at)?,
        at_entry: position("at-entry", &raw.at_entry)?,
        at_center: position("at-center", &raw.at_center)?,
        at_exit: position("at-exit", &raw.at_exit)?,
        following: raw.following.clone(),
    };

    Ok(DeclaredElement { element, hints })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const LINE: &str = r#"
name = "transfer-line"
reference-placement = "center"

[header]
PARTICLE = "electron"
ENERGY = 1.5

[[element]]
name = "QF"
kind = "QUADRUPO"
attributes = { L = "50 cm", B0 = 0.8 }
at = 1.25

[[element]]
name = "BPM"
kind = "marker"
attributes = { L = 0 }
at-entry = "10 cm"
following = "QF"
"#;

    #[test]
    fn parse_reads_header_elements_and_hints() {
        let line = LineDescription::parse(LINE, "inline").unwrap();
        assert_eq!(line.name, "transfer-line");
        assert_eq!(line.reference_placement, Some(ReferencePlacement::Center));
        assert_eq!(line.header.get("PARTICLE"), Some(&Value::Text("electron".into())));
        assert_eq!(line.header.get("ENERGY"), Some(&Value::Number(1.5)));
        assert_eq!(line.elements.len(), 2);

        let qf = &line.elements[0];
        assert_eq!(qf.element.kind, ElementKind::Quadrupole);
        assert_eq!(qf.element.length("L"), Some(Length::meters(0.5)));
        assert_eq!(qf.element.attribute("B0"), Some(&Value::Number(0.8)));
        assert_eq!(qf.hints.at, Some(Length::meters(1.25)));

        let bpm = &line.elements[1];
        assert_eq!(bpm.element.length("L"), Some(Length::ZERO));
        assert_eq!(bpm.hints.at_entry, Some(Length::meters(0.1)));
        assert_eq!(bpm.hints.following.as_deref(), Some("QF"));
    }

    #[test]
    fn custom_length_key_is_honoured() {
        let content = r#"
name = "l"
length-key = "XL"

[[element]]
name = "D"
kind = "DRIFT"
attributes = { XL = 2, L = "not a length" }
"#;
        let line = LineDescription::parse(content, "inline").unwrap();
        let drift = &line.elements[0].element;
        assert_eq!(drift.length("XL"), Some(Length::meters(2.0)));
        assert_eq!(drift.attribute("L"), Some(&Value::Text("not a length".into())));
    }

    #[test]
    fn invalid_length_names_element_and_field() {
        let content = r#"
name = "l"
[[element]]
name = "Q"
kind = "QUADRUPO"
at-exit = "3 parsecs"
"#;
        match LineDescription::parse(content, "inline") {
            Err(LineFileError::Unit { element, field, .. }) => {
                assert_eq!(element, "Q");
                assert_eq!(field, "at-exit");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let content = "name = \"l\"\n[[element]]\nname = \"W\"\nkind = \"WIGGLER\"\n";
        assert!(matches!(
            LineDescription::parse(content, "inline"),
            Err(LineFileError::UnknownKind { .. })
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let content = "name = \"l\"\nspeed = 3\n";
        assert!(matches!(
            LineDescription::parse(content, "inline"),
            Err(LineFileError::Toml { .. })
        ));
    }

    #[test]
    fn load_reads_from_disk_and_reports_missing_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("line.toml");
        fs::write(&path, LINE).unwrap();
        assert_eq!(LineDescription::load(&path).unwrap().elements.len(), 2);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            LineDescription::load(&missing),
            Err(LineFileError::Io { .. })
        ));
    }
}
