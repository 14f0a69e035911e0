use crate::core::models::value::{Header, Value};
use crate::core::physics::kinematics::{Kinematics, KinematicsError};
use crate::core::physics::particle::ParticleSpecies;
use thiserror::Error;
use tracing::{debug, warn};

pub const PARTICLE_FIELD: &str = "PARTICLE";
pub const MOMENTUM_FIELD: &str = "PC";
pub const ENERGY_FIELD: &str = "ENERGY";
pub const GAMMA_FIELD: &str = "GAMMA";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetadataError {
    #[error("Header field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Header field '{field}' has unexpected type {found}")]
    UnexpectedType {
        field: &'static str,
        found: &'static str,
    },
    #[error("Header kinematics are unphysical: {0}")]
    Kinematics(#[from] KinematicsError),
}

/// Particle species and kinematic state attached to a sequence.
///
/// Filled once at construction and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceMetadata {
    header: Option<Header>,
    particle: Option<ParticleSpecies>,
    kinematics: Option<Kinematics>,
}

impl SequenceMetadata {
    /// Infers species and kinematics from a header record.
    ///
    /// `PARTICLE` is capitalized and looked up in the species registry; when it is
    /// absent or unknown the species is the proton. Kinematics come from the first
    /// of `PC` (GeV/c), `ENERGY` (GeV) and `GAMMA` that is present. A present field
    /// that is not a number is an error and later fields are not consulted.
    pub fn from_header(header: Header) -> Result<Self, MetadataError> {
        Self::new(Some(header), None, None)
    }

    /// Builds metadata, inferring from `header` whatever is not given explicitly.
    ///
    /// Inferred kinematics use the explicit species when one is given.
    pub fn new(
        header: Option<Header>,
        particle: Option<ParticleSpecies>,
        kinematics: Option<Kinematics>,
    ) -> Result<Self, MetadataError> {
        let particle = match (particle, &header) {
            (Some(p), _) => Some(p),
            (None, Some(h)) => Some(infer_particle(h)),
            (None, None) => None,
        };
        let kinematics = match (kinematics, &header) {
            (Some(k), _) => Some(k),
            (None, Some(h)) => infer_kinematics(h, particle.unwrap_or_default())?,
            (None, None) => None,
        };
        Ok(Self {
            header,
            particle,
            kinematics,
        })
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn particle(&self) -> Option<ParticleSpecies> {
        self.particle
    }

    pub fn kinematics(&self) -> Option<&Kinematics> {
        self.kinematics.as_ref()
    }
}

fn infer_particle(header: &Header) -> ParticleSpecies {
    let Some(value) = header.get(PARTICLE_FIELD) else {
        debug!("No PARTICLE field in header; assuming the default species.");
        return ParticleSpecies::default();
    };
    let name = value.to_string();
    match ParticleSpecies::lookup(&name) {
        Some(species) => species,
        None => {
            warn!(particle = %name, "Unknown particle species; assuming the default species.");
            ParticleSpecies::default()
        }
    }
}

fn infer_kinematics(
    header: &Header,
    particle: ParticleSpecies,
) -> Result<Option<Kinematics>, MetadataError> {
    if let Some(pc) = number_field(header, MOMENTUM_FIELD)? {
        return Ok(Some(Kinematics::from_momentum(pc, particle)?));
    }
    if let Some(energy) = number_field(header, ENERGY_FIELD)? {
        return Ok(Some(Kinematics::from_total_energy(energy, particle)?));
    }
    if let Some(gamma) = number_field(header, GAMMA_FIELD)? {
        return Ok(Some(Kinematics::from_gamma(gamma, particle)?));
    }
    debug!("Header carries no PC, ENERGY or GAMMA; kinematics left undefined.");
    Ok(None)
}

fn number_field(header: &Header, field: &'static str) -> Result<Option<f64>, MetadataError> {
    match header.get(field) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(*n)),
        Some(Value::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| MetadataError::InvalidNumber {
                field,
                value: text.clone(),
            }),
        Some(other) => Err(MetadataError::UnexpectedType {
            field,
            found: other.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::kinematics::KinematicsSource;
    use crate::core::physics::particle::{ELECTRON, POSITRON, PROTON};
    use crate::core::units::Length;

    fn header(fields: &[(&str, Value)]) -> Header {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn missing_particle_defaults_to_proton() {
        let metadata = SequenceMetadata::from_header(Header::new()).unwrap();
        assert_eq!(metadata.particle(), Some(PROTON));
        assert!(metadata.kinematics().is_none());
    }

    #[test]
    fn particle_name_is_capitalized_before_lookup() {
        let metadata =
            SequenceMetadata::from_header(header(&[("PARTICLE", Value::from("ELECTRON"))])).unwrap();
        assert_eq!(metadata.particle(), Some(ELECTRON));
    }

    #[test]
    fn unknown_particle_falls_back_to_proton() {
        let metadata =
            SequenceMetadata::from_header(header(&[("PARTICLE", Value::from("default"))])).unwrap();
        assert_eq!(metadata.particle(), Some(PROTON));
    }

    #[test]
    fn gamma_alone_drives_kinematics() {
        let metadata = SequenceMetadata::from_header(header(&[("GAMMA", Value::from(2.0))])).unwrap();
        let kinematics = metadata.kinematics().unwrap();
        assert_eq!(kinematics.source(), KinematicsSource::Gamma);
        assert!((kinematics.gamma() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn momentum_wins_over_energy() {
        let metadata = SequenceMetadata::from_header(header(&[
            ("PC", Value::from(0.25)),
            ("ENERGY", Value::from(5.0)),
        ]))
        .unwrap();
        let kinematics = metadata.kinematics().unwrap();
        assert_eq!(kinematics.source(), KinematicsSource::Momentum);
        assert!((kinematics.momentum() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn energy_is_used_when_momentum_is_absent() {
        let metadata = SequenceMetadata::from_header(header(&[
            ("ENERGY", Value::from("1.5")),
            ("GAMMA", Value::from(3.0)),
        ]))
        .unwrap();
        assert_eq!(
            metadata.kinematics().unwrap().source(),
            KinematicsSource::TotalEnergy
        );
    }

    #[test]
    fn malformed_momentum_is_propagated_not_skipped() {
        let err = SequenceMetadata::from_header(header(&[
            ("PC", Value::from("fast")),
            ("GAMMA", Value::from(2.0)),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            MetadataError::InvalidNumber {
                field: "PC",
                value: "fast".to_string()
            }
        );
    }

    #[test]
    fn length_valued_kinematics_field_is_rejected() {
        let err = SequenceMetadata::from_header(header(&[("PC", Value::from(Length::meters(1.0)))]))
            .unwrap_err();
        assert!(matches!(err, MetadataError::UnexpectedType { field: "PC", found: "length" }));
    }

    #[test]
    fn unphysical_values_are_reported() {
        let err = SequenceMetadata::from_header(header(&[("GAMMA", Value::from(0.5))])).unwrap_err();
        assert!(matches!(err, MetadataError::Kinematics(_)));
    }

    #[test]
    fn explicit_values_take_precedence_over_inference() {
        let kinematics = Kinematics::from_momentum(1.0, POSITRON).unwrap();
        let metadata = SequenceMetadata::new(
            Some(header(&[("PARTICLE", Value::from("electron")), ("PC", Value::from(0.1))])),
            Some(POSITRON),
            Some(kinematics),
        )
        .unwrap();
        assert_eq!(metadata.particle(), Some(POSITRON));
        assert_eq!(metadata.kinematics(), Some(&kinematics));
        assert!(metadata.header().is_some());
    }

    #[test]
    fn explicit_particle_is_used_for_inferred_kinematics() {
        let metadata =
            SequenceMetadata::new(Some(header(&[("GAMMA", Value::from(2.0))])), Some(ELECTRON), None)
                .unwrap();
        assert_eq!(metadata.kinematics().unwrap().particle(), ELECTRON);
    }

    #[test]
    fn no_header_means_nothing_is_inferred() {
        let metadata = SequenceMetadata::new(None, None, None).unwrap();
        assert_eq!(metadata, SequenceMetadata::default());
        assert!(metadata.particle().is_none());
    }
}
