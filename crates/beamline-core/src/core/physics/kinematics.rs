use super::particle::ParticleSpecies;
use thiserror::Error;

/// Conversion factor between momentum in GeV/c and magnetic rigidity in T·m
/// for a unit charge (the speed of light divided by 1e9).
const GEV_C_TO_TESLA_METER: f64 = 0.299_792_458;

/// The quantity a [`Kinematics`] value was originally derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KinematicsSource {
    Momentum,
    TotalEnergy,
    Gamma,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KinematicsError {
    #[error("{quantity} must be finite (got {value})")]
    NonFinite { quantity: &'static str, value: f64 },
    #[error("Momentum must be non-negative (got {0} GeV/c)")]
    NegativeMomentum(f64),
    #[error("Total energy {energy} GeV is below the rest mass {mass} GeV of {particle}")]
    EnergyBelowRestMass {
        energy: f64,
        mass: f64,
        particle: &'static str,
    },
    #[error("Lorentz factor must be at least 1 (got {0})")]
    GammaBelowUnity(f64),
}

/// The kinematic state of a reference particle.
///
/// Momentum, total energy and Lorentz factor are mutually derivable once the
/// species is known. The value stores momentum and total energy and derives
/// everything else on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    particle: ParticleSpecies,
    momentum: f64,
    total_energy: f64,
    source: KinematicsSource,
}

impl Kinematics {
    /// Builds the state from a momentum in GeV/c.
    pub fn from_momentum(momentum: f64, particle: ParticleSpecies) -> Result<Self, KinematicsError> {
        check_finite("momentum", momentum)?;
        if momentum < 0.0 {
            return Err(KinematicsError::NegativeMomentum(momentum));
        }
        Ok(Self {
            particle,
            momentum,
            total_energy: momentum.hypot(particle.mass),
            source: KinematicsSource::Momentum,
        })
    }

    /// Builds the state from a total energy in GeV.
    pub fn from_total_energy(
        total_energy: f64,
        particle: ParticleSpecies,
    ) -> Result<Self, KinematicsError> {
        check_finite("total energy", total_energy)?;
        if total_energy < particle.mass {
            return Err(KinematicsError::EnergyBelowRestMass {
                energy: total_energy,
                mass: particle.mass,
                particle: particle.name,
            });
        }
        Ok(Self {
            particle,
            momentum: ((total_energy - particle.mass) * (total_energy + particle.mass)).sqrt(),
            total_energy,
            source: KinematicsSource::TotalEnergy,
        })
    }

    /// Builds the state from a dimensionless Lorentz factor.
    pub fn from_gamma(gamma: f64, particle: ParticleSpecies) -> Result<Self, KinematicsError> {
        check_finite("gamma", gamma)?;
        if gamma < 1.0 {
            return Err(KinematicsError::GammaBelowUnity(gamma));
        }
        let total_energy = gamma * particle.mass;
        Ok(Self {
            particle,
            momentum: particle.mass * ((gamma - 1.0) * (gamma + 1.0)).sqrt(),
            total_energy,
            source: KinematicsSource::Gamma,
        })
    }

    pub fn particle(&self) -> ParticleSpecies {
        self.particle
    }

    pub fn source(&self) -> KinematicsSource {
        self.source
    }

    /// Momentum in GeV/c.
    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Total energy in GeV.
    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    /// Kinetic energy in GeV.
    pub fn kinetic_energy(&self) -> f64 {
        self.total_energy - self.particle.mass
    }

    pub fn gamma(&self) -> f64 {
        self.total_energy / self.particle.mass
    }

    pub fn beta(&self) -> f64 {
        self.momentum / self.total_energy
    }

    /// Magnetic rigidity in T·m.
    pub fn brho(&self) -> f64 {
        self.momentum / (GEV_C_TO_TESLA_METER * self.particle.charge.abs())
    }
}

fn check_finite(quantity: &'static str, value: f64) -> Result<(), KinematicsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(KinematicsError::NonFinite { quantity, value })
    }
}
