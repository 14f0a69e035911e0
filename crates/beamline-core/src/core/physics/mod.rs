//! Particle species and reference-particle kinematics.
//!
//! These are the minimal physical records a sequence needs to describe the
//! beam it transports: a [`particle::ParticleSpecies`] registry keyed by name,
//! and a [`kinematics::Kinematics`] value derived from momentum, total energy
//! or Lorentz factor.

pub mod kinematics;
pub mod particle;
