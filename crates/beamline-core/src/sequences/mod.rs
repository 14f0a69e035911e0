//! # Sequences Module
//!
//! The user-facing layer. A sequence is a named, ordered collection of placed
//! elements with attached [`metadata::SequenceMetadata`], projectable to a
//! [`SequenceTable`] that an input-deck writer consumes.
//!
//! - [`placement::PlacementSequence`] - Built element by element from partial placement hints
//! - [`twiss::TwissSequence`] - Backed by a pre-resolved lattice table read from a TFS file
//! - [`metadata`] - Particle species and kinematics inferred from a header record

pub mod metadata;
pub mod placement;
pub mod twiss;

use crate::core::models::table::{Row, SequenceTable};
use crate::core::physics::kinematics::Kinematics;
use crate::core::physics::particle::ParticleSpecies;
use metadata::SequenceMetadata;

/// Behavior shared by every kind of sequence.
pub trait Sequence {
    fn name(&self) -> &str;

    fn metadata(&self) -> &SequenceMetadata;

    /// Projects the sequence to a table with one row per element, in line order.
    fn to_table(&self) -> SequenceTable;

    fn particle(&self) -> Option<ParticleSpecies> {
        self.metadata().particle()
    }

    fn kinematics(&self) -> Option<&Kinematics> {
        self.metadata().kinematics()
    }

    /// Maps `f` over every row of the tabular projection.
    fn apply<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(Row<'_>) -> T,
        Self: Sized,
    {
        self.to_table().rows().map(f).collect()
    }
}
