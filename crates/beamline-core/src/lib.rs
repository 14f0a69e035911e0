//! # Beamline Core Library
//!
//! A library for assembling particle-transport lines ("sequences" of magnetic and
//! electric elements) and handing them, in tabular form, to an external tracking code.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that data, algorithms and the
//! user-facing API can evolve independently.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Element`, `Length`,
//!   `SequenceTable`), particle species and kinematics, and file I/O for TFS tables
//!   and TOML line descriptions.
//!
//! - **[`engine`]: The Logic Core.** The placement resolver. It holds the sequence
//!   configuration, the error taxonomy, the bounded fixed-point derivation of
//!   entry/center/exit positions and the drift-inserting expansion pass.
//!
//! - **[`sequences`]: The Public API.** The [`sequences::Sequence`] trait and its two
//!   implementations: [`sequences::placement::PlacementSequence`], built element by
//!   element, and [`sequences::twiss::TwissSequence`], backed by a pre-resolved
//!   lattice table.
//!
//! ```
//! use std::sync::Arc;
//! use beamline::core::models::element::{Element, ElementKind};
//! use beamline::core::models::placement::PlacementHints;
//! use beamline::core::units::Length;
//! use beamline::engine::config::SequenceConfig;
//! use beamline::sequences::metadata::SequenceMetadata;
//! use beamline::sequences::placement::PlacementSequence;
//! use beamline::sequences::Sequence;
//!
//! let qf = Arc::new(Element::new("QF", ElementKind::Quadrupole).with("L", Length::meters(2.0)));
//! let qd = Arc::new(Element::new("QD", ElementKind::Quadrupole).with("L", Length::meters(2.0)));
//!
//! let mut line = PlacementSequence::new("LINE", SequenceMetadata::default(), SequenceConfig::default());
//! line.place(qf, PlacementHints::new().at_entry(Length::meters(0.0))).unwrap();
//! line.place(qd, PlacementHints::new().at_entry(Length::meters(5.0))).unwrap();
//! line.expand(ElementKind::Drift);
//!
//! assert_eq!(line.to_table().len(), 3);
//! ```

pub mod core;
pub mod engine;
pub mod sequences;
