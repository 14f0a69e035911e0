//! # Core Models Module
//!
//! Data structures describing what a transport line is made of.
//!
//! - [`element`] - Beamline elements, their keyword families and attributes
//! - [`placement`] - Placement hints, resolved positions and placement records
//! - [`value`] - Typed attribute values shared by elements, headers and tables
//! - [`table`] - The tabular projection of a sequence handed to input-deck writers
//!
//! ```ignore
//! use beamline::core::models::element::{Element, ElementKind};
//! use beamline::core::units::Length;
//!
//! let qf = Element::new("QF", ElementKind::Quadrupole).with("L", Length::meters(0.5));
//! ```

pub mod element;
pub mod placement;
pub mod table;
pub mod value;
