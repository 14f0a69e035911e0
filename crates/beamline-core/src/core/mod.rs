//! # Core Module
//!
//! This module provides the fundamental building blocks used by every sequence
//! in the library: quantities, particle physics, element models and file I/O.
//!
//! ## Overview
//!
//! The core module is stateless. It defines what an element is, how positions
//! and lengths are represented, how a reference particle is described, and how
//! lattice data is read from and written to disk. Nothing here knows how a
//! sequence is resolved; that belongs to [`crate::engine`].
//!
//! ## Architecture
//!
//! - **Quantities** ([`units`]) - The `Length` type used for every position and length
//! - **Particle Physics** ([`physics`]) - Species registry and kinematic state
//! - **Beamline Representation** ([`models`]) - Elements, placement records, values and tables
//! - **File I/O** ([`io`]) - TFS tables and TOML line descriptions
//!
//! ## Key Capabilities
//!
//! - **Unit-aware length literals** such as `"35 cm"` or `"1.2 m"`
//! - **Case-insensitive keyword and species lookup** through static maps
//! - **Label-indexed tables** with inclusive slicing and CSV export

pub mod io;
pub mod models;
pub mod physics;
pub mod units;
