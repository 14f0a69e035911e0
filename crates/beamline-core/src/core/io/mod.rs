//! Provides input/output for lattice descriptions.
//!
//! This module reads the two file formats a sequence can be built from: the
//! column-oriented TFS tables produced by lattice codes, and the TOML line
//! descriptions used to declare a placement sequence by hand. Writing the
//! projected table goes through [`crate::core::models::table::SequenceTable`].

pub mod line;
pub mod tfs;
