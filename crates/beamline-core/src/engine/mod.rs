//! # Engine Module
//!
//! This module implements the placement resolver behind
//! [`PlacementSequence`](crate::sequences::placement::PlacementSequence).
//!
//! ## Overview
//!
//! Placing an element turns a partial set of hints (entry, center, exit, an `at`
//! alias and an optional `following` reference) into three mutually consistent
//! positions. The derivation is repeated until it reaches a fixed point, under an
//! explicit iteration cap so that pathological hints fail instead of looping.
//! Expansion then walks the placed records with a running cursor and inserts drift
//! fillers wherever a gap exceeds the configured epsilon.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Reference placement, attribute keys, iteration cap and epsilon
//! - **Context** ([`context`]) - Read-only view of the sequence handed to each task
//! - **Tasks** ([`tasks`]) - The resolution and expansion passes
//! - **Error Handling** ([`error`]) - Sequence-level failures naming the sequence and element

pub mod config;
pub mod context;
pub mod error;
pub mod tasks;
