//! Computational passes run by a placement sequence.
//!
//! Each submodule exposes a `run` function taking a [`SequenceContext`](super::context::SequenceContext):
//! resolution derives the positions of one element about to be placed, and expansion
//! rebuilds the whole record list with drift fillers in its gaps.

pub mod expansion;
pub mod resolution;
