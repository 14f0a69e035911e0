use crate::core::models::element::Element;
use crate::core::models::placement::{PlacementHints, Positions, ReferencePlacement};
use crate::core::units::Length;
use crate::engine::context::SequenceContext;
use crate::engine::error::SequenceError;
use tracing::{debug, instrument, warn};

/// How a `following` reference affected the supplied hints.
#[derive(Debug, Clone, PartialEq)]
pub enum FollowingShift {
    /// No `following` was given; hints are absolute.
    Absolute,
    /// Hints were shifted by the exit of the referenced element.
    Applied(Length),
    /// No element with that name has been placed; hints are taken as absolute.
    UnknownReference(String),
    /// The referenced element has no resolved exit; hints are taken as absolute.
    UnresolvedReference(String),
}

impl FollowingShift {
    pub fn offset(&self) -> Length {
        match self {
            FollowingShift::Applied(offset) => *offset,
            _ => Length::ZERO,
        }
    }
}

/// Resolves the entry, center and exit of `element` from the caller's hints.
///
/// Returns undefined positions when no hint was supplied.
#[instrument(skip_all, name = "placement_resolution_task", fields(sequence = context.sequence, element = %element.name))]
pub fn run(
    context: &SequenceContext,
    element: &Element,
    hints: &PlacementHints,
) -> Result<Positions, SequenceError> {
    if context.find(&element.name).is_some() {
        return Err(SequenceError::DuplicateElement {
            sequence: context.sequence.to_string(),
            element: element.name.clone(),
        });
    }

    if hints.has_no_position() {
        debug!("No position hint supplied; placement left undefined.");
        return Ok(Positions::default());
    }

    let shift = following_shift(context, hints.following.as_deref());
    match &shift {
        FollowingShift::Absolute => {}
        FollowingShift::Applied(offset) => debug!(offset = %offset, "Hints are relative to a preceding element."),
        FollowingShift::UnknownReference(name) => warn!(
            following = %name,
            "No element with this name has been placed; hints are taken as absolute."
        ),
        FollowingShift::UnresolvedReference(name) => warn!(
            following = %name,
            "Referenced element has no resolved exit; hints are taken as absolute."
        ),
    }

    let seed = anchor(hints, context.config.reference_placement, shift.offset());
    let length = context.length_of(element);
    if length.is_none() && !seed.is_resolved() {
        return Err(SequenceError::MissingLength {
            sequence: context.sequence.to_string(),
            element: element.name.clone(),
            key: context.config.element_keys.length.clone(),
        });
    }

    let (positions, iterations) = converge(seed, length, context.config.max_iterations).ok_or_else(
        || SequenceError::Unresolvable {
            sequence: context.sequence.to_string(),
            element: element.name.clone(),
            iterations: context.config.max_iterations,
        },
    )?;
    debug!(iterations, "Placement reached a fixed point.");

    if let Some(length) = length {
        if !is_consistent(&positions, length, context.config.drift_epsilon) {
            return Err(SequenceError::InconsistentPlacement {
                sequence: context.sequence.to_string(),
                element: element.name.clone(),
            });
        }
    }

    Ok(positions)
}

fn following_shift(context: &SequenceContext, following: Option<&str>) -> FollowingShift {
    let Some(name) = following else {
        return FollowingShift::Absolute;
    };
    match context.find(name) {
        None => FollowingShift::UnknownReference(name.to_string()),
        Some(record) => match record.exit() {
            Some(exit) => FollowingShift::Applied(exit),
            None => FollowingShift::UnresolvedReference(name.to_string()),
        },
    }
}

/// Builds the starting positions from the hints. `at` overrides the explicit
/// hint of the point the reference placement selects.
fn anchor(hints: &PlacementHints, reference: ReferencePlacement, offset: Length) -> Positions {
    let mut seed = Positions {
        entry: hints.at_entry,
        center: hints.at_center,
        exit: hints.at_exit,
    };
    if let Some(at) = hints.at {
        match reference {
            ReferencePlacement::Entry => seed.entry = Some(at),
            ReferencePlacement::Center => seed.center = Some(at),
            ReferencePlacement::Exit => seed.exit = Some(at),
        }
    }
    Positions {
        entry: seed.entry.map(|p| p + offset),
        center: seed.center.map(|p| p + offset),
        exit: seed.exit.map(|p| p + offset),
    }
}

/// One derivation pass. Entry is derived first (from center, then exit), so
/// that center and exit are always computed from an entry when one exists.
fn derive(current: Positions, length: Option<Length>) -> Positions {
    let Some(length) = length else {
        return current;
    };
    let half = length / 2.0;

    let entry = current.entry.or_else(|| {
        current
            .center
            .map(|c| c - half)
            .or_else(|| current.exit.map(|x| x - length))
    });
    let center = current
        .center
        .or_else(|| entry.map(|e| e + half))
        .or_else(|| current.exit.map(|x| x - half));
    let exit = current
        .exit
        .or_else(|| entry.map(|e| e + length))
        .or_else(|| center.map(|c| c + half));

    Positions { entry, center, exit }
}

/// Applies [`derive`] until two successive passes agree, at most `max_iterations` times.
///
/// Returns the fixed point together with the number of passes it took.
fn converge(
    seed: Positions,
    length: Option<Length>,
    max_iterations: usize,
) -> Option<(Positions, usize)> {
    let mut current = seed;
    for iteration in 1..=max_iterations {
        let next = derive(current, length);
        if next == current {
            return Some((current, iteration));
        }
        current = next;
    }
    None
}

fn is_consistent(positions: &Positions, length: Length, tolerance: Length) -> bool {
    let (Some(entry), Some(center), Some(exit)) = (positions.entry, positions.center, positions.exit)
    else {
        return true;
    };
    center.approx_eq(entry + length / 2.0, tolerance) && exit.approx_eq(entry + length, tolerance)
}
