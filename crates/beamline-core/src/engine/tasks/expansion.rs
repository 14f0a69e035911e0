use crate::core::models::element::{Element, ElementKind};
use crate::core::models::placement::{PlacementRecord, Positions};
use crate::core::units::Length;
use crate::engine::context::SequenceContext;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub const DRIFT_PREFIX: &str = "DRIFT_";

#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub records: Vec<PlacementRecord>,
    pub inserted: usize,
}

/// Interleaves drift fillers between the placed records so that the line is gap-free.
///
/// A running cursor starts at zero. A gap larger than the configured epsilon
/// between the cursor and a record's entry is closed by a drift named after
/// that record. Records with an undefined entry sit at the cursor and push it
/// forward by their length when it is known.
///
/// Drift names never collide with a name already in the sequence: when
/// `DRIFT_<name>` is taken, the first free `DRIFT_<name>_<n>` (n = 1, 2, ...) is used.
#[instrument(skip_all, name = "expansion_task", fields(sequence = context.sequence))]
pub fn run(context: &SequenceContext, drift_kind: ElementKind) -> Expansion {
    let epsilon = context.config.drift_epsilon;
    let length_key = context.config.element_keys.length.as_str();

    let mut records = Vec::with_capacity(context.placed.len());
    let mut inserted = 0;
    let mut cursor = Length::ZERO;
    let taken: HashSet<&str> = context.placed.iter().map(PlacementRecord::name).collect();
    let mut drift_names: HashSet<String> = HashSet::new();

    for record in context.placed {
        match record.entry() {
            Some(entry) => {
                let gap = entry - cursor;
                if gap > epsilon {
                    let name = unique_drift_name(record.name(), &taken, &drift_names);
                    drift_names.insert(name.clone());
                    debug!(drift = %name, length = %gap, "Closing gap with a drift.");
                    let drift = Element::drift(&name, drift_kind, length_key, gap);
                    records.push(PlacementRecord::new(
                        Arc::new(drift),
                        Positions {
                            entry: Some(cursor),
                            center: Some(cursor + gap / 2.0),
                            exit: Some(entry),
                        },
                    ));
                    inserted += 1;
                } else if gap < -epsilon {
                    debug!(element = record.name(), overlap = %(-gap), "Element overlaps the previous one.");
                }
                cursor = record.exit().unwrap_or(entry);
            }
            None => {
                if let Some(length) = context.length_of(record.element()) {
                    cursor += length;
                }
            }
        }
        records.push(record.clone());
    }

    info!(inserted, total = records.len(), "Sequence expansion complete.");
    Expansion { records, inserted }
}

fn unique_drift_name(element: &str, taken: &HashSet<&str>, drift_names: &HashSet<String>) -> String {
    let is_free = |candidate: &str| !taken.contains(candidate) && !drift_names.contains(candidate);
    let base = format!("{}{}", DRIFT_PREFIX, element);
    if is_free(&base) {
        return base;
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{}_{}", base, suffix);
        if is_free(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
