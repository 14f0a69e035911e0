use super::Sequence;
use super::metadata::SequenceMetadata;
use crate::core::io::line::LineDescription;
use crate::core::models::element::{Element, ElementKind};
use crate::core::models::placement::{PlacementHints, PlacementRecord};
use crate::core::models::table::{NAME_COLUMN, SequenceTable};
use crate::core::models::value::Value;
use crate::engine::config::SequenceConfig;
use crate::engine::context::SequenceContext;
use crate::engine::error::SequenceError;
use crate::engine::tasks::{expansion, resolution};
use std::sync::Arc;
use tracing::{info, instrument};

pub const KEYWORD_COLUMN: &str = "KEYWORD";
pub const AT_ENTRY_COLUMN: &str = "AT_ENTRY";
pub const AT_CENTER_COLUMN: &str = "AT_CENTER";
pub const AT_EXIT_COLUMN: &str = "AT_EXIT";

/// A sequence assembled by placing elements one at a time.
///
/// Insertion order is line order; records are never reordered. Elements are
/// shared through `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct PlacementSequence {
    name: String,
    metadata: SequenceMetadata,
    config: SequenceConfig,
    records: Vec<PlacementRecord>,
}

impl PlacementSequence {
    pub fn new(name: &str, metadata: SequenceMetadata, config: SequenceConfig) -> Self {
        Self {
            name: name.to_string(),
            metadata,
            config,
            records: Vec::new(),
        }
    }

    /// Builds a sequence from a line description, placing its elements in declaration order.
    ///
    /// Metadata is inferred from the description's header. The `reference-placement`
    /// and `length-key` the file declares are not applied here; seed the configuration
    /// with [`SequenceConfigBuilder::from_line`](crate::engine::config::SequenceConfigBuilder::from_line)
    /// to honour them.
    #[instrument(skip_all, name = "sequence_from_line", fields(sequence = %line.name))]
    pub fn from_line(line: LineDescription, config: SequenceConfig) -> Result<Self, SequenceError> {
        let metadata =
            SequenceMetadata::from_header(line.header).map_err(|source| SequenceError::Metadata {
                sequence: line.name.clone(),
                source,
            })?;
        let mut sequence = Self::new(&line.name, metadata, config);
        for declared in line.elements {
            sequence.place(Arc::new(declared.element), declared.hints)?;
        }
        info!(elements = sequence.len(), "Sequence built from line description.");
        Ok(sequence)
    }

    /// Resolves the element's positions from `hints` and appends its record.
    ///
    /// With no position hint the record is appended with undefined positions.
    pub fn place(
        &mut self,
        element: Arc<Element>,
        hints: PlacementHints,
    ) -> Result<&PlacementRecord, SequenceError> {
        let context = SequenceContext::new(&self.name, &self.config, &self.records);
        let positions = resolution::run(&context, &element, &hints)?;
        self.records.push(PlacementRecord::new(element, positions));
        Ok(&self.records[self.records.len() - 1])
    }

    /// Inserts drifts of kind `drift_kind` into every gap wider than the configured epsilon.
    ///
    /// Calling it again on an expanded sequence changes nothing.
    pub fn expand(&mut self, drift_kind: ElementKind) -> &mut Self {
        self.expand_counted(drift_kind);
        self
    }

    /// Same as [`expand`](Self::expand), returning the number of drifts inserted.
    pub fn expand_counted(&mut self, drift_kind: ElementKind) -> usize {
        let context = SequenceContext::new(&self.name, &self.config, &self.records);
        let expanded = expansion::run(&context, drift_kind);
        self.records = expanded.records;
        expanded.inserted
    }

    pub fn records(&self) -> &[PlacementRecord] {
        &self.records
    }

    pub fn get(&self, name: &str) -> Option<&PlacementRecord> {
        SequenceContext::new(&self.name, &self.config, &self.records).find(name)
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Sequence for PlacementSequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &SequenceMetadata {
        &self.metadata
    }

    /// Columns are `NAME`, `KEYWORD`, the union of element attributes in
    /// first-seen order, then `AT_ENTRY`, `AT_CENTER` and `AT_EXIT`.
    fn to_table(&self) -> SequenceTable {
        let mut columns: Vec<&str> = vec![NAME_COLUMN, KEYWORD_COLUMN];
        for record in &self.records {
            for (key, _) in record.element().attributes() {
                if !columns.contains(&key) {
                    columns.push(key);
                }
            }
        }
        columns.extend([AT_ENTRY_COLUMN, AT_CENTER_COLUMN, AT_EXIT_COLUMN]);

        let mut table = SequenceTable::with_columns(&self.name, &columns);
        for record in &self.records {
            let element = record.element();
            let mut cells: Vec<(&str, Value)> = vec![
                (NAME_COLUMN, Value::from(element.name.as_str())),
                (KEYWORD_COLUMN, Value::from(element.kind.keyword())),
            ];
            cells.extend(element.attributes().map(|(k, v)| (k, v.clone())));
            let positions = [
                (AT_ENTRY_COLUMN, record.entry()),
                (AT_CENTER_COLUMN, record.center()),
                (AT_EXIT_COLUMN, record.exit()),
            ];
            cells.extend(
                positions
                    .into_iter()
                    .filter_map(|(column, p)| p.map(|p| (column, Value::from(p)))),
            );
            table.push_row(cells);
        }
        table
    }
}
