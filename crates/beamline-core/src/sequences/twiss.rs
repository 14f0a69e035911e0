use super::Sequence;
use super::metadata::{MetadataError, SequenceMetadata};
use crate::core::io::tfs::{TfsError, TfsFile};
use crate::core::models::table::{SequenceTable, TableError};
use crate::core::models::value::{Header, Value};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum TwissError {
    #[error("Failed to read Twiss table: {0}")]
    Tfs(#[from] TfsError),
    #[error("Invalid Twiss header: {0}")]
    Metadata(#[from] MetadataError),
    #[error("No element named '{0}' in the Twiss table")]
    UnknownElement(String),
    #[error("Twiss table error: {0}")]
    Table(#[from] TableError),
}

/// A sequence backed by a lattice table whose positions are already resolved.
///
/// Rows are kept exactly as read (optionally sliced); nothing is recomputed.
#[derive(Debug, Clone)]
pub struct TwissSequence {
    name: String,
    metadata: SequenceMetadata,
    table: SequenceTable,
}

impl TwissSequence {
    /// Wraps an already parsed header and table.
    ///
    /// `from` and `to` select an inclusive range of rows by their `NAME` label.
    /// The sequence is named after the header's `NAME` field, falling back to
    /// the table's own name.
    pub fn new(
        header: Header,
        table: SequenceTable,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self, TwissError> {
        let table = if from.is_some() || to.is_some() {
            let sliced = table.slice(from, to).map_err(slice_error)?;
            debug!(from, to, rows = sliced.len(), "Twiss table sliced.");
            sliced
        } else {
            table
        };
        let name = header
            .get("NAME")
            .and_then(Value::as_text)
            .map(str::to_string)
            .unwrap_or_else(|| table.name.clone());
        let metadata = SequenceMetadata::from_header(header)?;
        Ok(Self {
            name,
            metadata,
            table,
        })
    }

    /// Loads a TFS file, keeping only `columns` when given.
    #[instrument(skip_all, name = "twiss_from_tfs", fields(path = %path.as_ref().display()))]
    pub fn from_tfs_path<P: AsRef<Path>>(
        path: P,
        columns: Option<&[&str]>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self, TwissError> {
        let data = TfsFile::read_from_path(path.as_ref(), columns)?;
        let sequence = Self::new(data.header, data.table, from, to)?;
        info!(
            sequence = %sequence.name,
            rows = sequence.table.len(),
            "Twiss table loaded."
        );
        Ok(sequence)
    }

    pub fn table(&self) -> &SequenceTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn slice_error(error: TableError) -> TwissError {
    match error {
        TableError::UnknownLabel(label) => TwissError::UnknownElement(label),
        other => TwissError::Table(other),
    }
}

impl Sequence for TwissSequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &SequenceMetadata {
        &self.metadata
    }

    fn to_table(&self) -> SequenceTable {
        self.table.clone()
    }
}
