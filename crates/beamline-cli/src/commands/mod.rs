pub mod expand;
pub mod twiss;

use crate::error::Result;
use beamline::core::models::table::SequenceTable;
use std::path::Path;
use tracing::info;

/// Writes the table as CSV to `output`, or to standard output when none is given.
pub(crate) fn write_table(table: &SequenceTable, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            table.write_csv_path(path)?;
            info!("Wrote {} row(s) to {:?}", table.len(), path);
            println!("Table with {} row(s) written to: {}", table.len(), path.display());
        }
        None => table.write_csv(std::io::stdout().lock())?,
    }
    Ok(())
}
