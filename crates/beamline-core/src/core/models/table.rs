use super::value::Value;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Column used as the row label for lookups and slicing.
pub const NAME_COLUMN: &str = "NAME";

#[derive(Debug, Error)]
pub enum TableError {
    #[error("No row labelled '{0}' in table")]
    UnknownLabel(String),
    #[error("No column named '{0}' in table")]
    UnknownColumn(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A named, column-ordered table with one row per element.
///
/// This is the hand-off artifact between a sequence and whatever writes the
/// tracking engine's input deck. Cells may be empty, e.g. when a row's element
/// lacks an attribute another row has, or when a placement is undefined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SequenceTable {
    pub name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Option<Value>>>,
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    cells: &'a [Option<Value>],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let cells = self.cells;
        let idx = self.columns.iter().position(|c| c == column)?;
        cells.get(idx).and_then(Option::as_ref)
    }

    /// The row label, read from the [`NAME_COLUMN`] cell.
    pub fn label(&self) -> Option<&'a str> {
        self.get(NAME_COLUMN).and_then(Value::as_text)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&'a str, Option<&'a Value>)> + 'a {
        let (columns, cells) = (self.columns, self.cells);
        columns
            .iter()
            .map(String::as_str)
            .zip(cells.iter().map(Option::as_ref))
    }
}

impl SequenceTable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Creates an empty table with a fixed initial column order.
    pub fn with_columns<S: AsRef<str>>(name: &str, columns: &[S]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row. Columns not seen before are appended to the column list
    /// and left empty in every earlier row.
    pub fn push_row<K, I>(&mut self, cells: I)
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut row = vec![None; self.columns.len()];
        for (column, value) in cells {
            let column = column.as_ref();
            let idx = match self.columns.iter().position(|c| c == column) {
                Some(idx) => idx,
                None => {
                    self.columns.push(column.to_string());
                    for existing in &mut self.rows {
                        existing.push(None);
                    }
                    row.push(None);
                    self.columns.len() - 1
                }
            };
            row[idx] = Some(value);
        }
        self.rows.push(row);
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row {
            columns: &self.columns,
            cells,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row {
            columns: &self.columns,
            cells,
        })
    }

    pub fn get(&self, index: usize, column: &str) -> Option<&Value> {
        self.row(index).and_then(|r| r.get(column))
    }

    /// Index of the first row whose label equals `label`.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.rows().position(|r| r.label() == Some(label))
    }

    pub fn row_by_label(&self, label: &str) -> Option<Row<'_>> {
        self.position(label).and_then(|i| self.row(i))
    }

    /// Returns the rows between two labels, both ends included.
    ///
    /// A missing bound means "from the first row" or "to the last row". When
    /// `from` comes after `to` the result is empty.
    pub fn slice(&self, from: Option<&str>, to: Option<&str>) -> Result<Self, TableError> {
        let start = match from {
            Some(label) => self
                .position(label)
                .ok_or_else(|| TableError::UnknownLabel(label.to_string()))?,
            None => 0,
        };
        let end = match to {
            Some(label) => self
                .position(label)
                .ok_or_else(|| TableError::UnknownLabel(label.to_string()))?
                + 1,
            None => self.rows.len(),
        };
        let rows = if start < end {
            self.rows[start..end].to_vec()
        } else {
            Vec::new()
        };
        Ok(Self {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Projects the table onto the given columns, in the given order.
    ///
    /// The [`NAME_COLUMN`] is always kept as the first column when the table has one.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Result<Self, TableError> {
        let mut wanted: Vec<&str> = Vec::with_capacity(columns.len() + 1);
        if self.columns.iter().any(|c| c == NAME_COLUMN) {
            wanted.push(NAME_COLUMN);
        }
        for c in columns {
            let c = c.as_ref();
            if !wanted.contains(&c) {
                wanted.push(c);
            }
        }
        let indices = wanted
            .iter()
            .map(|c| {
                self.columns
                    .iter()
                    .position(|existing| existing.as_str() == *c)
                    .ok_or_else(|| TableError::UnknownColumn(c.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: self.name.clone(),
            columns: wanted.iter().map(|c| c.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    /// Writes the table as CSV with a header row. Lengths are written in metres
    /// and empty cells as empty fields.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(
                row.iter()
                    .map(|cell| cell.as_ref().map(Value::to_cell).unwrap_or_default()),
            )?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let file = std::fs::File::create(path).map_err(csv::Error::from)?;
        self.write_csv(std::io::BufWriter::new(file))
    }
}
