use crate::core::models::table::SequenceTable;
use crate::core::models::value::{Header, Value};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// The parsed content of a TFS file: its `@` header and its data table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TfsData {
    pub header: Header,
    pub table: SequenceTable,
}

#[derive(Debug, Error)]
pub enum TfsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: TfsParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum TfsParseErrorKind {
    #[error("Header line must read '@ KEY %type value'")]
    MalformedHeader,
    #[error("Unsupported TFS type '{0}'")]
    UnknownType(String),
    #[error("Invalid number in column '{column}' (value: '{value}')")]
    InvalidNumber { column: String, value: String },
    #[error("Row has {found} fields but {expected} columns were declared")]
    ColumnCountMismatch { expected: usize, found: usize },
    #[error("Unterminated quoted string")]
    UnterminatedQuote,
    #[error("Column types ('$') declared before column names ('*')")]
    TypesBeforeColumns,
    #[error("Data row found before the column declarations")]
    RowBeforeColumns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Number,
    Text,
}

fn parse_type(raw: &str) -> Option<ColumnType> {
    let raw = raw.trim_start_matches('%');
    if raw.ends_with('s') {
        Some(ColumnType::Text)
    } else if raw.ends_with("le") || raw.ends_with("lf") || raw.ends_with('d') {
        Some(ColumnType::Number)
    } else {
        None
    }
}

/// Splits a line on whitespace, keeping double-quoted strings together and
/// removing their quotes.
fn tokenize(line: &str) -> Result<Vec<String>, TfsParseErrorKind> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut token = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => token.push(ch),
                    None => return Err(TfsParseErrorKind::UnterminatedQuote),
                }
            }
            tokens.push(token);
        } else {
            let mut token = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
            tokens.push(token);
        }
    }
    Ok(tokens)
}

fn split_first_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    let end = s.find(char::is_whitespace)?;
    Some((&s[..end], &s[end..]))
}

fn parse_cell(column: &str, ty: ColumnType, raw: String) -> Result<Value, TfsParseErrorKind> {
    match ty {
        ColumnType::Text => Ok(Value::Text(raw)),
        ColumnType::Number => raw
            .parse()
            .map(Value::Number)
            .map_err(|_| TfsParseErrorKind::InvalidNumber {
                column: column.to_string(),
                value: raw,
            }),
    }
}

fn parse_header_line(line: &str) -> Result<(String, Value), TfsParseErrorKind> {
    let rest = &line[1..];
    let (key, rest) = split_first_word(rest).ok_or(TfsParseErrorKind::MalformedHeader)?;
    let (ty_raw, value) = split_first_word(rest).ok_or(TfsParseErrorKind::MalformedHeader)?;
    let ty = parse_type(ty_raw).ok_or_else(|| TfsParseErrorKind::UnknownType(ty_raw.into()))?;
    let mut tokens = tokenize(value)?;
    let raw = match tokens.len() {
        0 => String::new(),
        1 => tokens.remove(0),
        _ => tokens.join(" "),
    };
    Ok((key.to_string(), parse_cell(key, ty, raw)?))
}

/// Reader for the TFS lattice-table format written by MAD-X (`twiss`, `survey`, ...).
pub struct TfsFile;

impl TfsFile {
    /// Reads a TFS file from a buffered reader.
    ///
    /// Only the listed `columns` are kept when a selection is given; the
    /// `NAME` column is always kept so that rows stay addressable by label.
    pub fn read_from(
        reader: &mut impl BufRead,
        columns: Option<&[&str]>,
    ) -> Result<TfsData, TfsError> {
        let mut header = Header::new();
        let mut names: Option<Vec<String>> = None;
        let mut types: Option<Vec<ColumnType>> = None;
        let mut table = SequenceTable::new("");

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let parse_err = |kind| TfsError::Parse {
                line: line_num,
                kind,
            };

            match trimmed.chars().next() {
                Some('@') => {
                    let (key, value) = parse_header_line(trimmed).map_err(parse_err)?;
                    header.insert(key, value);
                }
                Some('*') => {
                    let declared = tokenize(&trimmed[1..]).map_err(parse_err)?;
                    table = SequenceTable::with_columns("", declared.as_slice());
                    names = Some(declared);
                }
                Some('$') => {
                    let Some(declared_names) = &names else {
                        return Err(parse_err(TfsParseErrorKind::TypesBeforeColumns));
                    };
                    let expected = declared_names.len();
                    let declared = tokenize(&trimmed[1..])
                        .map_err(parse_err)?
                        .iter()
                        .map(|t| {
                            parse_type(t).ok_or_else(|| TfsParseErrorKind::UnknownType(t.clone()))
                        })
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(parse_err)?;
                    if declared.len() != expected {
                        return Err(parse_err(TfsParseErrorKind::ColumnCountMismatch {
                            expected,
                            found: declared.len(),
                        }));
                    }
                    types = Some(declared);
                }
                _ => {
                    let (Some(names), Some(types)) = (&names, &types) else {
                        return Err(parse_err(TfsParseErrorKind::RowBeforeColumns));
                    };
                    let fields = tokenize(trimmed).map_err(parse_err)?;
                    if fields.len() != names.len() {
                        return Err(parse_err(TfsParseErrorKind::ColumnCountMismatch {
                            expected: names.len(),
                            found: fields.len(),
                        }));
                    }
                    let cells = names
                        .iter()
                        .zip(types.iter())
                        .zip(fields)
                        .map(|((name, ty), raw)| {
                            parse_cell(name, *ty, raw).map(|value| (name.as_str(), value))
                        })
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(parse_err)?;
                    table.push_row(cells);
                }
            }
        }

        if names.is_none() {
            return Err(TfsError::MissingRecord("column names ('*')".into()));
        }
        if types.is_none() {
            return Err(TfsError::MissingRecord("column types ('$')".into()));
        }

        table.name = header
            .get("NAME")
            .and_then(Value::as_text)
            .unwrap_or_default()
            .to_string();

        if let Some(selection) = columns {
            table = table.select(selection).map_err(|e| {
                TfsError::MissingRecord(format!("requested column selection: {}", e))
            })?;
        }

        Ok(TfsData { header, table })
    }

    pub fn read_from_path<P: AsRef<Path>>(
        path: P,
        columns: Option<&[&str]>,
    ) -> Result<TfsData, TfsError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, columns)
    }
}
