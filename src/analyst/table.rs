//! Tabular parsing and column typing
//!
//! Parses delimited text (comma or semicolon, surrounding whitespace
//! tolerated) into an in-memory [`DataTable`] and classifies each column as
//! numeric or text. Classification is an explicit function with documented
//! fallback rules rather than ad hoc inline inference.

use crate::error::{FreyError, Result};

/// Cell values treated as missing (case-insensitive), besides the empty cell
const MISSING_MARKERS: &[&str] = &["na", "n/a", "null", "nan"];

/// Inferred scalar type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every non-missing value parses as a float, and at least one exists
    Numeric,
    /// Fallback type; also used for the top-values (categorical) report
    Text,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A named column with optional (missing-aware) cell values
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name from the header row
    pub name: String,
    /// Cell values in row order; `None` marks a missing value
    pub values: Vec<Option<String>>,
}

impl Column {
    /// Number of missing values in this column
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Iterate over the non-missing values
    pub fn present_values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().flatten().map(String::as_str)
    }

    /// Non-missing values coerced to floats; only meaningful for numeric columns
    pub fn numeric_values(&self) -> Vec<f64> {
        self.present_values()
            .filter_map(|v| v.parse::<f64>().ok())
            .collect()
    }

    /// Classify this column as numeric or text
    ///
    /// A column is numeric iff it has at least one non-missing value and
    /// every non-missing value coerces to `f64`. Anything else (including a
    /// fully missing column) falls back to text.
    ///
    /// # Examples
    ///
    /// ```
    /// use frey::analyst::table::{Column, ColumnType};
    ///
    /// let col = Column {
    ///     name: "age".to_string(),
    ///     values: vec![Some("30".to_string()), None, Some("25.5".to_string())],
    /// };
    /// assert_eq!(col.column_type(), ColumnType::Numeric);
    /// ```
    pub fn column_type(&self) -> ColumnType {
        let mut seen_any = false;
        for value in self.present_values() {
            seen_any = true;
            if value.parse::<f64>().is_err() {
                return ColumnType::Text;
            }
        }
        if seen_any {
            ColumnType::Numeric
        } else {
            ColumnType::Text
        }
    }
}

/// An in-memory table with named, typed columns
///
/// Invariant: a successfully parsed table has at least one column and at
/// least one data row; anything short of that is a
/// [`FreyError::DataRead`] failure.
#[derive(Debug, Clone)]
pub struct DataTable {
    columns: Vec<Column>,
}

impl DataTable {
    /// Parse delimited text into a table
    ///
    /// The delimiter (`,` or `;`) is detected from the header line.
    /// Surrounding whitespace is trimmed from headers and cells; short rows
    /// are padded with missing values.
    ///
    /// # Errors
    ///
    /// Returns [`FreyError::DataRead`] when the input is empty, contains no
    /// data rows, or cannot be parsed as delimited text.
    pub fn parse_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FreyError::DataRead(
                "input is empty; provide comma- or semicolon-delimited data".to_string(),
            )
            .into());
        }

        let delimiter = detect_delimiter(trimmed);
        tracing::debug!("Parsing tabular input with delimiter {:?}", delimiter as char);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(trimmed.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| FreyError::DataRead(format!("could not parse header row: {}", e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(FreyError::DataRead("header row is empty".to_string()).into());
        }

        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column {
                name,
                values: Vec::new(),
            })
            .collect();

        let mut row_count = 0usize;
        for record in reader.records() {
            let record =
                record.map_err(|e| FreyError::DataRead(format!("malformed row: {}", e)))?;
            // Short rows are padded with missing values, but a row wider
            // than the header would lose cells. Losing data is worse than
            // rejecting the input.
            if record.len() > columns.len() {
                return Err(FreyError::DataRead(format!(
                    "row {} has {} fields but the header has {}",
                    row_count + 1,
                    record.len(),
                    columns.len()
                ))
                .into());
            }
            for (idx, column) in columns.iter_mut().enumerate() {
                let cell = record.get(idx).map(str::trim).unwrap_or("");
                column.values.push(parse_cell(cell));
            }
            row_count += 1;
        }

        if row_count == 0 {
            return Err(FreyError::DataRead(
                "no data rows found below the header".to_string(),
            )
            .into());
        }

        Ok(Self { columns })
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// All columns in header order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns classified as numeric, in header order
    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.column_type() == ColumnType::Numeric)
            .collect()
    }

    /// Columns classified as text, in header order
    pub fn text_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.column_type() == ColumnType::Text)
            .collect()
    }
}

/// Detect the field delimiter from the header line
///
/// Semicolon wins when it outnumbers commas; comma is the fallback, which
/// also covers single-column input.
fn detect_delimiter(input: &str) -> u8 {
    let header = input.lines().next().unwrap_or("");
    let commas = header.matches(',').count();
    let semicolons = header.matches(';').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Interpret a trimmed cell, mapping missing-value markers to `None`
fn parse_cell(cell: &str) -> Option<String> {
    if cell.is_empty() || MISSING_MARKERS.contains(&cell.to_lowercase().as_str()) {
        None
    } else {
        Some(cell.to_string())
    }
}
