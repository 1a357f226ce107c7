//! Tabular data summarizer
//!
//! Parses delimited text or a file into a [`table::DataTable`] and derives a
//! textual [`SummaryReport`]: dimensions, column list, data types, numeric
//! statistics, the top values of the first text column, and a missing-value
//! report. The table lives only for the duration of one summarization; only
//! the report string travels onward.
//!
//! Section order is fixed. Sections with nothing to say (no numeric columns,
//! no text columns, no missing values) are omitted entirely rather than
//! rendered empty.

pub mod stats;
pub mod table;

use crate::error::Result;
use std::fmt;
use std::path::Path;
use table::DataTable;

/// Separator between report sections
pub const SECTION_SEPARATOR: &str = "\n---\n";

/// How many top categorical values to report
const TOP_VALUES_LIMIT: usize = 5;

/// An ordered, immutable sequence of report sections
///
/// Built once per dataset and passed onward as a single string.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    sections: Vec<String>,
}

impl SummaryReport {
    /// The report sections in fixed order
    pub fn sections(&self) -> &[String] {
        &self.sections
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sections.join(SECTION_SEPARATOR))
    }
}

/// Summarize delimited text
///
/// # Errors
///
/// Returns [`crate::error::FreyError::DataRead`] when the input cannot be
/// parsed into a non-empty table.
///
/// # Examples
///
/// ```
/// use frey::analyst::summarize_str;
///
/// let report = summarize_str("name,age\nAlice,30\nBob,25\n").unwrap();
/// assert!(report.to_string().contains("2 rows and 2 columns"));
/// ```
pub fn summarize_str(input: &str) -> Result<SummaryReport> {
    let table = DataTable::parse_str(input)?;
    Ok(build_report(&table))
}

/// Summarize a delimited file
///
/// # Errors
///
/// Returns [`crate::error::FreyError::DataRead`] when the file cannot be
/// read or parsed into a non-empty table.
pub fn summarize_file(path: &Path) -> Result<SummaryReport> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        crate::error::FreyError::DataRead(format!("could not read {}: {}", path.display(), e))
    })?;
    summarize_str(&contents)
}

/// Assemble the report sections in their fixed order
fn build_report(table: &DataTable) -> SummaryReport {
    let mut sections = Vec::new();

    sections.push(format!(
        "Dimensions: {} rows and {} columns.",
        table.row_count(),
        table.column_count()
    ));

    let names: Vec<&str> = table.columns().iter().map(|c| c.name.as_str()).collect();
    sections.push(format!("Columns: {}.", names.join(", ")));

    let dtype_lines: Vec<String> = table
        .columns()
        .iter()
        .map(|c| format!("{}: {}", c.name, c.column_type()))
        .collect();
    sections.push(format!("Data types:\n{}", dtype_lines.join("\n")));

    if let Some(section) = numeric_statistics_section(table) {
        sections.push(section);
    }

    if let Some(section) = top_values_section(table) {
        sections.push(section);
    }

    if let Some(section) = missing_values_section(table) {
        sections.push(section);
    }

    tracing::debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        sections = sections.len(),
        "Built summary report"
    );

    SummaryReport { sections }
}

/// Descriptive statistics for every numeric column; `None` when there is none
fn numeric_statistics_section(table: &DataTable) -> Option<String> {
    let numeric = table.numeric_columns();
    if numeric.is_empty() {
        return None;
    }

    let lines: Vec<String> = numeric
        .iter()
        .filter_map(|column| {
            let summary = stats::numeric_summary(&column.numeric_values())?;
            Some(format!(
                "{}: count={}, mean={}, std={}, min={}, 25%={}, 50%={}, 75%={}, max={}",
                column.name,
                summary.count,
                stats::format_number(summary.mean),
                summary
                    .std
                    .map(stats::format_number)
                    .unwrap_or_else(|| "n/a".to_string()),
                stats::format_number(summary.min),
                stats::format_number(summary.q1),
                stats::format_number(summary.median),
                stats::format_number(summary.q3),
                stats::format_number(summary.max),
            ))
        })
        .collect();

    Some(format!(
        "Descriptive statistics for numeric columns:\n{}",
        lines.join("\n")
    ))
}

/// Top values of the first text column only; a single representative column
/// keeps the report compact
fn top_values_section(table: &DataTable) -> Option<String> {
    let column = table.text_columns().into_iter().next()?;
    let top = stats::top_values(column.present_values(), TOP_VALUES_LIMIT);
    if top.is_empty() {
        return None;
    }

    let lines: Vec<String> = top
        .iter()
        .map(|(value, count)| format!("{}: {}", value, count))
        .collect();

    Some(format!(
        "Top {} values for column '{}':\n{}",
        TOP_VALUES_LIMIT,
        column.name,
        lines.join("\n")
    ))
}

/// Missing-value counts, listing only affected columns; `None` when clean
fn missing_values_section(table: &DataTable) -> Option<String> {
    let lines: Vec<String> = table
        .columns()
        .iter()
        .filter_map(|column| {
            let missing = column.missing_count();
            (missing > 0).then(|| format!("{}: {}", column.name, missing))
        })
        .collect();

    if lines.is_empty() {
        return None;
    }

    Some(format!("Missing values detected:\n{}", lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FreyError, READ_FAILURE_PREFIX};

    #[test]
    fn test_report_starts_with_dimensions_then_columns() {
        let report = summarize_str("name,age\nAlice,30\nBob,25\n").unwrap();
        let sections = report.sections();
        assert!(sections[0].starts_with("Dimensions:"));
        assert!(sections[1].starts_with("Columns:"));
    }

    #[test]
    fn test_end_to_end_name_age_dataset() {
        let report = summarize_str("name,age\nAlice,30\nBob,25\n").unwrap();
        let text = report.to_string();

        assert!(text.contains("Dimensions: 2 rows and 2 columns."));
        assert!(text.contains("name: text"));
        assert!(text.contains("age: numeric"));
        assert!(text.contains("age: count=2, mean=27.5"));
    }

    #[test]
    fn test_sections_joined_with_fixed_separator() {
        let report = summarize_str("name,age\nAlice,30\n").unwrap();
        let text = report.to_string();
        assert_eq!(
            text.matches(SECTION_SEPARATOR).count(),
            report.sections().len() - 1
        );
    }

    #[test]
    fn test_no_numeric_columns_omits_statistics_section() {
        let report = summarize_str("name,city\nAlice,Paris\nBob,Lyon\n").unwrap();
        let text = report.to_string();
        assert!(!text.contains("Descriptive statistics"));
        assert!(text.contains("Top 5 values for column 'name'"));
    }

    #[test]
    fn test_no_text_columns_omits_top_values_section() {
        let report = summarize_str("x,y\n1,2\n3,4\n").unwrap();
        let text = report.to_string();
        assert!(!text.contains("Top 5 values"));
        assert!(text.contains("Descriptive statistics"));
    }

    #[test]
    fn test_no_missing_values_omits_missing_section() {
        let report = summarize_str("name,age\nAlice,30\nBob,25\n").unwrap();
        assert!(!report.to_string().contains("Missing values"));
    }

    #[test]
    fn test_missing_values_reported_per_column() {
        let report = summarize_str("a,b\n1,\n2,x\n3,\n").unwrap();
        let text = report.to_string();
        assert!(text.contains("Missing values detected:"));
        assert!(text.contains("b: 2"));
        assert!(!text.contains("a: 0"));
    }

    #[test]
    fn test_top_values_counts_and_order() {
        let report = summarize_str("letter\nA\nA\nA\nB\nB\nC\n").unwrap();
        let text = report.to_string();
        let top_section = report
            .sections()
            .iter()
            .find(|s| s.starts_with("Top 5 values"))
            .unwrap();
        assert!(text.contains("Top 5 values for column 'letter'"));

        let lines: Vec<&str> = top_section.lines().skip(1).collect();
        assert_eq!(lines, vec!["A: 3", "B: 2", "C: 1"]);
    }

    #[test]
    fn test_top_values_uses_first_text_column_only() {
        let report = summarize_str("first,second\na,x\na,y\nb,y\n").unwrap();
        let text = report.to_string();
        assert!(text.contains("Top 5 values for column 'first'"));
        assert!(!text.contains("Top 5 values for column 'second'"));
    }

    #[test]
    fn test_empty_input_yields_read_failure() {
        let err = summarize_str("").unwrap_err();
        let frey = err.downcast_ref::<FreyError>().unwrap();
        assert!(frey.is_data_read());
        assert!(frey.to_string().starts_with(READ_FAILURE_PREFIX));
    }

    #[test]
    fn test_file_summarization_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "name,age\nAlice,30\nBob,25\n").unwrap();

        let report = summarize_file(&path).unwrap();
        assert!(report.to_string().contains("2 rows and 2 columns"));

        let err = summarize_file(&dir.path().join("absent.csv")).unwrap_err();
        let frey = err.downcast_ref::<FreyError>().unwrap();
        assert!(frey.is_data_read());
    }

    #[test]
    fn test_semicolon_dataset_end_to_end() {
        let report = summarize_str("city;population\nParis;2100000\nLyon;520000\n").unwrap();
        let text = report.to_string();
        assert!(text.contains("Dimensions: 2 rows and 2 columns."));
        assert!(text.contains("population: numeric"));
        assert!(text.contains("city: text"));
    }
}
