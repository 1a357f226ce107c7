//! Descriptive statistics for the summarizer
//!
//! Quartiles use linear interpolation between closest ranks, matching the
//! conventional `describe`-style output. Standard deviation is the sample
//! deviation (n - 1 denominator) and is undefined for a single observation.

/// Descriptive statistics for one numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    /// Number of non-missing observations
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` when count < 2
    pub std: Option<f64>,
    pub min: f64,
    /// 25th percentile
    pub q1: f64,
    /// 50th percentile
    pub median: f64,
    /// 75th percentile
    pub q3: f64,
    pub max: f64,
}

/// Compute descriptive statistics over non-missing numeric values
///
/// Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use frey::analyst::stats::numeric_summary;
///
/// let summary = numeric_summary(&[30.0, 25.0]).unwrap();
/// assert_eq!(summary.count, 2);
/// assert_eq!(summary.mean, 27.5);
/// assert_eq!(summary.min, 25.0);
/// assert_eq!(summary.max, 30.0);
/// ```
pub fn numeric_summary(values: &[f64]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    let std = if count > 1 {
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count as f64 - 1.0);
        Some(variance.sqrt())
    } else {
        None
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(NumericSummary {
        count,
        mean,
        std,
        min: sorted[0],
        q1: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.5),
        q3: percentile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

/// Percentile of a sorted slice with linear interpolation
///
/// `p` is a fraction in `[0, 1]`. The slice must be non-empty and sorted
/// ascending.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = rank - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Frequency counts of the most common values
///
/// Ordered by descending count; ties keep first-appearance order, so the
/// output is deterministic.
///
/// # Examples
///
/// ```
/// use frey::analyst::stats::top_values;
///
/// let values = ["A", "A", "A", "B", "B", "C"];
/// let top = top_values(values.iter().copied(), 5);
/// assert_eq!(top[0], ("A".to_string(), 3));
/// assert_eq!(top[1], ("B".to_string(), 2));
/// assert_eq!(top[2], ("C".to_string(), 1));
/// ```
pub fn top_values<'a>(values: impl Iterator<Item = &'a str>, limit: usize) -> Vec<(String, usize)> {
    // Counts and first-appearance ranks in one pass
    let mut counts: Vec<(String, usize, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _, _)| v == value) {
            Some((_, count, _)) => *count += 1,
            None => {
                let rank = counts.len();
                counts.push((value.to_string(), 1, rank));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    counts
        .into_iter()
        .take(limit)
        .map(|(value, count, _)| (value, count))
        .collect()
}

/// Format a float for report output, trimming trailing zeros
///
/// Values are rounded to four decimal places; whole numbers render without a
/// fractional part (`30` rather than `30.0000`).
pub fn format_number(value: f64) -> String {
    let formatted = format!("{:.4}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_two_values() {
        let summary = numeric_summary(&[30.0, 25.0]).unwrap();
        assert_eq!(summary.count, 2);
        assert!((summary.mean - 27.5).abs() < 1e-12);
        assert!((summary.std.unwrap() - 3.5355339059327378).abs() < 1e-9);
        assert_eq!(summary.min, 25.0);
        assert_eq!(summary.max, 30.0);
        assert!((summary.q1 - 26.25).abs() < 1e-12);
        assert!((summary.median - 27.5).abs() < 1e-12);
        assert!((summary.q3 - 28.75).abs() < 1e-12);
    }

    #[test]
    fn test_summary_empty_is_none() {
        assert!(numeric_summary(&[]).is_none());
    }

    #[test]
    fn test_summary_single_value_has_no_std() {
        let summary = numeric_summary(&[42.0]).unwrap();
        assert_eq!(summary.count, 1);
        assert!(summary.std.is_none());
        assert_eq!(summary.min, 42.0);
        assert_eq!(summary.median, 42.0);
        assert_eq!(summary.max, 42.0);
    }

    #[test]
    fn test_percentile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&sorted, 0.5) - 2.5).abs() < 1e-12);
        assert!((percentile(&sorted, 0.25) - 1.75).abs() < 1e-12);
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_top_values_ordering() {
        let values = ["A", "A", "A", "B", "B", "C"];
        let top = top_values(values.iter().copied(), 5);
        assert_eq!(
            top,
            vec![
                ("A".to_string(), 3),
                ("B".to_string(), 2),
                ("C".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_values_tie_keeps_first_appearance_order() {
        let values = ["x", "y", "y", "x", "z"];
        let top = top_values(values.iter().copied(), 5);
        assert_eq!(top[0], ("x".to_string(), 2));
        assert_eq!(top[1], ("y".to_string(), 2));
        assert_eq!(top[2], ("z".to_string(), 1));
    }

    #[test]
    fn test_top_values_respects_limit() {
        let values = ["a", "b", "c", "d", "e", "f"];
        let top = top_values(values.iter().copied(), 5);
        assert_eq!(top.len(), 5);
    }

    #[test]
    fn test_format_number_trims_zeros() {
        assert_eq!(format_number(27.5), "27.5");
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(26.25), "26.25");
        assert_eq!(format_number(3.5355339059327378), "3.5355");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-1.5), "-1.5");
    }
}
