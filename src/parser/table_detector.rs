//! Table detection from text positions (stream mode).
//!
//! Tables are found without ruling lines: spans are grouped into rows by
//! baseline, column edges are the left edges shared by many rows, and runs
//! of consecutive rows that line up with those edges become tables.

use std::collections::{HashMap, HashSet};

use super::spans::TextSpan;
use crate::model::RawTable;

/// X positions within this many points fall into one edge bucket.
const EDGE_BUCKET: f32 = 5.0;

/// A span is aligned when its left edge is this close to a column edge.
const ALIGN_TOLERANCE: f32 = 5.0;

/// Table detector configuration.
#[derive(Debug, Clone)]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Y tolerance for grouping spans into rows (fraction of font size)
    pub y_tolerance_factor: f32,
    /// Minimum share of a row's spans that must sit on column edges
    pub min_alignment_ratio: f32,
    /// Minimum gap between columns (points)
    pub min_column_gap: f32,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 6,
            y_tolerance_factor: 0.4,
            min_alignment_ratio: 0.3,
            min_column_gap: 15.0,
        }
    }
}

#[derive(Debug, Clone)]
struct Row {
    spans: Vec<TextSpan>,
}

/// Detects tables in a page's text spans.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Page text, one line per baseline, top to bottom.
    ///
    /// Spans sharing a baseline are joined with a single space.
    pub fn lines(&self, spans: &[TextSpan]) -> Vec<String> {
        self.group_into_rows(spans)
            .iter()
            .map(|row| {
                row.spans
                    .iter()
                    .map(|s| s.text.trim())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Detect tables, top to bottom.
    pub fn detect(&self, spans: &[TextSpan]) -> Vec<RawTable> {
        if spans.len() < self.config.min_rows * self.config.min_columns {
            return Vec::new();
        }

        let rows = self.group_into_rows(spans);
        if rows.len() < self.config.min_rows {
            return Vec::new();
        }

        let columns = self.detect_columns(&rows);
        if columns.len() < self.config.min_columns {
            log::debug!("TableDetector: {} column edges, no table", columns.len());
            return Vec::new();
        }

        let mut tables = Vec::new();
        for (start, end) in self.find_regions(&rows, &columns) {
            let region = &rows[start..=end];
            let edges = self.detect_columns(region);

            if edges.len() < self.config.min_columns {
                continue;
            }
            if edges.len() > self.config.max_columns {
                log::debug!(
                    "TableDetector: skipping region, too many columns ({} > {})",
                    edges.len(),
                    self.config.max_columns
                );
                continue;
            }
            if is_list_pattern(region, &edges) {
                log::debug!("TableDetector: skipping region, looks like a list");
                continue;
            }

            tables.push(to_raw_table(region, &edges));
        }
        tables
    }

    /// Group spans into rows by baseline, top row first.
    fn group_into_rows(&self, spans: &[TextSpan]) -> Vec<Row> {
        let mut sorted = spans.to_vec();
        sorted.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut rows: Vec<Row> = Vec::new();
        let mut current_y: Option<f32> = None;

        for span in sorted {
            let tolerance = span.font_size * self.config.y_tolerance_factor;
            match (current_y, rows.last_mut()) {
                (Some(y), Some(row)) if (span.y - y).abs() <= tolerance => row.spans.push(span),
                _ => {
                    current_y = Some(span.y);
                    rows.push(Row { spans: vec![span] });
                }
            }
        }

        for row in &mut rows {
            row.spans.sort_by(|a, b| a.x.total_cmp(&b.x));
        }
        rows
    }

    /// Left edges shared by enough rows, merged when closer than the column gap.
    fn detect_columns(&self, rows: &[Row]) -> Vec<f32> {
        let multi: Vec<&Row> = rows.iter().filter(|r| r.spans.len() >= 2).collect();
        let candidates: Vec<&Row> = if multi.len() >= self.config.min_rows {
            multi
        } else {
            rows.iter().collect()
        };
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut counts: HashMap<i32, usize> = HashMap::new();
        for row in &candidates {
            let buckets: HashSet<i32> = row
                .spans
                .iter()
                .map(|s| (s.x / EDGE_BUCKET).round() as i32)
                .collect();
            for bucket in buckets {
                *counts.entry(bucket).or_default() += 1;
            }
        }

        let min_hits =
            ((candidates.len() as f32 * self.config.min_alignment_ratio) as usize).max(2);
        let mut edges: Vec<f32> = counts
            .into_iter()
            .filter(|&(_, hits)| hits >= min_hits)
            .map(|(bucket, _)| bucket as f32 * EDGE_BUCKET)
            .collect();
        edges.sort_by(f32::total_cmp);

        let mut merged: Vec<f32> = Vec::with_capacity(edges.len());
        for edge in edges {
            match merged.last() {
                Some(&last) if edge - last < self.config.min_column_gap => {}
                _ => merged.push(edge),
            }
        }
        merged
    }

    /// Runs of at least `min_rows` consecutive aligned rows.
    fn find_regions(&self, rows: &[Row], columns: &[f32]) -> Vec<(usize, usize)> {
        let mut regions = Vec::new();
        let mut start: Option<usize> = None;

        for (i, row) in rows.iter().enumerate() {
            if alignment_score(row, columns) >= self.config.min_alignment_ratio {
                start.get_or_insert(i);
            } else if let Some(s) = start.take() {
                if i - s >= self.config.min_rows {
                    regions.push((s, i - 1));
                }
            }
        }
        if let Some(s) = start {
            if rows.len() - s >= self.config.min_rows {
                regions.push((s, rows.len() - 1));
            }
        }
        regions
    }
}

fn alignment_score(row: &Row, columns: &[f32]) -> f32 {
    if row.spans.is_empty() || columns.is_empty() {
        return 0.0;
    }
    let aligned = row
        .spans
        .iter()
        .filter(|s| columns.iter().any(|c| (s.x - c).abs() <= ALIGN_TOLERANCE))
        .count();
    aligned as f32 / row.spans.len() as f32
}

/// Index of the column a span starting at `x` belongs to.
fn column_for(x: f32, edges: &[f32]) -> usize {
    // Allow spans to start slightly left of their column edge.
    edges
        .iter()
        .rposition(|&edge| x >= edge - 10.0)
        .unwrap_or(0)
}

fn to_raw_table(rows: &[Row], edges: &[f32]) -> RawTable {
    let rows = rows
        .iter()
        .map(|row| {
            let mut cells: Vec<Vec<&str>> = vec![Vec::new(); edges.len()];
            for span in &row.spans {
                cells[column_for(span.x, edges)].push(span.text.trim());
            }
            cells
                .into_iter()
                .map(|parts| (!parts.is_empty()).then(|| parts.join(" ")))
                .collect()
        })
        .collect();
    RawTable::new(rows)
}

/// Rows whose leftmost span is a bullet or number marker form a list.
///
/// Bullets reject at any width; number markers only reject two-column
/// regions, since real tables often start with a numbered column.
fn is_list_pattern(rows: &[Row], edges: &[f32]) -> bool {
    if rows.is_empty() {
        return false;
    }

    let (mut bullets, mut numbers) = (0usize, 0usize);
    for row in rows {
        if let Some(first) = row.spans.first() {
            let text = first.text.trim();
            if is_bullet_marker(text) {
                bullets += 1;
            } else if is_number_marker(text) {
                numbers += 1;
            }
        }
    }

    let n = rows.len() as f32;
    bullets as f32 / n >= 0.5 || (edges.len() == 2 && (bullets + numbers) as f32 / n >= 0.5)
}

fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text,
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "▸" | "►" | "■" | "●" | "□" | "◆" | "▶" | "➤"
    )
}

/// Number-style markers such as `1.`, `12)`, `3` or `a.`.
fn is_number_marker(text: &str) -> bool {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }
    if cleaned.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    let body = cleaned.trim_end_matches(['.', ')']);
    if body.len() == cleaned.len() || cleaned.len() - body.len() != 1 {
        return false;
    }
    body.chars().all(|c| c.is_ascii_digit())
        || (body.chars().count() == 1 && body.chars().all(char::is_alphabetic))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, y: f32) -> TextSpan {
        TextSpan::new(text, x, y, 12.0)
    }

    #[test]
    fn test_group_into_rows() {
        let detector = TableDetector::new();
        let rows = detector.group_into_rows(&[
            span("B1", 60.0, 100.0),
            span("A2", 10.0, 85.0),
            span("A1", 10.0, 101.0),
            span("B2", 60.0, 85.0),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].spans[0].text, "A1");
        assert_eq!(rows[0].spans[1].text, "B1");
    }

    #[test]
    fn test_lines_follow_baselines() {
        let lines = TableDetector::new().lines(&[
            span("region.", 190.0, 680.0),
            span("Quarterly Report", 72.0, 700.0),
            span("Revenue grew in every", 72.0, 680.5),
            span("Appendix", 72.0, 640.0),
        ]);
        assert_eq!(
            lines,
            vec!["Quarterly Report", "Revenue grew in every region.", "Appendix"]
        );
    }

    #[test]
    fn test_detect_simple_table() {
        let tables = TableDetector::new().detect(&[
            span("Name", 10.0, 100.0),
            span("Age", 60.0, 100.0),
            span("Alice", 10.0, 85.0),
            span("30", 60.0, 85.0),
            span("Bob", 10.0, 70.0),
            span("25", 60.0, 70.0),
        ]);

        assert_eq!(tables.len(), 1);
        assert_eq!(
            tables[0],
            RawTable::from_strings([["Name", "Age"], ["Alice", "30"], ["Bob", "25"]])
        );
    }

    #[test]
    fn test_missing_cell_is_none() {
        let tables = TableDetector::new().detect(&[
            span("Name", 10.0, 100.0),
            span("Age", 60.0, 100.0),
            span("Alice", 10.0, 85.0),
            span("30", 60.0, 85.0),
            span("Bob", 10.0, 70.0),
        ]);
        assert_eq!(tables[0].rows[2], vec![Some("Bob".to_string()), None]);
    }

    #[test]
    fn test_no_table_single_column() {
        let tables = TableDetector::new().detect(&[
            span("Line 1", 10.0, 100.0),
            span("Line 2", 10.0, 85.0),
            span("Line 3", 10.0, 70.0),
            span("Line 4", 10.0, 55.0),
        ]);
        assert!(tables.is_empty());
    }

    #[test]
    fn test_numbered_list_not_detected_as_table() {
        let spans: Vec<_> = ["Setup", "Objects", "Routing", "VPN", "Operations"]
            .iter()
            .enumerate()
            .flat_map(|(i, text)| {
                let y = 400.0 - 30.0 * i as f32;
                [span(&format!("{}.", i + 1), 50.0, y), span(text, 80.0, y)]
            })
            .collect();
        assert!(TableDetector::new().detect(&spans).is_empty());
    }

    #[test]
    fn test_bullet_list_not_detected_as_table() {
        let tables = TableDetector::new().detect(&[
            span("-", 50.0, 400.0),
            span("Management", 80.0, 400.0),
            span("-", 50.0, 370.0),
            span("Interface options", 80.0, 370.0),
            span("-", 50.0, 340.0),
            span("Firmware", 80.0, 340.0),
        ]);
        assert!(tables.is_empty());
    }

    #[test]
    fn test_markers() {
        for marker in ["1.", "12.", "1)", "1 .", "3", "a.", "B)"] {
            assert!(is_number_marker(marker), "{}", marker);
        }
        for marker in ["-", "•", "*", "–"] {
            assert!(is_bullet_marker(marker), "{}", marker);
        }
        for text in ["Name", "Hello World", "1.5", "", "ab."] {
            assert!(!is_number_marker(text) && !is_bullet_marker(text), "{}", text);
        }
    }
}
