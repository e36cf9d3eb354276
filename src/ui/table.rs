//! Two-column status tables for `pos check`.

use console::style;

/// A simple table with minimal styling.
///
/// # Example
/// ```text
/// Item        Status
/// ───────────────────
/// Tasks/      ok
/// GOALS.md    missing
/// ```
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    #[must_use]
    pub fn new(headers: &[&str]) -> Self {
        let headers: Vec<String> = headers.iter().map(|&s| s.to_string()).collect();
        let col_widths = headers.iter().map(|h| h.chars().count()).collect();

        Self {
            headers,
            rows: Vec::new(),
            col_widths,
        }
    }

    /// Add a row to the table. Cells beyond the header count are dropped.
    pub fn add_row(&mut self, cells: &[&str]) {
        let row: Vec<String> = cells
            .iter()
            .take(self.headers.len())
            .map(|&s| s.to_string())
            .collect();

        for (width, cell) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.chars().count());
        }

        self.rows.push(row);
    }

    /// Plain-text lines: header, rule, then one line per row.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let rule_width = self.col_widths.iter().sum::<usize>() + self.col_widths.len().saturating_sub(1) * 2;

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.pad(&self.headers));
        lines.push("─".repeat(rule_width));
        lines.extend(self.rows.iter().map(|row| self.pad(row)));
        lines
    }

    /// Render the table to stdout, colouring the status column.
    pub fn print(&self) {
        for (i, line) in self.lines().into_iter().enumerate() {
            match i {
                0 => println!("  {}", style(line).bold()),
                1 => println!("  {}", style(line).dim()),
                _ => println!("  {}", Self::colour(&line)),
            }
        }
    }

    fn pad(&self, cells: &[String]) -> String {
        cells
            .iter()
            .zip(&self.col_widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }

    fn colour(line: &str) -> String {
        let status = line.split_whitespace().last().unwrap_or_default();
        match status {
            "ok" | "created" => line.replacen(status, &style(status).green().to_string(), 1),
            "missing" => line.replacen(status, &style(status).red().to_string(), 1),
            _ => line.to_string(),
        }
    }
}
