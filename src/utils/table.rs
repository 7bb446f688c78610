//! Table rendering utilities for CLI outputs.
//!
//! Widths are measured in terminal columns, so titles with wide characters
//! line up. A column with `wrap` set folds long cells onto extra lines.

use unicode_width::UnicodeWidthStr;

use crate::utils::formatting::strip_ansi;

pub struct Column {
    pub header: String,
    pub width: usize,
    pub wrap: bool,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
            wrap: false,
        }
    }

    pub fn wrapping(header: &str, width: usize) -> Self {
        Self {
            wrap: true,
            ..Self::new(header, width)
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.truncate(out.trim_end().len());
        out.push('\n');

        let rule: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&"-".repeat(rule.saturating_sub(1)));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let cells: Vec<Vec<String>> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    if col.wrap && visible_width(cell) > col.width {
                        textwrap::wrap(cell, col.width)
                            .into_iter()
                            .map(|l| l.into_owned())
                            .collect()
                    } else {
                        vec![cell.to_string()]
                    }
                })
                .collect();

            let height = cells.iter().map(Vec::len).max().unwrap_or(1);
            for line in 0..height {
                let mut text = String::new();
                for (i, col) in self.columns.iter().enumerate() {
                    let part = cells[i].get(line).map(String::as_str).unwrap_or("");
                    text.push_str(&pad(part, col.width));
                    text.push(' ');
                }
                out.push_str(text.trim_end());
                out.push('\n');
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_and_wrap() {
        let mut t = Table::new(vec![Column::new("ID", 4), Column::wrapping("Title", 10)]);
        t.add_row(vec!["ab".into(), "a rather long task title".into()]);
        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "ID   Title");
        assert!(lines[2].starts_with("ab   a rather"));
        assert!(lines.len() > 3);
        assert!(lines[3].starts_with("     "));
    }
}
