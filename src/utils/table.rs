//! Plain-text tables for `list` output. Column widths grow to fit the
//! widest cell; ANSI colour codes do not count towards the width.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

/// Remove ANSI colour sequences.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    match RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()) {
        Some(re) => re.replace_all(s, ""),
        None => Cow::Borrowed(s),
    }
}

/// Printable width of `s`, ignoring escape sequences.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

pub struct Column {
    pub header: String,
    pub min_width: usize,
}

impl Column {
    pub fn new(header: &str, min_width: usize) -> Self {
        Self {
            header: header.to_string(),
            min_width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
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

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| visible_width(c))
                    .chain([visible_width(&col.header), col.min_width])
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn push_cell(out: &mut String, cell: &str, width: usize) {
        out.push_str(cell);
        let pad = width.saturating_sub(visible_width(cell)) + 1;
        out.push_str(&" ".repeat(pad));
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        for (col, w) in self.columns.iter().zip(&widths) {
            Self::push_cell(&mut out, &col.header, *w);
        }
        out.truncate(out.trim_end().len());
        out.push('\n');

        let total: usize = widths.iter().map(|w| w + 1).sum();
        out.push_str(&"-".repeat(total.saturating_sub(1)));
        out.push('\n');

        for row in &self.rows {
            let start = out.len();
            for (i, w) in widths.iter().enumerate() {
                Self::push_cell(&mut out, row.get(i).map(String::as_str).unwrap_or(""), *w);
            }
            let trimmed = out[start..].trim_end().len();
            out.truncate(start + trimmed);
            out.push('\n');
        }

        out
    }
}
