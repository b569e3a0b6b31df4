//! Plain-text tables
//!
//! Column widths follow the widest cell; amounts are right-aligned.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub align: Align,
}

impl Column {
    pub const fn left(title: &'static str) -> Self {
        Self {
            title,
            align: Align::Left,
        }
    }

    pub const fn right(title: &'static str) -> Self {
        Self {
            title,
            align: Align::Right,
        }
    }
}

/// Rows of cells under a set of columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    /// Shown instead of the table when there are no rows
    pub empty_message: String,
}

impl Table {
    pub fn new(columns: Vec<Column>, empty_message: impl Into<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            empty_message: empty_message.into(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of each column: its widest cell or title
    pub fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.title.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return self.empty_message.clone();
        }

        let widths = self.widths();
        let line = |cells: Vec<String>| -> String {
            cells
                .iter()
                .zip(&self.columns)
                .zip(&widths)
                .map(|((cell, column), &width)| match column.align {
                    Align::Left => format!("{:<width$}", cell, width = width),
                    Align::Right => format!("{:>width$}", cell, width = width),
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut output = String::new();
        output.push_str(&line(
            self.columns.iter().map(|c| c.title.to_string()).collect(),
        ));
        output.push('\n');
        output.push_str(&line(widths.iter().map(|&w| "-".repeat(w)).collect()));
        output.push('\n');
        for row in &self.rows {
            output.push_str(&line(row.clone()));
            output.push('\n');
        }
        output
    }
}
