// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::template::Templates;

const DEFAULT_PALETTE: [&[&str]; 2] = [
    &["😂", "😅", "😄", "😆", "😀"],
    &["😹", "😸", "😼", "😏"],
];

/// Rows of selectable symbols, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    rows: Vec<Vec<String>>,
}

impl Palette {
    pub fn new<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell count of the longest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn first(&self) -> Option<&str> {
        self.rows
            .iter()
            .find_map(|row| row.first())
            .map(String::as_str)
    }

    pub fn cell(&self, index: CellIndex) -> Option<&str> {
        self.rows
            .get(index.row)
            .and_then(|row| row.get(index.column))
            .map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.cells().any(|(_, cell)| cell == value)
    }

    pub fn has_cells(&self) -> bool {
        self.rows.iter().any(|row| !row.is_empty())
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellIndex, &str)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(column, cell)| (CellIndex { row, column }, cell.as_str()))
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.iter().map(|row| row.iter().copied()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellIndex {
    pub row: usize,
    pub column: usize,
}

impl CellIndex {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Construction options for one picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerOptions {
    pub templates: Templates,
    pub palette: Palette,
    pub initial: Option<String>,
}

impl PickerOptions {
    pub fn with_palette(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = Some(value.into());
        self
    }

    pub fn templates(mut self, templates: Templates) -> Self {
        self.templates = templates;
        self
    }

    /// Selection in effect right after construction.
    pub fn initial_selection(&self) -> Option<&str> {
        self.initial.as_deref().or_else(|| self.palette.first())
    }
}
