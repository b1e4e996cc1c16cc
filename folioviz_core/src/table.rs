// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column accessors over record collections.

/// Identifies a record collection.
///
/// Table ids namespace per-row mark ids (see [`crate::MarkId::for_row`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub u32);

/// Identifies a column within a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColId(pub u32);

/// Read-only, row-oriented access to a record collection.
///
/// Chart builders bind records to marks through this trait, so callers can keep their own
/// record types and expose only the columns a chart needs.
pub trait TableData {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Numeric value at `(row, col)`, if the column is numeric and the row exists.
    fn f64(&self, row: usize, col: ColId) -> Option<f64>;

    /// Text value at `(row, col)`, if the column is textual and the row exists.
    fn text(&self, row: usize, col: ColId) -> Option<&str> {
        let _ = (row, col);
        None
    }
}
