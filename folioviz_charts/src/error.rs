// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by scale and geometry construction.

use core::fmt;

/// Errors returned when a scale or geometry cannot be built from its input.
///
/// These replace degenerate output (NaN coordinates, zero-width domains derived from nothing)
/// with an explicit failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartError {
    /// The input collection is empty.
    EmptyDataSet,
    /// The input collection has rows, but none of them carries a finite value.
    NoFiniteValues,
    /// A proportional layout was asked to divide a non-positive total.
    ZeroTotal,
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDataSet => f.write_str("empty data set"),
            Self::NoFiniteValues => f.write_str("data set has no finite values"),
            Self::ZeroTotal => f.write_str("values sum to zero"),
        }
    }
}

impl core::error::Error for ChartError {}
