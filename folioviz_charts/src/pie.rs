// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie layout: proportional angular spans for a value series.
//!
//! Angles follow the usual chart convention: radians measured clockwise from 12 o'clock.
//! [`PieSlice::kurbo_start_angle`] converts to kurbo's convention (clockwise from 3 o'clock in
//! y-down scene coordinates).

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::Vec2;

#[cfg(all(not(feature = "std"), not(test)))]
use crate::float::FloatExt;

use crate::error::ChartError;

/// One slice of a [`PieLayout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlice {
    /// Position of the source value in the input series.
    pub index: usize,
    /// Source value.
    pub value: f64,
    /// Start angle in radians, clockwise from 12 o'clock.
    pub start_angle: f64,
    /// End angle in radians, clockwise from 12 o'clock.
    pub end_angle: f64,
}

impl PieSlice {
    /// Angular span in radians.
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angular span as a fraction of a full turn.
    pub fn span_turns(&self) -> f64 {
        self.span() / TAU
    }

    /// Start angle in kurbo's convention.
    pub fn kurbo_start_angle(&self) -> f64 {
        self.start_angle - FRAC_PI_2
    }

    /// Offset from the pie center to the slice centroid, at the mid-angle and mid-radius.
    pub fn centroid(&self, inner_radius: f64, outer_radius: f64) -> Vec2 {
        let r = (inner_radius + outer_radius) * 0.5;
        let a = (self.start_angle + self.end_angle) * 0.5 - FRAC_PI_2;
        Vec2::new(r * a.cos(), r * a.sin())
    }
}

/// Angular layout for a value series.
///
/// Spans are proportional to each value over the sum of positive values. Slices are placed
/// around the circle in descending-value order (ties keep input order) and reported in input
/// order. Non-positive and non-finite values get an empty slice at their placement position.
#[derive(Clone, Debug)]
pub struct PieLayout {
    slices: Vec<PieSlice>,
    total: f64,
}

impl PieLayout {
    /// Lays out `values` over a full turn.
    pub fn new(values: &[f64]) -> Result<Self, ChartError> {
        if values.is_empty() {
            return Err(ChartError::EmptyDataSet);
        }
        if !values.iter().any(|v| v.is_finite()) {
            return Err(ChartError::NoFiniteValues);
        }
        let total: f64 = values.iter().filter(|v| **v > 0.0 && v.is_finite()).sum();
        if total <= 0.0 {
            return Err(ChartError::ZeroTotal);
        }

        let weight = |v: f64| if v > 0.0 && v.is_finite() { v } else { 0.0 };
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| weight(values[b]).total_cmp(&weight(values[a])));

        let k = TAU / total;
        let mut slices: Vec<PieSlice> = values
            .iter()
            .enumerate()
            .map(|(index, &value)| PieSlice {
                index,
                value,
                start_angle: 0.0,
                end_angle: 0.0,
            })
            .collect();
        let mut a0 = 0.0;
        for i in order {
            let a1 = a0 + weight(values[i]) * k;
            slices[i].start_angle = a0;
            slices[i].end_angle = a1;
            a0 = a1;
        }

        Ok(Self { slices, total })
    }

    /// Slices in input order.
    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    /// Sum of the positive values.
    pub fn total(&self) -> f64 {
        self.total
    }
}
