// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

extern crate alloc;

use alloc::vec::Vec;

use folioviz_core::{ColId, Mark, MarkId, TableData, TableId};
use kurbo::{BezPath, Circle, Shape};
use peniko::Brush;

use crate::scale::ScaleContinuous;

/// A point mark derived from a table: one filled circle per row.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Source table id.
    pub table: TableId,
    /// Column for x values.
    pub x: ColId,
    /// Column for y values.
    pub y: ColId,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleContinuous,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleContinuous,
    /// Circle radius in scene coordinates.
    pub radius: f64,
    /// Fill paint for the dots.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a spec for dots of radius 3 with a default fill.
    pub fn new(
        table: TableId,
        x: ColId,
        y: ColId,
        x_scale: ScaleContinuous,
        y_scale: ScaleContinuous,
    ) -> Self {
        Self {
            table,
            x,
            y,
            x_scale,
            y_scale,
            radius: 3.0,
            fill: Brush::default(),
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Sets the dot radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates one mark per row with finite coordinates.
    ///
    /// Mark identity is derived from `(table, row)` so it stays stable across renders.
    pub fn marks(&self, data: &dyn TableData) -> Vec<Mark> {
        (0..data.row_count())
            .filter_map(|row| {
                let x = data.f64(row, self.x).filter(|v| v.is_finite())?;
                let y = data.f64(row, self.y).filter(|v| v.is_finite())?;
                let center = (self.x_scale.map(x), self.y_scale.map(y));
                let path: BezPath = Circle::new(center, self.radius)
                    .path_elements(0.1)
                    .collect();
                Some(
                    Mark::builder(MarkId::for_row(self.table, row as u64))
                        .path()
                        .z_index(self.z_index)
                        .path_geometry(path)
                        .fill(self.fill.clone())
                        .build(),
                )
            })
            .collect()
    }
}
