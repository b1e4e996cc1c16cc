// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area mark generation.

extern crate alloc;

use alloc::vec::Vec;

use folioviz_core::{ColId, HoverStroke, Mark, MarkId, TableData, TableId};
use kurbo::{BezPath, Join, Point};
use peniko::Brush;

use crate::axis::StrokeStyle;
use crate::curve::{defined_runs, extend_monotone_x};
use crate::scale::ScaleContinuous;

/// A filled area under a value curve, derived from a table.
///
/// The upper boundary is a monotone cubic through the samples; the lower boundary is the
/// baseline. Rows with a missing or non-finite x or y split the area into separate runs, all
/// emitted as subpaths of a single path mark.
#[derive(Clone, Debug)]
pub struct AreaMarkSpec {
    /// Stable id of the emitted mark.
    pub id: MarkId,
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
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Fill paint for the area.
    pub fill: Brush,
    /// Fill opacity in `0..=1`.
    pub fill_opacity: f64,
    /// Optional outline stroke.
    pub stroke: Option<StrokeStyle>,
    /// Outline line join.
    pub stroke_join: Join,
    /// Outline used while the pointer hovers the area.
    pub hover: Option<StrokeStyle>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl AreaMarkSpec {
    /// Creates an area mark with a baseline at `0` and default fill (`Brush::default()`).
    pub fn new(
        id: MarkId,
        table: TableId,
        x: ColId,
        y: ColId,
        x_scale: ScaleContinuous,
        y_scale: ScaleContinuous,
    ) -> Self {
        Self {
            id,
            table,
            x,
            y,
            x_scale,
            y_scale,
            baseline: 0.0,
            fill: Brush::default(),
            fill_opacity: 1.0,
            stroke: None,
            stroke_join: Join::Miter,
            hover: None,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in data units.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the fill opacity.
    pub fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = opacity;
        self
    }

    /// Sets the outline stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the outline line join.
    pub fn with_stroke_join(mut self, join: Join) -> Self {
        self.stroke_join = join;
        self
    }

    /// Sets the outline used while hovered.
    pub fn with_hover_stroke(mut self, hover: StrokeStyle) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Samples the table into scene points; gaps become non-finite points.
    fn points(&self, data: &dyn TableData) -> Vec<Point> {
        (0..data.row_count())
            .map(|row| {
                let x = data.f64(row, self.x).unwrap_or(f64::NAN);
                let y = data.f64(row, self.y).unwrap_or(f64::NAN);
                if x.is_finite() && y.is_finite() {
                    Point::new(self.x_scale.map(x), self.y_scale.map(y))
                } else {
                    Point::new(f64::NAN, f64::NAN)
                }
            })
            .collect()
    }

    /// Builds the area outline: one closed subpath per run of defined samples.
    pub fn path(&self, data: &dyn TableData) -> BezPath {
        let points = self.points(data);
        let y0 = self.y_scale.map(self.baseline);
        let mut path = BezPath::new();
        for run in defined_runs(&points) {
            let run = &points[run];
            let (Some(first), Some(last)) = (run.first(), run.last()) else {
                continue;
            };
            path.move_to(*first);
            extend_monotone_x(&mut path, run);
            path.line_to((last.x, y0));
            path.line_to((first.x, y0));
            path.close_path();
        }
        path
    }

    /// Generates the area mark.
    pub fn mark(&self, data: &dyn TableData) -> Mark {
        let mut builder = Mark::builder(self.id)
            .path()
            .path_geometry(self.path(data))
            .z_index(self.z_index)
            .fill(self.fill.clone())
            .fill_opacity(self.fill_opacity)
            .stroke_join(self.stroke_join);
        if let Some(stroke) = &self.stroke {
            builder = builder.stroke(stroke.brush.clone(), stroke.stroke_width);
        }
        if let Some(hover) = &self.hover {
            builder = builder.hover_stroke(HoverStroke {
                brush: hover.brush.clone(),
                stroke_width: hover.stroke_width,
            });
        }
        builder.build()
    }
}
