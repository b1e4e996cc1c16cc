// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sector (arc) mark generation for pie and donut slices.

use core::f64::consts::FRAC_PI_2;

use folioviz_core::{Mark, MarkId};
use kurbo::{Circle, Point, Shape};
use peniko::Brush;

use crate::axis::StrokeStyle;
use crate::pie::PieSlice;

/// A sector (arc slice).
///
/// Angles are radians clockwise from 12 o'clock, the same convention as [`PieSlice`].
#[derive(Clone, Debug)]
pub struct SectorMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Center in scene coordinates.
    pub center: Point,
    /// Inner radius in scene coordinates (0 for a pie slice).
    pub inner_radius: f64,
    /// Outer radius in scene coordinates.
    pub outer_radius: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Fill paint for the sector.
    pub fill: Brush,
    /// Optional outline stroke.
    pub stroke: Option<StrokeStyle>,
    /// Curve flattening tolerance when converting the sector to a `BezPath`.
    pub tolerance: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

impl SectorMarkSpec {
    /// Creates a new sector mark spec.
    pub fn new(
        id: MarkId,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        Self {
            id,
            center,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            fill: Brush::default(),
            stroke: None,
            tolerance: 0.1,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Creates a sector spanning a pie slice.
    pub fn for_slice(
        id: MarkId,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        slice: &PieSlice,
    ) -> Self {
        Self::new(
            id,
            center,
            inner_radius,
            outer_radius,
            slice.start_angle,
            slice.end_angle,
        )
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the outline stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the sector mark.
    pub fn mark(&self) -> Mark {
        let circle = Circle::new(self.center, self.outer_radius);
        let sweep = self.end_angle - self.start_angle;
        let segment = circle.segment(self.inner_radius, self.start_angle - FRAC_PI_2, sweep);
        let path = segment.path_elements(self.tolerance).collect();

        let builder = Mark::builder(self.id)
            .path()
            .path_geometry(path)
            .z_index(self.z_index)
            .fill(self.fill.clone());
        let builder = match &self.stroke {
            Some(stroke) => builder.stroke(stroke.brush.clone(), stroke.stroke_width),
            None => builder,
        };
        builder.build()
    }
}
