// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart composition: layout plus the axes that own the chart's scales.

extern crate alloc;

use alloc::vec::Vec;

use folioviz_core::Mark;
use kurbo::Rect;

use crate::{AxisSpec, ChartLayout, ChartLayoutSpec, ScaleBand, ScaleContinuous};

/// A composed Cartesian chart: fixed-margin layout, a left axis and a bottom axis.
#[derive(Clone, Debug, Default)]
pub struct ChartSpec {
    /// Layout options.
    pub layout: ChartLayoutSpec,
    /// Optional left axis (dependent variable).
    pub axis_left: Option<AxisSpec>,
    /// Optional bottom axis (independent variable).
    pub axis_bottom: Option<AxisSpec>,
}

impl ChartSpec {
    /// Creates a chart with the given layout and no axes.
    pub fn new(layout: ChartLayoutSpec) -> Self {
        Self {
            layout,
            axis_left: None,
            axis_bottom: None,
        }
    }

    /// Sets the left axis.
    pub fn with_axis_left(mut self, axis: AxisSpec) -> Self {
        self.axis_left = Some(axis);
        self
    }

    /// Sets the bottom axis.
    pub fn with_axis_bottom(mut self, axis: AxisSpec) -> Self {
        self.axis_bottom = Some(axis);
        self
    }

    /// Instantiates the bottom axis's continuous scale for a given plot rectangle.
    pub fn x_scale_continuous(&self, plot: Rect) -> Option<ScaleContinuous> {
        self.axis_bottom.as_ref()?.scale_continuous(plot)
    }

    /// Instantiates the bottom axis's band scale for a given plot rectangle.
    pub fn x_scale_band(&self, plot: Rect) -> Option<ScaleBand> {
        self.axis_bottom.as_ref()?.scale_band(plot)
    }

    /// Instantiates the left axis's continuous scale for a given plot rectangle.
    pub fn y_scale_continuous(&self, plot: Rect) -> Option<ScaleContinuous> {
        self.axis_left.as_ref()?.scale_continuous(plot)
    }

    /// Computes layout for this chart.
    pub fn layout(&self) -> ChartLayout {
        ChartLayout::arrange(&self.layout)
    }

    /// Generates axis marks for a computed layout.
    pub fn guide_marks(&self, layout: &ChartLayout) -> Vec<Mark> {
        let mut out = Vec::new();
        if let Some(axis) = &self.axis_bottom {
            out.extend(axis.marks(layout.plot));
        }
        if let Some(axis) = &self.axis_left {
            out.extend(axis.marks(layout.plot));
        }
        out
    }

    /// Produces the full mark list: series marks followed by guide marks.
    ///
    /// The series builder is invoked with the resolved plot rectangle.
    pub fn marks(
        &self,
        build_series: impl FnOnce(&Self, Rect) -> Vec<Mark>,
    ) -> (ChartLayout, Vec<Mark>) {
        let layout = self.layout();
        let mut marks = build_series(self, layout.plot);
        marks.extend(self.guide_marks(&layout));
        (layout, marks)
    }
}
