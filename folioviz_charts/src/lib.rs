// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `folioviz_core`.
//!
//! This crate turns record collections into marks:
//! - **Scales** map data values (numbers, timestamps, categories) into pixel coordinates.
//! - **Geometry builders** compute shape parameters: pie slices, monotone area curves, bars
//!   and dots.
//! - **Guides** (axes, legends) are generated from the same scale instances as the series.
//!
//! Everything here is a pure function of its inputs; presentation is left to whoever consumes
//! the resulting `folioviz_core::Mark`s.

#![no_std]

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("folioviz_charts requires either the `std` or `libm` feature");

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod area_mark;
mod axis;
mod bar_mark;
mod chart_spec;
mod curve;
mod error;
#[cfg(all(not(feature = "std"), not(test)))]
mod float;
mod format;
mod layout;
mod legend;
mod palette;
mod pie;
mod point_mark;
mod scale;
mod sector_mark;
mod text_mark;
mod z_order;

pub use area_mark::AreaMarkSpec;
pub use axis::{AxisOrient, AxisSpec, AxisStyle, StrokeStyle};
pub use bar_mark::BarMarkSpec;
pub use chart_spec::ChartSpec;
pub use curve::{defined_runs, monotone_x};
pub use error::ChartError;
pub use format::format_tick_with_step;
pub use layout::{ChartLayout, ChartLayoutSpec, Margins, Size};
pub use legend::{LegendItem, LegendSwatches};
pub use palette::{DARK2, ScaleOrdinal};
pub use pie::{PieLayout, PieSlice};
pub use point_mark::PointMarkSpec;
pub use scale::{
    Categories, ScaleBand, ScaleBandSpec, ScaleContinuous, ScaleLinear, ScaleLinearSpec,
    ScaleSpec, ScaleTime, ScaleTimeSpec, extent, nice_step,
};
pub use sector_mark::SectorMarkSpec;
pub use text_mark::TextMarkSpec;
pub use z_order::*;
