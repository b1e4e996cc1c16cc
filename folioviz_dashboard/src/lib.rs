// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portfolio dashboard views for folioviz.
//!
//! This crate binds portfolio records to chart marks and serializes them as HTML fragments:
//! - [`DashboardData`] supplies the records ([`SampleData`] fixtures or a [`JsonFileData`] file).
//! - The view assemblers ([`pie_view`], [`line_view`], [`bar_view`], [`scatter_view`]) turn
//!   records into positioned [`folioviz_core::Mark`]s.
//! - A [`Renderer`] consumes scene diffs; [`SvgScene`] mirrors them into an `<svg>` element.
//! - [`position_cells`] fills the positions table.
//!
//! [`render_view`] ties these together for one [`ViewKind`].
//!
//! ```
//! use folioviz_dashboard::{SampleData, ViewKind, render_view};
//!
//! let svg = render_view(ViewKind::Bar, &SampleData).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

mod calendar;
mod dashboard;
mod error;
mod html;
mod model;
mod positions;
mod provider;
mod render;
mod svg;
mod views;

pub use calendar::{
    calendar_ticks, date_seconds, format_calendar_tick, format_calendar_tick_seconds,
    format_short_date, seconds_date,
};
pub use dashboard::{
    ViewKind, parse_scatter_payload, render_scatter_payload, render_view, svg_fragment,
};
pub use error::{Error, Result};
pub use html::escape;
pub use model::{
    AllocationTable, AssetAllocation, AssetReturn, PerformanceTable, PortfolioPerformance,
    Position, ReturnsTable, ScatterPoint, ScatterTable,
};
pub use positions::{POSITION_COLUMNS, position_cells, positions_header_html, positions_rows_html};
pub use provider::{DashboardData, DashboardSnapshot, JsonFileData, SampleData};
pub use render::{ChartView, Renderer};
pub use svg::SvgScene;
pub use views::{ViewMarks, bar_view, line_view, pie_view, scatter_view};
