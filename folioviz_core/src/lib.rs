// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark model and scene diffing for folioviz.
//!
//! A view is described as a flat list of [`Mark`]s, each with a stable [`MarkId`]. A [`Scene`]
//! remembers the marks it was last ticked with and reports what changed as [`MarkDiff`]s:
//! - `Enter` for ids it has not seen before,
//! - `Update` for ids whose payload or z-index changed,
//! - `Exit` for ids that are no longer present.
//!
//! Renderers consume diffs rather than full mark lists, so rendering the same view twice never
//! duplicates elements.
//!
//! Record collections are exposed to chart builders through the [`TableData`] accessor trait.

#![no_std]

extern crate alloc;

mod mark;
mod scene;
mod table;

pub use mark::{
    HoverStroke, Mark, MarkBuilder, MarkId, MarkKind, MarkPayload, PathPayload, RectPayload,
    TextAnchor, TextBaseline, TextPayload,
};
pub use scene::{MarkDiff, Scene};
pub use table::{ColId, TableData, TableId};
