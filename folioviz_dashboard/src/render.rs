// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding mark lists to a presentation backend.

use folioviz_core::{Mark, MarkDiff, Scene};

/// A presentation backend fed with scene changes.
///
/// Geometry is fully resolved before it reaches a renderer; implementations only mirror the
/// entered, updated and exited marks into their own representation.
pub trait Renderer {
    /// Applies one batch of scene changes.
    fn apply_diffs(&mut self, diffs: &[MarkDiff]);
}

/// A retained view: a [`Scene`] paired with the renderer that displays it.
///
/// Rendering the same marks again emits no diffs, so the backend never duplicates elements.
#[derive(Debug, Default)]
pub struct ChartView<R> {
    scene: Scene,
    renderer: R,
}

impl<R: Renderer> ChartView<R> {
    /// Creates a view with an empty scene.
    pub fn new(renderer: R) -> Self {
        Self {
            scene: Scene::new(),
            renderer,
        }
    }

    /// Ticks the scene to `marks` and forwards the resulting diffs.
    ///
    /// Returns the number of diffs applied.
    pub fn render(&mut self, marks: impl IntoIterator<Item = Mark>) -> usize {
        let diffs = self.scene.tick(marks);
        if !diffs.is_empty() {
            self.renderer.apply_diffs(&diffs);
        }
        tracing::trace!(diffs = diffs.len(), marks = self.scene.len(), "view rendered");
        diffs.len()
    }

    /// The backend.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consumes the view and returns the backend.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use folioviz_core::MarkId;
    use kurbo::Rect;
    use peniko::color::palette::css;

    use super::*;

    #[derive(Debug, Default)]
    struct Counting {
        enters: usize,
        updates: usize,
        exits: usize,
    }

    impl Renderer for Counting {
        fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
            for diff in diffs {
                match diff {
                    MarkDiff::Enter { .. } => self.enters += 1,
                    MarkDiff::Update { .. } => self.updates += 1,
                    MarkDiff::Exit { .. } => self.exits += 1,
                }
            }
        }
    }

    fn bar(id: u64, height: f64) -> Mark {
        Mark::builder(MarkId(id))
            .rect_geometry(Rect::new(0.0, 0.0, 5.0, height))
            .fill(css::STEEL_BLUE)
            .build()
    }

    #[test]
    fn rerendering_only_forwards_changes() {
        let mut view = ChartView::new(Counting::default());
        assert_eq!(view.render([bar(1, 2.0), bar(2, 3.0)]), 2);
        assert_eq!(view.render([bar(1, 2.0), bar(2, 3.0)]), 0);
        assert_eq!(view.render([bar(1, 4.0)]), 2);

        let counts = view.into_renderer();
        assert_eq!(counts.enters, 2);
        assert_eq!(counts.updates, 1);
        assert_eq!(counts.exits, 1);
    }
}
