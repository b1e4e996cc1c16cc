// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter/update/exit diffing between successive mark lists.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::mark::{Mark, MarkId, MarkKind, MarkPayload};

/// A change between two ticks of a [`Scene`].
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark id seen for the first time.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Paint order.
        z_index: i32,
        /// New payload.
        new: Arc<MarkPayload>,
        /// Bounds of the new payload, if known.
        bounds: Option<Rect>,
    },
    /// A known mark whose payload or z-index changed.
    Update {
        /// Mark id.
        id: MarkId,
        /// Mark kind after the update.
        kind: MarkKind,
        /// Previous paint order.
        old_z_index: i32,
        /// New paint order.
        new_z_index: i32,
        /// Previous payload.
        old: Arc<MarkPayload>,
        /// New payload.
        new: Arc<MarkPayload>,
        /// Bounds of the previous payload, if known.
        old_bounds: Option<Rect>,
        /// Bounds of the new payload, if known.
        new_bounds: Option<Rect>,
    },
    /// A mark id that is no longer present.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Last payload.
        old: Arc<MarkPayload>,
        /// Bounds of the last payload, if known.
        bounds: Option<Rect>,
    },
}

impl MarkDiff {
    /// Returns the id this diff refers to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    z_index: i32,
    payload: Arc<MarkPayload>,
}

/// The retained set of marks last seen by [`Scene::tick`].
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Entry>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if no marks are retained.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Replaces the retained marks with `marks` and returns what changed.
    ///
    /// Diffs for entering and updated marks follow input order; exits follow id order.
    /// If an id appears more than once in `marks`, the last occurrence wins.
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut next: HashMap<MarkId, Entry> = HashMap::new();
        let mut order: Vec<MarkId> = Vec::new();
        for mark in marks {
            let entry = Entry {
                z_index: mark.z_index,
                payload: Arc::new(mark.payload),
            };
            if next.insert(mark.id, entry).is_none() {
                order.push(mark.id);
            }
        }

        let mut diffs = Vec::new();
        for id in &order {
            let new = &next[id];
            match self.marks.get(id) {
                None => diffs.push(MarkDiff::Enter {
                    id: *id,
                    kind: new.payload.kind(),
                    z_index: new.z_index,
                    new: new.payload.clone(),
                    bounds: new.payload.bounds(),
                }),
                Some(old) if old.z_index != new.z_index || old.payload != new.payload => {
                    diffs.push(MarkDiff::Update {
                        id: *id,
                        kind: new.payload.kind(),
                        old_z_index: old.z_index,
                        new_z_index: new.z_index,
                        old: old.payload.clone(),
                        new: new.payload.clone(),
                        old_bounds: old.payload.bounds(),
                        new_bounds: new.payload.bounds(),
                    });
                }
                Some(_) => {}
            }
        }

        let mut gone: Vec<(&MarkId, &Entry)> = self
            .marks
            .iter()
            .filter(|(id, _)| !next.contains_key(*id))
            .collect();
        gone.sort_by_key(|(id, _)| **id);
        diffs.extend(gone.into_iter().map(|(id, old)| MarkDiff::Exit {
            id: *id,
            kind: old.payload.kind(),
            old: old.payload.clone(),
            bounds: old.payload.bounds(),
        }));

        self.marks = next;
        diffs
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::Rect;
    use peniko::color::palette::css;

    use super::*;

    fn bar(id: u64, height: f64) -> Mark {
        Mark::builder(MarkId(id))
            .rect()
            .rect_geometry(Rect::new(0.0, 0.0, 10.0, height))
            .fill(css::STEEL_BLUE)
            .build()
    }

    #[test]
    fn first_tick_enters_every_mark() {
        let mut scene = Scene::new();
        let diffs = scene.tick(vec![bar(1, 5.0), bar(2, 6.0)]);
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn identical_tick_produces_no_diffs() {
        let mut scene = Scene::new();
        scene.tick(vec![bar(1, 5.0), bar(2, 6.0)]);
        let diffs = scene.tick(vec![bar(1, 5.0), bar(2, 6.0)]);
        assert!(diffs.is_empty(), "unexpected diffs: {diffs:?}");
    }

    #[test]
    fn changed_and_removed_marks_update_and_exit() {
        let mut scene = Scene::new();
        scene.tick(vec![bar(1, 5.0), bar(2, 6.0), bar(3, 7.0)]);
        let diffs = scene.tick(vec![bar(1, 5.0), bar(2, 9.0)]);
        let [
            MarkDiff::Update {
                id: updated,
                new_bounds,
                ..
            },
            MarkDiff::Exit { id: exited, .. },
        ] = &diffs[..]
        else {
            panic!("expected one update and one exit, got {diffs:?}");
        };
        assert_eq!(*updated, MarkId(2));
        assert_eq!(*new_bounds, Some(Rect::new(0.0, 0.0, 10.0, 9.0)));
        assert_eq!(*exited, MarkId(3));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn z_index_change_alone_is_an_update() {
        let mut scene = Scene::new();
        scene.tick(vec![bar(1, 5.0)]);
        let mut moved = bar(1, 5.0);
        moved.z_index = 4;
        let diffs = scene.tick(vec![moved]);
        assert!(matches!(
            diffs[..],
            [MarkDiff::Update {
                old_z_index: 0,
                new_z_index: 4,
                ..
            }]
        ));
    }

    #[test]
    fn duplicate_ids_keep_the_last_occurrence() {
        let mut scene = Scene::new();
        let diffs = scene.tick(vec![bar(1, 5.0), bar(1, 8.0)]);
        let [MarkDiff::Enter { new, .. }] = &diffs[..] else {
            panic!("expected a single enter diff");
        };
        let MarkPayload::Rect(r) = &**new else {
            panic!("expected rect payload");
        };
        assert_eq!(r.rect.height(), 8.0);
    }
}
