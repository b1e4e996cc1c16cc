// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Categorical color assignment.

use peniko::Color;

use crate::scale::Categories;

/// The eight-color "Dark2" qualitative palette.
pub const DARK2: [Color; 8] = [
    Color::from_rgb8(0x1b, 0x9e, 0x77),
    Color::from_rgb8(0xd9, 0x5f, 0x02),
    Color::from_rgb8(0x75, 0x70, 0xb3),
    Color::from_rgb8(0xe7, 0x29, 0x8a),
    Color::from_rgb8(0x66, 0xa6, 0x1e),
    Color::from_rgb8(0xe6, 0xab, 0x02),
    Color::from_rgb8(0xa6, 0x76, 0x1d),
    Color::from_rgb8(0x66, 0x66, 0x66),
];

/// Maps category labels onto a fixed palette, cycling when there are more labels than colors.
#[derive(Clone, Debug)]
pub struct ScaleOrdinal<'a> {
    domain: Categories,
    range: &'a [Color],
}

impl<'a> ScaleOrdinal<'a> {
    /// Creates an ordinal scale over `domain` using `range` as the palette.
    pub fn new(domain: Categories, range: &'a [Color]) -> Self {
        Self { domain, range }
    }

    /// Color for the label at `index` in the domain.
    pub fn color_at(&self, index: usize) -> Option<Color> {
        if self.range.is_empty() {
            return None;
        }
        Some(self.range[index % self.range.len()])
    }

    /// Color for `label`, or `None` if the label is not in the domain.
    pub fn color(&self, label: &str) -> Option<Color> {
        self.color_at(self.domain.index_of(label)?)
    }

    /// The label domain.
    pub fn domain(&self) -> &Categories {
        &self.domain
    }
}

impl ScaleOrdinal<'static> {
    /// An ordinal scale over [`DARK2`].
    pub fn dark2(domain: Categories) -> Self {
        Self::new(domain, &DARK2)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn colors_follow_domain_order_and_cycle() {
        let labels = ["a", "b", "c", "d", "e", "f", "g", "h", "i"];
        let scale = ScaleOrdinal::dark2(Categories::from_labels(labels).unwrap());
        assert_eq!(scale.color("a"), Some(DARK2[0]));
        assert_eq!(scale.color("c"), Some(DARK2[2]));
        assert_eq!(scale.color("i"), Some(DARK2[0]));
        assert_eq!(scale.color("z"), None);
    }

    #[test]
    fn dark2_starts_with_teal() {
        let rgba = DARK2[0].to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (0x1b, 0x9e, 0x77));
    }
}
