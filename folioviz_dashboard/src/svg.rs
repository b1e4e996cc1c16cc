// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of a retained mark set.

use std::collections::HashMap;

use folioviz_charts::Size;
use folioviz_core::{MarkDiff, MarkId, MarkPayload, PathPayload, TextAnchor, TextBaseline};
use kurbo::Join;
use peniko::color::Srgb;
use peniko::{Brush, Gradient};

use crate::html::escape;
use crate::render::Renderer;

/// Marks mirrored from scene diffs, serialized as a fixed-size `<svg>` element.
#[derive(Debug)]
pub struct SvgScene {
    marks: HashMap<MarkId, (i32, MarkPayload)>,
    size: Size,
    class: Option<String>,
}

impl SvgScene {
    /// Creates an empty scene of the given pixel size.
    pub fn new(size: Size) -> Self {
        Self {
            marks: HashMap::new(),
            size,
            class: None,
        }
    }

    /// Sets the `class` attribute of the root element.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Number of retained marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if no marks are retained.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Serializes the retained marks in `(z_index, id)` order.
    ///
    /// Gradient fills are drawn diagonally across the painted element's bounding box, from its
    /// top-left to its bottom-right corner.
    pub fn to_svg_string(&self) -> String {
        let (w, h) = (self.size.width, self.size.height);
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        if let Some(class) = &self.class {
            out.push_str(&format!(r#"class="{}" "#, escape(class)));
        }
        out.push_str(&format!(
            r#"width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#
        ));
        out.push('\n');

        let mut ordered: Vec<(&MarkId, &(i32, MarkPayload))> = self.marks.iter().collect();
        ordered.sort_by_key(|(id, (z, _))| (*z, **id));

        let mut defs = String::new();
        let mut body = String::new();
        for (id, (_z, payload)) in ordered {
            match payload {
                MarkPayload::Rect(r) => {
                    body.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        r.rect.x0,
                        r.rect.y0,
                        r.rect.width(),
                        r.rect.height(),
                    ));
                    write_fill(&mut body, &mut defs, *id, &r.fill, 1.0);
                    body.push_str("/>\n");
                }
                MarkPayload::Text(t) => {
                    body.push_str(&format!(
                        r#"<text x="{}" y="{}" font-size="{}""#,
                        t.pos.x, t.pos.y, t.font_size
                    ));
                    let baseline = match t.baseline {
                        TextBaseline::Alphabetic => None,
                        TextBaseline::Middle => Some("middle"),
                        TextBaseline::Hanging => Some("hanging"),
                        TextBaseline::Ideographic => Some("ideographic"),
                    };
                    if let Some(baseline) = baseline {
                        body.push_str(&format!(r#" dominant-baseline="{baseline}""#));
                    }
                    body.push_str(match t.anchor {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    write_fill(&mut body, &mut defs, *id, &t.fill, 1.0);
                    body.push('>');
                    body.push_str(&escape(&t.text));
                    body.push_str("</text>\n");
                }
                MarkPayload::Path(p) => {
                    body.push_str(&format!(r#"<path d="{}""#, p.path.to_svg()));
                    write_fill(&mut body, &mut defs, *id, &p.fill, p.fill_opacity);
                    write_stroke(&mut body, p);
                    body.push_str("/>\n");
                }
            }
        }

        if !defs.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&defs);
            out.push_str("</defs>\n");
        }
        out.push_str(&body);
        out.push_str("</svg>\n");
        out
    }
}

impl Renderer for SvgScene {
    fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id, z_index, new, ..
                } => {
                    self.marks.insert(*id, (*z_index, (**new).clone()));
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    new,
                    ..
                } => {
                    self.marks.insert(*id, (*new_z_index, (**new).clone()));
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }
}

fn hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Color and opacity of a solid brush; `None` for anything else.
fn solid_paint(brush: &Brush) -> Option<(String, f64)> {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            Some((hex([rgba.r, rgba.g, rgba.b]), f64::from(rgba.a) / 255.0))
        }
        _ => None,
    }
}

fn gradient_id(id: MarkId) -> String {
    format!("fv-gradient-{}", id.0)
}

fn write_gradient_def(defs: &mut String, id: MarkId, gradient: &Gradient) {
    defs.push_str(&format!(
        r#"<linearGradient id="{}" x1="0%" y1="0%" x2="100%" y2="100%">"#,
        gradient_id(id)
    ));
    for stop in gradient.stops.iter() {
        let rgba = stop.color.to_alpha_color::<Srgb>().to_rgba8();
        defs.push_str(&format!(
            r#"<stop offset="{}%" stop-color="{}" stop-opacity="{}"/>"#,
            f64::from(stop.offset) * 100.0,
            hex([rgba.r, rgba.g, rgba.b]),
            f64::from(rgba.a) / 255.0,
        ));
    }
    defs.push_str("</linearGradient>\n");
}

fn write_fill(out: &mut String, defs: &mut String, id: MarkId, brush: &Brush, opacity: f64) {
    let opacity = match brush {
        Brush::Gradient(gradient) => {
            write_gradient_def(defs, id, gradient);
            out.push_str(&format!(r#" fill="url(#{})""#, gradient_id(id)));
            opacity
        }
        _ => match solid_paint(brush) {
            Some((color, alpha)) => {
                out.push_str(&format!(r#" fill="{color}""#));
                alpha * opacity
            }
            None => {
                out.push_str(r#" fill="none""#);
                1.0
            }
        },
    };
    if opacity < 1.0 {
        out.push_str(&format!(r#" fill-opacity="{opacity}""#));
    }
}

fn write_stroke(out: &mut String, path: &PathPayload) {
    if path.stroke_width <= 0.0 {
        return;
    }
    let Some((color, alpha)) = solid_paint(&path.stroke) else {
        return;
    };
    out.push_str(&format!(
        r#" stroke="{color}" stroke-width="{}""#,
        path.stroke_width
    ));
    if alpha < 1.0 {
        out.push_str(&format!(r#" stroke-opacity="{alpha}""#));
    }
    match path.stroke_join {
        Join::Round => out.push_str(r#" stroke-linejoin="round""#),
        Join::Bevel => out.push_str(r#" stroke-linejoin="bevel""#),
        Join::Miter => {}
    }
    if let Some(hover) = &path.hover {
        let hover_color = solid_paint(&hover.brush).map_or(color.clone(), |(c, _)| c);
        out.push_str(&format!(
            r#" onmouseover="this.setAttribute('stroke','{hover_color}');this.setAttribute('stroke-width','{}')""#,
            hover.stroke_width
        ));
        out.push_str(&format!(
            r#" onmouseout="this.setAttribute('stroke','{color}');this.setAttribute('stroke-width','{}')""#,
            path.stroke_width
        ));
    }
}

#[cfg(test)]
mod tests {
    use folioviz_core::{HoverStroke, Mark};
    use kurbo::{BezPath, Point, Rect};
    use peniko::color::palette::css;

    use super::*;
    use crate::render::ChartView;

    fn triangle() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((5.0, 8.0));
        path.close_path();
        path
    }

    #[test]
    fn marks_serialize_in_paint_order() {
        let mut view = ChartView::new(SvgScene::new(Size::new(100.0, 50.0)));
        view.render([
            Mark::builder(MarkId(2))
                .text()
                .pos(Point::new(3.0, 4.0))
                .content("A & B")
                .fill(css::BLACK)
                .z_index(5)
                .build(),
            Mark::builder(MarkId(1))
                .rect_geometry(Rect::new(1.0, 2.0, 11.0, 22.0))
                .fill(css::STEEL_BLUE)
                .build(),
        ]);
        let svg = view.renderer().to_svg_string();
        assert!(
            svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50""#),
            "{svg}"
        );
        let rect = svg.find("<rect").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(rect < text, "{svg}");
        assert!(svg.contains(r##"width="10" height="20" fill="#4682b4""##), "{svg}");
        assert!(svg.contains(">A &amp; B</text>"), "{svg}");
    }

    #[test]
    fn gradient_fill_emits_a_definition() {
        let gradient = Gradient::new_linear((0.0, 0.0), (10.0, 8.0))
            .with_stops([css::STEEL_BLUE, css::WHITE].as_slice());
        let mark = Mark::builder(MarkId(7))
            .path()
            .path_geometry(triangle())
            .fill(gradient)
            .fill_opacity(0.5)
            .build();
        let mut view = ChartView::new(SvgScene::new(Size::new(20.0, 20.0)));
        view.render([mark]);
        let svg = view.into_renderer().to_svg_string();
        assert!(svg.contains(r#"<linearGradient id="fv-gradient-7""#), "{svg}");
        assert!(svg.contains(r##"stop-color="#4682b4""##), "{svg}");
        assert!(svg.contains(r##"stop-color="#ffffff""##), "{svg}");
        assert!(svg.contains(r#"fill="url(#fv-gradient-7)" fill-opacity="0.5""#), "{svg}");
    }

    #[test]
    fn hover_stroke_swaps_and_reverts() {
        let mark = Mark::builder(MarkId(3))
            .path()
            .path_geometry(triangle())
            .stroke(css::STEEL_BLUE, 1.5)
            .stroke_join(Join::Round)
            .hover_stroke(HoverStroke {
                brush: css::BLACK.into(),
                stroke_width: 2.0,
            })
            .build();
        let mut view = ChartView::new(SvgScene::new(Size::new(20.0, 20.0)));
        view.render([mark]);
        let svg = view.renderer().to_svg_string();
        assert!(svg.contains(r#"stroke-linejoin="round""#), "{svg}");
        assert!(
            svg.contains("onmouseover=\"this.setAttribute('stroke','#000000');this.setAttribute('stroke-width','2')\""),
            "{svg}"
        );
        assert!(
            svg.contains("onmouseout=\"this.setAttribute('stroke','#4682b4');this.setAttribute('stroke-width','1.5')\""),
            "{svg}"
        );
    }

    #[test]
    fn exited_marks_are_removed() {
        let mut view = ChartView::new(SvgScene::new(Size::new(20.0, 20.0)));
        let bar = |id| {
            Mark::builder(MarkId(id))
                .rect_geometry(Rect::new(0.0, 0.0, 1.0, 1.0))
                .build()
        };
        view.render([bar(1), bar(2)]);
        view.render([bar(1), bar(2)]);
        assert_eq!(view.renderer().len(), 2);
        view.render([bar(2)]);
        assert_eq!(view.renderer().len(), 1);
        assert_eq!(view.renderer().to_svg_string().matches("<rect").count(), 1);
    }
}
