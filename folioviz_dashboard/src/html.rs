// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTML text escaping.

/// Escapes `s` for use in HTML/SVG text content and quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
