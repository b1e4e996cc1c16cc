// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric tick label formatting.

extern crate alloc;

use alloc::string::String;

#[cfg(all(not(feature = "std"), not(test)))]
use crate::float::FloatExt;

/// Formats `v` with as many decimals as `step` needs, grouping thousands with commas.
///
/// `format_tick_with_step(20000.0, 5000.0)` is `"20,000"`, `format_tick_with_step(0.5, 0.1)` is
/// `"0.5"`. A non-positive or non-finite step formats with up to 6 decimals, trimmed.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    let decimals = decimals_for_step(step);
    let mut s = alloc::format!("{v:.decimals$}");
    if !(step.is_finite() && step > 0.0) && s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    // `-0` reads badly on an axis.
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s.remove(0);
    }
    group_thousands(&s)
}

fn decimals_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 6;
    }
    let mut decimals = 0_usize;
    let mut scaled = step;
    while decimals < 6 && (scaled - scaled.round()).abs() > 1e-9 * scaled.abs().max(1.0) {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int, frac) = match rest.find('.') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let mut out = String::with_capacity(s.len() + int.len() / 3);
    out.push_str(sign);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac);
    out
}
