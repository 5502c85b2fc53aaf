use lopdf::content::Operation;
use lopdf::{Object, StringFormat};
use quire_layout::painting::FillMode;
use quire_types::Color;

/// Bezier control point distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

/// Maps text to WinAnsi (cp1252) bytes for the Standard-14 fonts.
///
/// Characters with no WinAnsi code, and C1 controls, become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\u{0000}'..='\u{007F}' | '\u{00A0}'..='\u{00FF}' => c as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => b'?',
    }
}

pub(crate) fn literal(s: &str) -> Object {
    Object::String(to_win_ansi(s), StringFormat::Literal)
}

pub(crate) fn reals(values: &[f32]) -> Vec<Object> {
    values.iter().map(|&v| v.into()).collect()
}

pub(crate) fn fill_color(color: &Color) -> Operation {
    Operation::new("rg", reals(&color.components()))
}

pub(crate) fn stroke_color(color: &Color) -> Operation {
    Operation::new("RG", reals(&color.components()))
}

/// `[] 0 d` for solid lines; an all-zero array is rejected by some readers.
pub(crate) fn dash(pattern: &[f32]) -> Operation {
    let array = if pattern.iter().all(|&v| v == 0.0) {
        Vec::new()
    } else {
        reals(pattern)
    };
    Operation::new("d", vec![Object::Array(array), 0.into()])
}

pub(crate) fn paint(fill: FillMode) -> Operation {
    let operator = match fill {
        FillMode::Fill => "f",
        FillMode::Stroke => "S",
        FillMode::FillAndStroke => "B",
    };
    Operation::new(operator, vec![])
}

pub(crate) fn rectangle(x1: f32, y1: f32, x2: f32, y2: f32) -> Operation {
    let (x, y) = (x1.min(x2), y1.min(y2));
    Operation::new("re", reals(&[x, y, (x2 - x1).abs(), (y2 - y1).abs()]))
}

pub(crate) fn polygon(xs: &[f32], ys: &[f32]) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(xs.len() + 1);
    for (i, (&x, &y)) in xs.iter().zip(ys).enumerate() {
        let operator = if i == 0 { "m" } else { "l" };
        ops.push(Operation::new(operator, reals(&[x, y])));
    }
    if !ops.is_empty() {
        ops.push(Operation::new("h", vec![]));
    }
    ops
}

/// A closed rectangle path with quarter-circle corners.
///
/// The radius is clamped to half of the shorter side.
pub(crate) fn rounded_rectangle(x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) -> Vec<Operation> {
    let (left, right) = (x1.min(x2), x1.max(x2));
    let (bottom, top) = (y1.min(y2), y1.max(y2));
    let r = radius.max(0.0).min((right - left) / 2.0).min((top - bottom) / 2.0);
    if r == 0.0 {
        return vec![rectangle(left, bottom, right, top)];
    }
    let k = r * KAPPA;
    let curve = |points: [f32; 6]| Operation::new("c", reals(&points));
    vec![
        Operation::new("m", reals(&[left + r, bottom])),
        Operation::new("l", reals(&[right - r, bottom])),
        curve([right - r + k, bottom, right, bottom + r - k, right, bottom + r]),
        Operation::new("l", reals(&[right, top - r])),
        curve([right, top - r + k, right - r + k, top, right - r, top]),
        Operation::new("l", reals(&[left + r, top])),
        curve([left + r - k, top, left, top - r + k, left, top - r]),
        Operation::new("l", reals(&[left, bottom + r])),
        curve([left, bottom + r - k, left + r - k, bottom, left + r, bottom]),
        Operation::new("h", vec![]),
    ]
}
