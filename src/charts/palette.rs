//! Colors shared by the interactive and static charts.

/// Series colors as RGB triples.
pub const SERIES_RGB: [(u8, u8, u8); 6] = [
    (0, 51, 153),   // Navy
    (0, 112, 192),  // Blue
    (237, 125, 49), // Orange
    (112, 173, 71), // Green
    (155, 89, 182), // Purple
    (192, 0, 0),    // Dark red
];

const HEAT_LOW: (u8, u8, u8) = (255, 247, 188);
const HEAT_MID: (u8, u8, u8) = (254, 153, 41);
const HEAT_HIGH: (u8, u8, u8) = (153, 52, 4);

pub fn series_rgb(index: usize) -> (u8, u8, u8) {
    SERIES_RGB[index % SERIES_RGB.len()]
}

/// Sequential yellow-orange-brown scale, `t` clamped to [0, 1].
pub fn heat_rgb(t: f64) -> (u8, u8, u8) {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    if t < 0.5 {
        lerp(HEAT_LOW, HEAT_MID, t * 2.0)
    } else {
        lerp(HEAT_MID, HEAT_HIGH, (t - 0.5) * 2.0)
    }
}

/// Position of `value` inside `[lo, hi]`; a degenerate range maps to the middle.
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi - lo <= f64::EPSILON {
        0.5
    } else {
        (value - lo) / (hi - lo)
    }
}

/// Black or white, whichever reads better on the given background.
pub fn contrast_text(rgb: (u8, u8, u8)) -> (u8, u8, u8) {
    let (r, g, b) = rgb;
    let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luma > 150.0 {
        (0, 0, 0)
    } else {
        (255, 255, 255)
    }
}

fn lerp(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
