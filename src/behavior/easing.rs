//! Tween math.

/// Quadratic ease-in-out over `p` in `[0, 1]`; `p` is clamped.
pub fn ease_in_out_quad(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        2.0 * p * p
    } else {
        -1.0 + (4.0 - 2.0 * p) * p
    }
}

/// Normalized progress `elapsed / duration`; a zero duration is already done.
pub fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

/// `Math.round`: halves round toward positive infinity.
pub fn round_half_up(x: f64) -> f64 {
    // `+ 0.0` turns a rounded `-0` into `0`
    (x + 0.5).floor() + 0.0
}
