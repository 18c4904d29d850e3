/// 2D arc/bulge math utilities.
///
/// Bulge convention: `bulge = tan(sweep_angle / 4)`.
/// - `bulge = 0`: straight line
/// - `bulge > 0`: counter-clockwise arc
/// - `bulge < 0`: clockwise arc
/// - `|bulge| = 1`: semicircle
use std::f64::consts::{PI, TAU};

use super::{Point2, Vector2};

/// Converts a bulge-defined arc segment to center-radius-angle form.
///
/// Returns `(center, radius, start_angle, sweep_angle)`. Zero-length chords
/// return a degenerate arc with zero radius.
#[must_use]
pub fn arc_from_bulge(p0: &Point2, p1: &Point2, bulge: f64) -> (Point2, f64, f64, f64) {
    let chord = p1 - p0;
    let chord_len = chord.norm();

    if chord_len < 1e-12 || bulge.abs() < 1e-12 {
        return (*p0, 0.0, 0.0, 0.0);
    }

    // Distance from chord midpoint to center.
    let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
    let mid = p0 + chord * 0.5;

    // Normal to chord pointing toward center (for positive bulge, center is left of chord).
    let normal = Vector2::new(-chord.y, chord.x) / chord_len;
    let center = mid + normal * (sagitta_ratio * chord_len * 0.5);

    // r = d*(1+b²)/(4*|b|) derived from r = d/(2*sin(θ/2)) with θ=4*atan(b)
    let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());

    let start_angle = angle_of(&center, p0);
    let sweep = 4.0 * bulge.atan();

    (center, radius, start_angle, sweep)
}

/// Converts arc endpoints + center back to bulge value.
///
/// `is_ccw`: true for counter-clockwise arc, false for clockwise.
#[must_use]
pub fn bulge_from_arc(p0: &Point2, p1: &Point2, center: &Point2, is_ccw: bool) -> f64 {
    let sweep = sweep_between(angle_of(center, p0), angle_of(center, p1), is_ccw);
    (sweep / 4.0).tan()
}

/// Signed sweep from `start_angle` to `end_angle` travelling in the given direction.
///
/// CCW sweeps lie in `[0, 2π)`, CW sweeps in `(-2π, 0]`.
#[must_use]
pub fn sweep_between(start_angle: f64, end_angle: f64, is_ccw: bool) -> f64 {
    let delta = normalize_angle(end_angle - start_angle);
    if is_ccw || delta == 0.0 {
        delta
    } else {
        delta - TAU
    }
}

/// Polar angle of `p` as seen from `center`.
#[must_use]
pub fn angle_of(center: &Point2, p: &Point2) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Rotates `p` about `center` by `angle` radians (CCW positive).
#[must_use]
pub fn rotate_about(p: &Point2, center: &Point2, angle: f64) -> Point2 {
    let (sin, cos) = angle.sin_cos();
    let v = p - center;
    Point2::new(
        center.x + v.x * cos - v.y * sin,
        center.y + v.x * sin + v.y * cos,
    )
}

/// Places a point at `radius` from `center` along the ray through `through`.
///
/// Returns `through` unchanged when it coincides with the center.
#[must_use]
pub fn project_to_radius(center: &Point2, through: &Point2, radius: f64) -> Point2 {
    let v = through - center;
    let len = v.norm();
    if len < 1e-12 {
        return *through;
    }
    center + v * (radius / len)
}

/// Normalizes an angle to `[0, 2π)`.
#[must_use]
pub fn normalize_angle(a: f64) -> f64 {
    let mut r = a % TAU;
    if r < 0.0 {
        r += TAU;
    }
    if r >= TAU {
        r -= TAU;
    }
    r
}

/// Smallest absolute angle between two directions, in `[0, π]`.
#[must_use]
pub fn angle_between(a: &Vector2, b: &Vector2) -> f64 {
    let cross = a.x * b.y - a.y * b.x;
    let dot = a.dot(b);
    cross.atan2(dot).abs().min(PI)
}
