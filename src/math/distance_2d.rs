use super::Point2;

/// Returns the perpendicular distance from `p` to the infinite line through `a` and `b`.
#[must_use]
pub fn point_to_line_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len = ab.norm();
    if len < 1e-10 {
        return (p - a).norm();
    }
    let ap = p - a;
    (ab.x * ap.y - ab.y * ap.x).abs() / len
}

/// Returns the distance from `p` to the full circle of `radius` around `center`.
#[must_use]
pub fn point_to_circle_dist(p: &Point2, center: &Point2, radius: f64) -> f64 {
    ((p - center).norm() - radius).abs()
}
