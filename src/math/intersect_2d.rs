use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < TOLERANCE {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        let pt = a0 + da * t_clamped;
        Some((pt, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Intersection of the infinite line `origin + t * dir` with a full circle.
///
/// Returns zero, one (tangent) or two points, ordered by increasing `t`.
#[must_use]
pub fn line_circle_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    center: &Point2,
    radius: f64,
) -> Vec<Point2> {
    let mut results = Vec::new();
    if radius < TOLERANCE {
        return results;
    }

    let len_sq = dir.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return results;
    }

    // Substitute parametric line into circle equation:
    // (ox + t*dx - cx)² + (oy + t*dy - cy)² = r²
    let f = origin - center;
    let a = len_sq;
    let b = 2.0 * f.dot(dir);
    let c = f.norm_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < -TOLERANCE {
        return results;
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();

    if disc_sqrt < TOLERANCE * 100.0 {
        // Tangent case: single root.
        results.push(origin + dir * (-b / (2.0 * a)));
    } else {
        results.push(origin + dir * ((-b - disc_sqrt) / (2.0 * a)));
        results.push(origin + dir * ((-b + disc_sqrt) / (2.0 * a)));
    }

    results
}

/// Intersection of two full circles in 2D.
///
/// Returns zero, one (tangent) or two points. Concentric circles yield none.
#[must_use]
pub fn circle_circle_intersect_2d(c1: &Point2, r1: f64, c2: &Point2, r2: f64) -> Vec<Point2> {
    let mut results = Vec::new();
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return results;
    }

    let delta = c2 - c1;
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();

    if dist < TOLERANCE {
        return results;
    }

    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    if dist > sum + TOLERANCE || dist < diff - TOLERANCE {
        return results;
    }

    // Distance from c1 along the line c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h_sq = r1 * r1 - a * a;
    if h_sq < -TOLERANCE {
        return results;
    }
    let h = h_sq.max(0.0).sqrt();

    let axis = delta / dist;
    let mid = c1 + axis * a;
    let perp = Vector2::new(-axis.y, axis.x);

    if h < TOLERANCE {
        results.push(mid);
    } else {
        results.push(mid + perp * h);
        results.push(mid - perp * h);
    }

    results
}

/// Picks the candidate closest to `hint`.
///
/// Used to choose the intersection branch nearest an un-aligned point.
#[must_use]
pub fn nearest_to(candidates: &[Point2], hint: &Point2) -> Option<Point2> {
    candidates
        .iter()
        .copied()
        .min_by(|a, b| {
            let da = (a - hint).norm_squared();
            let db = (b - hint).norm_squared();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}
