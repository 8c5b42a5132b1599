//! Geometric primitives for sensor raycasting and collision checks.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use ndarray::Array1;

/// Calculates the Euclidean distance between two points.
///
/// # Arguments
///
/// * `a` - First point
/// * `b` - Second point
///
/// # Returns
///
/// The Euclidean distance; 0 when the points coincide.
pub fn distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    Euclidean.distance(Point::new(a[0], a[1]), Point::new(b[0], b[1]))
}

/// Computes the entry point of a line segment into a circle.
///
/// The segment is parameterized as `start + t * (end - start)` and substituted
/// into the circle equation, giving a quadratic in `t`. Only the smaller root
/// is considered: a sensor cares about first contact, never the exit point.
///
/// # Arguments
///
/// * `start` - Starting point of the segment
/// * `end` - Ending point of the segment
/// * `center` - Center of the circle
/// * `radius` - Radius of the circle
///
/// # Returns
///
/// The entry point when the near root lies in `[0, 1]`, `None` otherwise.
/// Zero-length segments never intersect.
pub fn segment_circle_intersection(
    start: &Array1<f32>,
    end: &Array1<f32>,
    center: &Array1<f32>,
    radius: f32,
) -> Option<Array1<f32>> {
    let dx = end[0] - start[0];
    let dy = end[1] - start[1];
    let cx = start[0] - center[0];
    let cy = start[1] - center[1];

    // a, b and c are the coefficients of the quadratic in t
    let a = dx * dx + dy * dy;
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * (dx * cx + dy * cy);
    let c = cx * cx + cy * cy - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if (0.0..=1.0).contains(&t) {
        Some(Array1::from_vec(vec![start[0] + t * dx, start[1] + t * dy]))
    } else {
        None
    }
}
