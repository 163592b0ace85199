//! Pure geometry utilities shared by the element model, culling and
//! hit-testing. No state, no allocation beyond the returned values.

use kurbo::{Point, Rect};

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2 - p1).hypot()
}

/// Angle of the vector from `p1` to `p2`, in radians.
pub fn angle(p1: Point, p2: Point) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x)
}

/// Linear interpolation between two points. `t` is unconstrained, so values
/// outside `[0, 1]` extrapolate.
pub fn interpolate(p1: Point, p2: Point, t: f64) -> Point {
    Point::new(p1.x + (p2.x - p1.x) * t, p1.y + (p2.y - p1.y) * t)
}

/// Axis-aligned bounding box of a point sequence.
///
/// An empty slice yields the degenerate zero rect rather than an error; a
/// single point yields a zero-size rect at that point.
pub fn bounding_box(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };

    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;

    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Rect::new(min_x, min_y, max_x, max_y)
}

/// Whether two rectangles overlap on both axes.
///
/// Strict inequalities in both directions: rectangles that merely touch along
/// an edge do not intersect.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Whether a point lies inside a rectangle (inclusive of edges).
pub fn point_in_rect(point: Point, rect: Rect) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Resample a path through a Catmull-Rom spline.
///
/// Inputs with fewer than 3 points are returned unchanged. Missing virtual
/// neighbors at the ends are clamped to the nearest real point. Each segment
/// is sampled at a fixed parametric step of 0.1 (11 samples per segment);
/// sampling is not arc-length-uniform, which is a known limitation of this
/// resampler rather than something callers should compensate for.
pub fn smooth_path(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut smoothed = Vec::with_capacity((points.len() - 1) * 11);

    for i in 0..points.len() - 1 {
        let p0 = if i > 0 { points[i - 1] } else { points[i] };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = if i + 2 < points.len() { points[i + 2] } else { p2 };

        for step in 0..=10 {
            let t = step as f64 * 0.1;
            smoothed.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }

    smoothed
}

/// Evaluate the uniform Catmull-Rom spline through `p1`..`p2` at parameter
/// `t`, with `p0`/`p3` as control neighbors.
fn catmull_rom(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;

    let x = 0.5
        * (2.0 * p1.x
            + (-p0.x + p2.x) * t
            + (2.0 * p0.x - 5.0 * p1.x + 4.0 * p2.x - p3.x) * t2
            + (-p0.x + 3.0 * p1.x - 3.0 * p2.x + p3.x) * t3);
    let y = 0.5
        * (2.0 * p1.y
            + (-p0.y + p2.y) * t
            + (2.0 * p0.y - 5.0 * p1.y + 4.0 * p2.y - p3.y) * t2
            + (-p0.y + 3.0 * p1.y - 3.0 * p2.y + p3.y) * t3);

    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Point::new(1.0, 1.0), Point::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_angle() {
        let a = angle(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert!((a - std::f64::consts::FRAC_PI_4).abs() < 1e-12);

        let a = angle(Point::new(0.0, 0.0), Point::new(-1.0, 0.0));
        assert!((a - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(10.0, 20.0);
        assert_eq!(interpolate(p1, p2, 0.0), p1);
        assert_eq!(interpolate(p1, p2, 1.0), p2);
        assert_eq!(interpolate(p1, p2, 0.5), Point::new(5.0, 10.0));
        // Extrapolation is allowed
        assert_eq!(interpolate(p1, p2, 2.0), Point::new(20.0, 40.0));
        assert_eq!(interpolate(p1, p2, -1.0), Point::new(-10.0, -20.0));
    }

    #[test]
    fn test_bounding_box_empty() {
        assert_eq!(bounding_box(&[]), Rect::ZERO);
    }

    #[test]
    fn test_bounding_box_single_point() {
        let bbox = bounding_box(&[Point::new(5.0, -3.0)]);
        assert_eq!(bbox, Rect::new(5.0, -3.0, 5.0, -3.0));
        assert_eq!(bbox.width(), 0.0);
        assert_eq!(bbox.height(), 0.0);
    }

    #[test]
    fn test_bounding_box_many() {
        let bbox = bounding_box(&[
            Point::new(10.0, 0.0),
            Point::new(-5.0, 20.0),
            Point::new(3.0, -7.0),
        ]);
        assert_eq!(bbox, Rect::new(-5.0, -7.0, 10.0, 20.0));
    }

    #[test]
    fn test_rects_intersect_self() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rects_intersect(r, r));
    }

    #[test]
    fn test_rects_intersect_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 20.0, 20.0);
        assert!(rects_intersect(a, b));
        assert!(rects_intersect(b, a));

        let c = Rect::new(50.0, 50.0, 60.0, 60.0);
        assert!(!rects_intersect(a, c));
        assert!(!rects_intersect(c, a));
    }

    #[test]
    fn test_rects_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!rects_intersect(a, b));
        assert!(!rects_intersect(b, a));

        let c = Rect::new(0.0, 10.0, 10.0, 20.0);
        assert!(!rects_intersect(a, c));
    }

    #[test]
    fn test_point_in_rect() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(point_in_rect(Point::new(5.0, 5.0), r));
        assert!(point_in_rect(Point::new(0.0, 0.0), r));
        assert!(point_in_rect(Point::new(10.0, 10.0), r));
        assert!(!point_in_rect(Point::new(10.1, 5.0), r));
    }

    #[test]
    fn test_smooth_path_short_input_unchanged() {
        let one = vec![Point::new(1.0, 2.0)];
        assert_eq!(smooth_path(&one), one);

        let two = vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)];
        assert_eq!(smooth_path(&two), two);
    }

    #[test]
    fn test_smooth_path_sample_count() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 10.0),
        ];
        let smoothed = smooth_path(&points);
        // 11 samples per segment, 3 segments.
        assert_eq!(smoothed.len(), 33);
    }

    #[test]
    fn test_smooth_path_preserves_endpoints() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
        ];
        let smoothed = smooth_path(&points);

        let first = smoothed[0];
        assert!((first.x - points[0].x).abs() < 1e-9);
        assert!((first.y - points[0].y).abs() < 1e-9);

        // The clamped control-point policy makes the last sample of the last
        // segment land on the final input point.
        let last = smoothed[smoothed.len() - 1];
        assert!((last.x - points[2].x).abs() < 1e-9);
        assert!((last.y - points[2].y).abs() < 1e-9);
    }

    #[test]
    fn test_smooth_path_passes_through_knots() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
        ];
        let smoothed = smooth_path(&points);
        // t = 0 of the second segment is the middle input point.
        let knot = smoothed[11];
        assert!((knot.x - 10.0).abs() < 1e-9);
        assert!((knot.y - 10.0).abs() < 1e-9);
    }
}
