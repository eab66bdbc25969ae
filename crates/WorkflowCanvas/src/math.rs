use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::CurveConfig;

/// Number of line segments used when flattening a curve for hit-testing.
const CURVE_SEGMENTS: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Horizontal control-point offset for a curve spanning `distance` pixels.
///
/// `clamp(distance * factor, min, max)`.
pub fn control_offset(distance: f32, curve: &CurveConfig) -> f32 {
    (distance * curve.offset_factor).clamp(curve.min_offset, curve.max_offset)
}

/// Calculates the two control points for a cubic Bezier curve connecting `start` to `end`.
///
/// The curve leaves `start` and enters `end` horizontally whatever the vertical offset.
pub fn calculate_bezier_points(start: Vec2, end: Vec2, curve: &CurveConfig) -> (Vec2, Vec2) {
    let k = control_offset(start.distance(end), curve);
    let cp1 = start + Vec2::new(k, 0.0);
    let cp2 = end - Vec2::new(k, 0.0);
    (cp1, cp2)
}

/// Evaluates a cubic Bezier curve at `t` in `[0, 1]`.
pub fn cubic_point(start: Vec2, cp1: Vec2, cp2: Vec2, end: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    start * (u * u * u) + cp1 * (3.0 * u * u * t) + cp2 * (3.0 * u * t * t) + end * (t * t * t)
}

/// Distance from `p` to the segment `a..b`.
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Approximate distance from `p` to the connection curve between `start` and `end`.
pub fn distance_to_curve(p: Vec2, start: Vec2, end: Vec2, curve: &CurveConfig) -> f32 {
    let (cp1, cp2) = calculate_bezier_points(start, end, curve);
    let mut prev = start;
    let mut best = f32::INFINITY;
    for i in 1..=CURVE_SEGMENTS {
        let t = i as f32 / CURVE_SEGMENTS as f32;
        let next = cubic_point(start, cp1, cp2, end, t);
        best = best.min(distance_to_segment(p, prev, next));
        prev = next;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_points_mid_range() {
        let (cp1, cp2) = calculate_bezier_points(
            Vec2::new(0.0, 0.0),
            Vec2::new(200.0, 0.0),
            &CurveConfig::default(),
        );
        assert_eq!(cp1, Vec2::new(80.0, 0.0));
        assert_eq!(cp2, Vec2::new(120.0, 0.0));
    }

    #[test]
    fn test_control_offset_clamps_short_distance() {
        let (cp1, cp2) = calculate_bezier_points(
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 0.0),
            &CurveConfig::default(),
        );
        assert_eq!(cp1, Vec2::new(50.0, 0.0));
        assert_eq!(cp2, Vec2::new(-30.0, 0.0));
    }

    #[test]
    fn test_control_offset_clamps_long_distance() {
        let (cp1, cp2) = calculate_bezier_points(
            Vec2::new(0.0, 0.0),
            Vec2::new(1000.0, 0.0),
            &CurveConfig::default(),
        );
        assert_eq!(cp1, Vec2::new(150.0, 0.0));
        assert_eq!(cp2, Vec2::new(850.0, 0.0));
    }

    #[test]
    fn test_control_points_stay_horizontal() {
        let start = Vec2::new(10.0, 10.0);
        let end = Vec2::new(110.0, 300.0);
        let (cp1, cp2) = calculate_bezier_points(start, end, &CurveConfig::default());
        assert_eq!(cp1.y, start.y);
        assert_eq!(cp2.y, end.y);
    }

    #[test]
    fn test_cubic_endpoints() {
        let (a, b, c, d) = (
            Vec2::ZERO,
            Vec2::new(1.0, 2.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(5.0, 6.0),
        );
        assert_eq!(cubic_point(a, b, c, d, 0.0), a);
        assert_eq!(cubic_point(a, b, c, d, 1.0), d);
    }

    #[test]
    fn test_distance_to_straight_curve() {
        let curve = CurveConfig::default();
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(200.0, 0.0);
        assert!(distance_to_curve(Vec2::new(100.0, 0.0), start, end, &curve) < 0.01);
        assert!((distance_to_curve(Vec2::new(100.0, 10.0), start, end, &curve) - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 30.0)));
        assert!(!r.contains(Vec2::new(30.1, 30.0)));
        assert_eq!(r.center(), Vec2::new(20.0, 20.0));
    }
}
