//! Regular polygon geometry and trigonometry helpers
//!
//! Positions are integer pixels, matching the bounding-box model every
//! entity is drawn and collided with.

use glam::IVec2;

/// Axis-aligned integer rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` centered on `center`
    pub fn square(size: i32, center: IVec2) -> Self {
        let mut rect = Self::new(0, 0, size, size);
        rect.set_center(center);
        rect
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn set_center(&mut self, center: IVec2) {
        self.x = center.x - self.w / 2;
        self.y = center.y - self.h / 2;
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    pub fn translate(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Point inside test, right/bottom edges exclusive
    pub fn contains_point(&self, p: IVec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

/// Vertices of a regular n-gon inscribed in a circle of radius `r`
///
/// Coordinates are local to the bounding box (circle centered at `(r, r)`).
/// The first vertex sits at `start_angle_deg`; the rest follow every
/// `360 / n` degrees. Values are truncated toward zero.
pub fn vertices(n: u32, r: i32, start_angle_deg: f32) -> Vec<IVec2> {
    let step = 360.0 / n as f64;
    let r = r as f64;
    (0..n)
        .map(|i| {
            let theta = (start_angle_deg as f64 + i as f64 * step).to_radians();
            IVec2::new((r + r * theta.sin()) as i32, (r + r * theta.cos()) as i32)
        })
        .collect()
}

/// Per-tick displacement for a speed and angle (radians)
///
/// Both components are rounded up, never to nearest; trajectories depend on it.
pub fn offset(speed: f64, angle: f64) -> IVec2 {
    IVec2::new(
        (speed * angle.cos()).ceil() as i32,
        (speed * angle.sin()).ceil() as i32,
    )
}

/// Angle (radians) of the ray from `origin` toward `target`
pub fn angle_between(origin: IVec2, target: IVec2) -> f64 {
    let d = target - origin;
    (d.y as f64).atan2(d.x as f64)
}

/// Squared distance between two points, widened to avoid overflow
#[inline]
pub fn distance_squared(a: IVec2, b: IVec2) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_vertices_square() {
        let v = vertices(4, 10, 0.0);
        assert_eq!(v.len(), 4);
        // First vertex straight down from the center at angle 0
        assert_eq!(v[0], IVec2::new(10, 20));
        assert_eq!(v[1], IVec2::new(20, 10));
        assert_eq!(v[2], IVec2::new(10, 0));
    }

    #[test]
    fn test_vertices_rotated_triangle_points_up() {
        let v = vertices(3, 20, 180.0);
        assert_eq!(v[0].y, 0);
        // The other two vertices sit below the tip
        assert!(v[1].y > 20 && v[2].y > 20);
    }

    #[test]
    fn test_vertices_stay_inside_bounding_box() {
        for n in 3..12 {
            for p in vertices(n, 25, 37.0) {
                assert!((0..=50).contains(&p.x) && (0..=50).contains(&p.y));
            }
        }
    }

    #[test]
    fn test_offset_straight_up_uses_ceiling() {
        // cos(270°) is a tiny negative number; ceil turns it into 0
        assert_eq!(offset(15.0, PI * 1.5), IVec2::new(0, -15));
    }

    #[test]
    fn test_offset_rounds_up_not_to_nearest() {
        // 3 * cos(330°) = 2.598.. -> 3, 3 * sin(330°) = -1.5 -> -1
        let d = offset(3.0, 330f64.to_radians());
        assert_eq!(d, IVec2::new(3, -1));
    }

    #[test]
    fn test_angle_between() {
        let a = angle_between(IVec2::new(0, 0), IVec2::new(0, 10));
        assert!((a - PI / 2.0).abs() < 1e-9);
        let b = angle_between(IVec2::new(5, 5), IVec2::new(0, 5));
        assert!((b - PI).abs() < 1e-9);
    }

    #[test]
    fn test_rect_edges_and_center() {
        let mut r = Rect::square(40, IVec2::new(400, 500));
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (380, 480, 420, 520));
        r.set_right(799);
        assert_eq!(r.left(), 759);
        assert_eq!(r.center(), IVec2::new(779, 500));
        assert!(r.contains_point(IVec2::new(760, 481)));
        assert!(!r.contains_point(IVec2::new(799, 500)));
    }
}
