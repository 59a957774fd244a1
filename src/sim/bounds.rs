//! Axis-aligned bounds for every simulated entity
//!
//! An entity's footprint is its position (min corner) plus a validated,
//! strictly positive size. Intersection and viewport tests work on these
//! footprints only.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Strictly positive width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Fails unless both extents are finite and greater than zero
    pub fn new(width: f32, height: f32, what: &'static str) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SimError::InvalidDimensions { what, width, height });
        }
        Ok(Self { width, height })
    }

    /// Square of the given edge length
    pub fn square(edge: f32, what: &'static str) -> Result<Self> {
        Self::new(edge, edge, what)
    }

    /// This size multiplied by `factor` (fails if the result is not positive)
    pub fn scaled(self, factor: f32, what: &'static str) -> Result<Self> {
        Self::new(self.width * factor, self.height * factor, what)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Anything with a rectangular footprint
pub trait Bounded {
    /// Min corner
    fn position(&self) -> Vec2;
    fn size(&self) -> Size;

    #[inline]
    fn x(&self) -> f32 {
        self.position().x
    }

    #[inline]
    fn y(&self) -> f32 {
        self.position().y
    }

    #[inline]
    fn width(&self) -> f32 {
        self.size().width()
    }

    #[inline]
    fn height(&self) -> f32 {
        self.size().height()
    }

    /// Footprint as a plain rectangle
    fn bounds(&self) -> Bounds {
        Bounds::new(self.position(), self.size().as_vec2())
    }
}

/// A plain rectangle, used for grid queries and viewport tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub extent: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, extent: Vec2) -> Self {
        Self { min, extent }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.extent
    }

    /// Strict overlap with the viewport `[0, width] x [0, height]`
    ///
    /// Touching an edge from outside counts as leaving the screen.
    pub fn overlaps_viewport(&self, width: f32, height: f32) -> bool {
        let max = self.max();
        self.min.x < width && max.x > 0.0 && self.min.y < height && max.y > 0.0
    }
}

/// Overlap test between two footprints
///
/// On each axis the entity further along must start strictly before the
/// other one ends, so rectangles that only touch do not intersect. Equal
/// coordinates always overlap on that axis. The test is symmetric.
pub fn intersects(a: &impl Bounded, b: &impl Bounded) -> bool {
    overlaps_on_axis(a.x(), a.width(), b.x(), b.width())
        && overlaps_on_axis(a.y(), a.height(), b.y(), b.height())
}

#[inline]
fn overlaps_on_axis(a_min: f32, a_len: f32, b_min: f32, b_len: f32) -> bool {
    if a_min < b_min {
        b_min < a_min + a_len
    } else if b_min < a_min {
        a_min < b_min + b_len
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy)]
    struct Rect {
        pos: Vec2,
        size: Size,
    }

    impl Rect {
        fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
            Self {
                pos: Vec2::new(x, y),
                size: Size::new(w, h, "rect").unwrap(),
            }
        }
    }

    impl Bounded for Rect {
        fn position(&self) -> Vec2 {
            self.pos
        }
        fn size(&self) -> Size {
            self.size
        }
    }

    #[test]
    fn test_size_rejects_non_positive() {
        assert!(Size::new(0.0, 1.0, "x").is_err());
        assert!(Size::new(1.0, -1.0, "x").is_err());
        assert!(Size::new(f32::NAN, 1.0, "x").is_err());
        assert!(Size::new(1.0, 1.0, "x").is_ok());
        assert!(Size::square(2.0, "x").unwrap().scaled(0.0, "shot").is_err());
    }

    #[test]
    fn test_rectangle_and_diamond_walk() {
        // Rectangle enemy 30x30 and diamond enemy 20x30, both at the origin
        let mut rect = Rect::new(0.0, 0.0, 30.0, 30.0);
        let mut diamond = Rect::new(0.0, 0.0, 20.0, 30.0);

        assert!(intersects(&rect, &rect));
        assert!(intersects(&rect, &diamond));
        assert!(intersects(&diamond, &rect));

        diamond.pos.x = 100.0;
        assert!(!intersects(&rect, &diamond));
        assert!(!intersects(&diamond, &rect));

        // Exactly touching corners
        diamond.pos = Vec2::new(30.0, 30.0);
        assert!(!intersects(&rect, &diamond));
        assert!(!intersects(&diamond, &rect));

        // Overlapping horizontally only
        rect.pos.x = 0.00001;
        assert!(!intersects(&rect, &diamond));
        assert!(!intersects(&diamond, &rect));

        rect.pos.y = 0.00001;
        assert!(intersects(&rect, &diamond));
        assert!(intersects(&diamond, &rect));

        rect.pos = Vec2::new(30.0 - 0.00002, 30.0 - 0.00003);
        assert!(intersects(&rect, &diamond));
        assert!(intersects(&diamond, &rect));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!intersects(&a, &b));
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &c));
    }

    #[test]
    fn test_horizontal_overlap_uses_width() {
        // Wide and flat: overlap only exists if width (not height) is used
        let a = Rect::new(0.0, 0.0, 50.0, 5.0);
        let b = Rect::new(20.0, 0.0, 5.0, 5.0);
        assert!(intersects(&a, &b));
    }

    #[test]
    fn test_viewport_overlap() {
        let inside = Bounds::new(Vec2::new(5.0, 5.0), Vec2::new(2.0, 2.0));
        assert!(inside.overlaps_viewport(100.0, 100.0));

        let below = Bounds::new(Vec2::new(5.0, -2.0), Vec2::new(2.0, 2.0));
        assert!(!below.overlaps_viewport(100.0, 100.0));

        let partly_below = Bounds::new(Vec2::new(5.0, -1.0), Vec2::new(2.0, 2.0));
        assert!(partly_below.overlaps_viewport(100.0, 100.0));

        let on_top_edge = Bounds::new(Vec2::new(5.0, 100.0), Vec2::new(2.0, 2.0));
        assert!(!on_top_edge.overlaps_viewport(100.0, 100.0));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            0.1f32..200.0,
            0.1f32..200.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn prop_rect_intersects_itself(a in rect_strategy()) {
            prop_assert!(intersects(&a, &a));
        }
    }
}
