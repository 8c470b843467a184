//! Screen-space position and hit regions.

/// Position of an entity in screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl Transform {
    /// Creates a transform at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Transform shifted by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Clickable area centred on an entity's transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Region {
    /// Disc of the given radius (ports, jacks).
    Circle {
        /// Radius in screen units.
        radius: f32,
    },
    /// Axis-aligned rectangle (device panels).
    Rect {
        /// Full width.
        width: f32,
        /// Full height.
        height: f32,
    },
}

impl Region {
    /// Returns `true` if `point` lies inside this region placed at `center`.
    /// Edges count as inside.
    pub fn contains(&self, center: Transform, point: Transform) -> bool {
        let dx = point.x - center.x;
        let dy = point.y - center.y;
        match *self {
            Self::Circle { radius } => dx * dx + dy * dy <= radius * radius,
            Self::Rect { width, height } => dx.abs() <= width * 0.5 && dy.abs() <= height * 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_contains() {
        let region = Region::Circle { radius: 5.0 };
        let center = Transform::new(10.0, 10.0);
        assert!(region.contains(center, Transform::new(13.0, 14.0)));
        assert!(!region.contains(center, Transform::new(14.0, 14.0)));
    }

    #[test]
    fn rect_contains() {
        let region = Region::Rect {
            width: 20.0,
            height: 10.0,
        };
        let center = Transform::new(0.0, 0.0);
        assert!(region.contains(center, Transform::new(10.0, -5.0)));
        assert!(!region.contains(center, Transform::new(10.5, 0.0)));
        assert!(!region.contains(center, Transform::new(0.0, 5.5)));
    }

    #[test]
    fn offset() {
        let t = Transform::new(1.0, 2.0).offset(-1.0, 3.0);
        assert_eq!(t, Transform::new(0.0, 5.0));
    }
}
