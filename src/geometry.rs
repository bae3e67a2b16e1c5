//! Vector and heading math shared by every entity.
//!
//! Angles are degrees measured clockwise from +x in screen space (y grows
//! downward), matching how headings are stored on the entities.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `degrees`.
    pub fn from_heading(degrees: f32) -> Self {
        let rad = degrees.to_radians();
        Self::new(rad.cos(), rad.sin())
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len > 0.0 {
            Some(Self::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Heading of this vector in degrees, in `(-180, 180]`.
    pub fn heading(self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

// ── Headings ──────────────────────────────────────────────────────────────────

/// Bearing from `from` to `to` in degrees.
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    (to - from).heading()
}

/// Wraps an angular difference into `[-180, 180)`.
pub fn wrap_degrees(diff: f32) -> f32 {
    (diff + 180.0).rem_euclid(360.0) - 180.0
}

/// Turns `current` toward `target`, by at most `max_rate` degrees.
pub fn turn_toward(current: f32, target: f32, max_rate: f32) -> f32 {
    let diff = wrap_degrees(target - current);
    current + diff.clamp(-max_rate, max_rate)
}

// ── World bounds ──────────────────────────────────────────────────────────────

/// Toroidal wrap: leaving one edge re-enters at the opposite edge.
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    let mut out = pos;
    if out.x > width {
        out.x = 0.0;
    } else if out.x < 0.0 {
        out.x = width;
    }
    if out.y > height {
        out.y = 0.0;
    } else if out.y < 0.0 {
        out.y = height;
    }
    out
}

/// True while `pos` lies strictly inside the world rectangle grown by `margin`.
pub fn inside(pos: Vec2, width: f32, height: f32, margin: f32) -> bool {
    -margin < pos.x && pos.x < width + margin && -margin < pos.y && pos.y < height + margin
}
