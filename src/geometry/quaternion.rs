use std::ops::{Add, Div, Mul, Neg, Sub};

/// Above this dot product two orientations are treated as parallel and
/// slerp falls back to lerp.
pub const SLERP_DOT_THRESHOLD: f32 = 0.9995;

// below this norm the orthogonal component of slerp is meaningless
const ORTHOGONAL_EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    pub fn to_wxyz(self) -> [f32; 4] {
        [self.w, self.x, self.y, self.z]
    }

    pub fn dot(self, other: Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn magnitude(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Self {
        self / self.magnitude()
    }

    /// Componentwise blend of the two 4-vectors, renormalized.
    ///
    /// Halfway between opposite quaternions the blend vanishes; the result
    /// there is the same orthogonal quaternion that [`Quaternion::slerp`]
    /// passes through.
    pub fn lerp(self, other: Self, alpha: f32) -> Self {
        let blend = self * (1.0 - alpha) + other * alpha;
        if blend.magnitude() < ORTHOGONAL_EPSILON {
            return self.orthogonal();
        }
        blend.normalize()
    }

    /// Constant angular velocity interpolation on the unit hypersphere.
    ///
    /// Orientations closer than `dot_threshold` go through [`Quaternion::lerp`]
    /// instead, since the closed form divides by a vanishing sine there. No
    /// sign flip is applied, so the arc taken is the one from `self` to
    /// `other` as given, which is not always the shortest rotation.
    pub fn slerp(self, other: Self, alpha: f32, dot_threshold: f32) -> Self {
        let dot = self.dot(other);
        if dot > dot_threshold {
            return self.lerp(other, alpha);
        }
        let dot = dot.clamp(-1.0, 1.0);
        let theta = dot.acos() * alpha;

        let rejection = other - self * dot;
        let orthogonal = if rejection.magnitude() < ORTHOGONAL_EPSILON {
            // antipodal inputs, every great circle through self reaches other
            self.orthogonal()
        } else {
            rejection.normalize()
        };

        (self * theta.cos() + orthogonal * theta.sin()).normalize()
    }

    // a unit quaternion perpendicular to self in 4D
    fn orthogonal(self) -> Self {
        Self {
            w: -self.x,
            x: self.w,
            y: -self.z,
            z: self.y,
        }
        .normalize()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            w: self.w + other.w,
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            w: self.w - other.w,
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;

    fn mul(self, other: f32) -> Self {
        Self {
            w: self.w * other,
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

impl Div<f32> for Quaternion {
    type Output = Self;

    fn div(self, other: f32) -> Self {
        Self {
            w: self.w / other,
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}
