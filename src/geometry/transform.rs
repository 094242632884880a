use crate::geometry::Quaternion;

/// Affine transform stored column-major: `rotation_scale[i]` is the image of
/// basis vector `i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub rotation_scale: [[f32; 3]; 3],
    pub translation: [f32; 3],
}

impl Transform {
    pub fn new() -> Self {
        Transform {
            rotation_scale: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0; 3],
        }
    }

    /// Rotation matrix of a unit quaternion.
    pub fn from_rotation(r: Quaternion) -> Self {
        let ww = r.w * r.w;
        let xx = r.x * r.x;
        let yy = r.y * r.y;
        let zz = r.z * r.z;
        let wx = r.w * r.x;
        let wy = r.w * r.y;
        let wz = r.w * r.z;
        let xy = r.x * r.y;
        let xz = r.x * r.z;
        let yz = r.y * r.z;
        Self {
            translation: [0.0; 3],
            rotation_scale: [
                [ww + xx - yy - zz, 2.0 * (wz + xy), 2.0 * (xz - wy)],
                [2.0 * (xy - wz), ww - xx + yy - zz, 2.0 * (wx + yz)],
                [2.0 * (wy + xz), 2.0 * (yz - wx), ww - xx - yy + zz],
            ],
        }
    }

    pub fn translate(&self, offset: [f32; 3]) -> Self {
        Transform {
            translation: [
                self.translation[0]
                    + offset[0] * self.rotation_scale[0][0]
                    + offset[1] * self.rotation_scale[1][0]
                    + offset[2] * self.rotation_scale[2][0],
                self.translation[1]
                    + offset[0] * self.rotation_scale[0][1]
                    + offset[1] * self.rotation_scale[1][1]
                    + offset[2] * self.rotation_scale[2][1],
                self.translation[2]
                    + offset[0] * self.rotation_scale[0][2]
                    + offset[1] * self.rotation_scale[1][2]
                    + offset[2] * self.rotation_scale[2][2],
            ],
            rotation_scale: self.rotation_scale,
        }
    }

    /// Scales along the local axes.
    pub fn scale(&self, coeffs: [f32; 3]) -> Self {
        let column = |i: usize| {
            [
                coeffs[i] * self.rotation_scale[i][0],
                coeffs[i] * self.rotation_scale[i][1],
                coeffs[i] * self.rotation_scale[i][2],
            ]
        };
        Transform {
            rotation_scale: [column(0), column(1), column(2)],
            translation: self.translation,
        }
    }

    /// Rotates around the local X axis, `angle` in radians.
    pub fn rotate_x(&self, angle: f32) -> Self {
        let s = angle.sin();
        let c = angle.cos();
        Transform {
            rotation_scale: [
                self.rotation_scale[0],
                [
                    self.rotation_scale[1][0] * c + self.rotation_scale[2][0] * s,
                    self.rotation_scale[1][1] * c + self.rotation_scale[2][1] * s,
                    self.rotation_scale[1][2] * c + self.rotation_scale[2][2] * s,
                ],
                [
                    self.rotation_scale[2][0] * c - self.rotation_scale[1][0] * s,
                    self.rotation_scale[2][1] * c - self.rotation_scale[1][1] * s,
                    self.rotation_scale[2][2] * c - self.rotation_scale[1][2] * s,
                ],
            ],
            translation: self.translation,
        }
    }

    pub fn to_homogeneous(&self) -> [[f32; 4]; 4] {
        [
            [
                self.rotation_scale[0][0],
                self.rotation_scale[0][1],
                self.rotation_scale[0][2],
                0.0,
            ],
            [
                self.rotation_scale[1][0],
                self.rotation_scale[1][1],
                self.rotation_scale[1][2],
                0.0,
            ],
            [
                self.rotation_scale[2][0],
                self.rotation_scale[2][1],
                self.rotation_scale[2][2],
                0.0,
            ],
            [
                self.translation[0],
                self.translation[1],
                self.translation[2],
                1.0,
            ],
        ]
    }

    /// `self * other`: `other` is applied first.
    pub fn compose(&self, other: &Self) -> Self {
        let mut rotation_scale = [[0.0; 3]; 3];
        for (column, result) in rotation_scale.iter_mut().enumerate() {
            for (row, value) in result.iter_mut().enumerate() {
                *value = (0..3)
                    .map(|k| self.rotation_scale[k][row] * other.rotation_scale[column][k])
                    .sum();
            }
        }
        Transform {
            rotation_scale,
            translation: self.translate(other.translation).translation,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::new()
    }
}

pub fn frustum_scale(fov_degrees: f32) -> f32 {
    1.0 / (fov_degrees.to_radians() / 2.0).tan()
}

/// Column-major camera-to-clip matrix, camera looking down -Z.
pub fn perspective(frustum_scale: f32, aspect: f32, z_near: f32, z_far: f32) -> [[f32; 4]; 4] {
    let mut m = [[0.0; 4]; 4];
    m[0][0] = frustum_scale / aspect;
    m[1][1] = frustum_scale;
    m[2][2] = (z_far + z_near) / (z_near - z_far);
    m[2][3] = -1.0;
    m[3][2] = (2.0 * z_far * z_near) / (z_near - z_far);
    m
}

/// Product of two column-major matrices, `b` applied first.
pub fn mat4_mul(a: [[f32; 4]; 4], b: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];
    for (column, out) in result.iter_mut().enumerate() {
        for (row, value) in out.iter_mut().enumerate() {
            *value = (0..4).map(|k| a[k][row] * b[column][k]).sum();
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

    fn apply(t: &Transform, p: [f32; 3]) -> [f32; 3] {
        t.translate(p).translation
    }

    fn assert_vec_eq(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert_relative_eq!(a[i], b[i], epsilon = 1e-5);
        }
    }

    #[test]
    fn identity_quaternion_gives_identity_matrix() {
        assert_eq!(Transform::from_rotation(Quaternion::IDENTITY), Transform::new());
    }

    #[test]
    fn quarter_turn_around_x() {
        let q = Quaternion::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0);
        let t = Transform::from_rotation(q);
        assert_vec_eq(apply(&t, [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_vec_eq(apply(&t, [1.0, 0.0, 0.0]), [1.0, 0.0, 0.0]);
        let rotated = Transform::new().rotate_x(FRAC_PI_2);
        assert_vec_eq(apply(&rotated, [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn operations_are_applied_in_local_space() {
        let t = Transform::new()
            .translate([0.0, 0.0, -200.0])
            .scale([3.0, 3.0, 3.0])
            .rotate_x(FRAC_PI_2);
        assert_vec_eq(apply(&t, [0.0, 1.0, 0.0]), [0.0, 0.0, -197.0]);
    }

    #[test]
    fn compose_applies_right_operand_first() {
        let a = Transform::new().translate([1.0, 2.0, 3.0]);
        let b = Transform::new().scale([2.0, 2.0, 2.0]);
        let ab = a.compose(&b);
        assert_vec_eq(apply(&ab, [1.0, 1.0, 1.0]), [3.0, 4.0, 5.0]);
        assert_eq!(
            mat4_mul(a.to_homogeneous(), b.to_homogeneous()),
            ab.to_homogeneous()
        );
    }

    #[test]
    fn perspective_matches_frustum() {
        let scale = frustum_scale(90.0);
        assert_relative_eq!(scale, 1.0, epsilon = 1e-6);
        let m = perspective(scale, 2.0, 1.0, 600.0);
        assert_relative_eq!(m[0][0], 0.5, epsilon = 1e-6);
        assert_relative_eq!(m[2][2], -601.0 / 599.0);
        assert_relative_eq!(m[3][2], -1200.0 / 599.0);
        assert_eq!(m[2][3], -1.0);
        assert_eq!(m[3][3], 0.0);
    }
}
