pub use matrix_stack::MatrixStack;
pub use quaternion::{Quaternion, SLERP_DOT_THRESHOLD};
pub use transform::{frustum_scale, mat4_mul, perspective, Transform};

mod matrix_stack;
mod quaternion;
mod transform;
