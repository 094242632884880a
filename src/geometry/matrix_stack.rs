use crate::geometry::Transform;

/// A current transform plus saved copies of it. Every operation
/// post-multiplies the current transform.
#[derive(Clone, Debug, Default)]
pub struct MatrixStack {
    current: Transform,
    saved: Vec<Transform>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> Transform {
        self.current
    }

    pub fn push(&mut self) -> &mut Self {
        self.saved.push(self.current);
        self
    }

    /// Restores the last pushed transform. Popping an empty stack resets to
    /// the identity.
    pub fn pop(&mut self) -> &mut Self {
        self.current = self.saved.pop().unwrap_or_default();
        self
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn translate(&mut self, offset: [f32; 3]) -> &mut Self {
        self.current = self.current.translate(offset);
        self
    }

    pub fn scale(&mut self, coeffs: [f32; 3]) -> &mut Self {
        self.current = self.current.scale(coeffs);
        self
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.current = self.current.rotate_x(angle);
        self
    }

    pub fn apply(&mut self, transform: &Transform) -> &mut Self {
        self.current = self.current.compose(transform);
        self
    }
}
