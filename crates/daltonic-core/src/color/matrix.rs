//! Immutable 3x3 color matrices.

use glam::{DMat3, DVec3};

/// A 3x3 color matrix stored row-major, as published in the literature.
///
/// Applying the matrix to a color computes `M · v` with `v` as a column
/// vector, so each output component is the dot product of one row with the
/// input triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

impl ColorMatrix {
    /// Returns the identity matrix (no-op transform).
    pub const fn identity() -> Self {
        Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Row-major coefficients.
    pub const fn rows(&self) -> &[[f64; 3]; 3] {
        &self.0
    }

    /// Apply this matrix to a color triple.
    pub fn apply(&self, v: DVec3) -> DVec3 {
        let [r0, r1, r2] = self.0;
        DVec3::new(
            DVec3::from_array(r0).dot(v),
            DVec3::from_array(r1).dot(v),
            DVec3::from_array(r2).dot(v),
        )
    }

    /// The numerical inverse of this matrix.
    ///
    /// A singular matrix yields non-finite coefficients; every matrix this
    /// crate inverts is a fixed, well-conditioned constant.
    pub fn inverse(&self) -> Self {
        Self::from_mat3(self.to_mat3().inverse())
    }

    /// Determinant, used to sanity-check matrices before inversion.
    pub fn determinant(&self) -> f64 {
        self.to_mat3().determinant()
    }

    /// Convert to a column-major glam matrix.
    pub fn to_mat3(&self) -> DMat3 {
        DMat3::from_cols_array_2d(&self.0).transpose()
    }

    /// Convert from a column-major glam matrix.
    pub fn from_mat3(m: DMat3) -> Self {
        Self(m.transpose().to_cols_array_2d())
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_identity_apply_is_noop() {
        let v = DVec3::new(0.25, 0.5, 0.75);
        assert_eq!(ColorMatrix::identity().apply(v), v);
    }

    #[test]
    fn test_apply_uses_rows() {
        let m = ColorMatrix([[1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]]);
        let out = m.apply(DVec3::new(1.0, 1.0, 1.0));
        assert_eq!(out, DVec3::new(6.0, 1.0, 2.0));
    }

    #[test]
    fn test_mat3_conversion_keeps_layout() {
        let m = ColorMatrix([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]);
        assert_eq!(ColorMatrix::from_mat3(m.to_mat3()), m);
        let v = DVec3::new(0.1, 0.2, 0.3);
        assert!((m.to_mat3() * v - m.apply(v)).length() < EPSILON);
    }

    #[test]
    fn test_inverse_composes_to_identity() {
        let m = ColorMatrix([[2.0, 0.0, 1.0], [1.0, 3.0, 0.0], [0.0, 1.0, 4.0]]);
        let inv = m.inverse();
        let v = DVec3::new(0.3, -0.7, 1.1);
        assert!((inv.apply(m.apply(v)) - v).length() < EPSILON);
    }
}
