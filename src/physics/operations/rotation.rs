// src/physics/operations/rotation.rs
use crate::error::{AlignError, AlignResult};
use crate::model::Point3;
use crate::utils::linalg::orthogonality_error;
use nalgebra::{Matrix3, Matrix4, Vector3};

pub const ORTHO_TOLERANCE: f64 = 1e-9;
pub const DET_TOLERANCE: f64 = 1e-6;

/// Proper rotation (RᵀR = I, det R = +1) acting on column vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix(Matrix3<f64>);

impl RotationMatrix {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Rodrigues' formula for a unit `axis`:
    /// ```text
    /// R = I cosθ + [k]x sinθ + (k ⊗ k)(1 - cosθ)
    /// ```
    pub fn from_axis_angle(axis: &Vector3<f64>, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let k = axis;

        let cross = k.cross_matrix();
        let outer = k * k.transpose();

        Self(Matrix3::identity() * c + cross * s + outer * (1.0 - c))
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.0
    }

    /// 4x4 homogeneous form with zero translation
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        self.0.to_homogeneous()
    }

    pub fn apply(&self, p: Point3) -> Point3 {
        let v = self.0 * Vector3::from(p);
        [v.x, v.y, v.z]
    }

    pub fn apply_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.0 * v
    }

    /// Rotation angle in radians, recovered from the trace
    pub fn angle(&self) -> f64 {
        ((self.0.trace() - 1.0) / 2.0).clamp(-1.0, 1.0).acos()
    }

    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    pub fn orthogonality_error(&self) -> f64 {
        orthogonality_error(&self.0)
    }

    pub fn is_identity(&self, tol: f64) -> bool {
        (self.0 - Matrix3::identity()).amax() < tol
    }

    /// Fails when the matrix is not a proper rotation within tolerance.
    pub fn verify(self) -> AlignResult<Self> {
        let ortho_error = self.orthogonality_error();
        let det = self.determinant();
        if !(ortho_error < ORTHO_TOLERANCE) || !((det - 1.0).abs() < DET_TOLERANCE) {
            log::error!(
                "Rotation construction produced an improper matrix (|RtR - I| = {:e}, det = {})",
                ortho_error,
                det
            );
            return Err(AlignError::RotationInvariant { ortho_error, det });
        }
        Ok(self)
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_quarter_turn_about_z() {
        let r = RotationMatrix::from_axis_angle(&Vector3::z(), FRAC_PI_2);
        let p = r.apply([1.0, 0.0, 0.0]);
        assert!((p[0]).abs() < 1e-12);
        assert!((p[1] - 1.0).abs() < 1e-12);
        assert!((r.angle() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_right_handed_about_each_axis() {
        // x -> y -> z -> x under a quarter turn about the third axis
        let cases = [
            (Vector3::x(), [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
            (Vector3::y(), [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
            (Vector3::z(), [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];
        for (axis, from, to) in cases {
            let p = RotationMatrix::from_axis_angle(&axis, FRAC_PI_2).apply(from);
            for (got, want) in p.iter().zip(to) {
                assert!((got - want).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_proper_rotation() {
        let axis = Vector3::new(1.0, -2.0, 0.5).normalize();
        for angle in [0.1, 1.0, 2.5, PI] {
            let r = RotationMatrix::from_axis_angle(&axis, angle).verify().unwrap();
            assert!(r.orthogonality_error() < 1e-9);
            assert!((r.determinant() - 1.0).abs() < 1e-6);
            // axis is fixed
            assert!((r.apply_vector(&axis) - axis).norm() < 1e-12);
        }
    }

    #[test]
    fn test_verify_rejects_reflection() {
        let mirror = RotationMatrix(Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0));
        assert!(matches!(mirror.verify(), Err(AlignError::RotationInvariant { .. })));

        let scaled = RotationMatrix(Matrix3::identity() * 1.1);
        assert!(scaled.verify().is_err());
    }

    #[test]
    fn test_homogeneous_has_no_translation() {
        let r = RotationMatrix::from_axis_angle(&Vector3::x(), 0.7);
        let h = r.to_homogeneous();
        assert_eq!(h[(0, 3)], 0.0);
        assert_eq!(h[(1, 3)], 0.0);
        assert_eq!(h[(2, 3)], 0.0);
        assert_eq!(h[(3, 3)], 1.0);
    }
}
