// src/physics/operations/align.rs
//! Rigid rotations that bring a selected bond direction or atom plane onto a
//! Cartesian axis, a lattice direction [uvw] or a Miller plane normal.

use crate::error::{AlignError, AlignResult, ParseError};
use crate::model::{CrystalSystem, MillerPlane, Point3, TargetSpec};
use crate::physics::miller_math::{direction_vector, plane_normal};
use crate::physics::operations::rotation::RotationMatrix;
use crate::utils::linalg::any_perpendicular;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const DEFAULT_EPSILON: f64 = 1e-10;

/// What the direction (two-atom) alignment does when the bond points exactly
/// away from the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AntiparallelPolicy {
    /// Half turn about a perpendicular axis, same as plane alignment
    #[default]
    Flip,
    /// Treat as already aligned and leave the model untouched
    Identity,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    pub epsilon: f64,
    pub antiparallel: AntiparallelPolicy,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self { epsilon: DEFAULT_EPSILON, antiparallel: AntiparallelPolicy::Flip }
    }
}

/// Unit vector for the alignment target in Cartesian space.
pub fn resolve_target(
    target: &TargetSpec,
    system: &CrystalSystem,
) -> Result<Vector3<f64>, ParseError> {
    match target {
        TargetSpec::CartesianAxis(axis) => Ok(Vector3::from(axis.unit())),
        TargetSpec::CrystalDirection(dir) => direction_vector(dir, system),
        TargetSpec::MillerPlane(plane) => plane_normal(plane, system),
    }
}

/// Rotation taking the direction p0 -> p1 onto `target`.
pub fn solve_axis_alignment(
    p0: Point3,
    p1: Point3,
    target: &TargetSpec,
    system: &CrystalSystem,
    settings: &SolverSettings,
) -> AlignResult<RotationMatrix> {
    let d = Vector3::from(p1) - Vector3::from(p0);
    if d.norm() < settings.epsilon {
        return Err(AlignError::DegenerateGeometry("the two selected atoms coincide"));
    }
    let direction = d.normalize();
    let target_vec = resolve_target(target, system)?;

    rotation_between(&direction, &target_vec, settings.epsilon, settings.antiparallel)
}

/// Rotation taking the normal of the plane (p0, p1, p2) onto the Miller plane normal.
pub fn solve_plane_alignment(
    p0: Point3,
    p1: Point3,
    p2: Point3,
    plane: &MillerPlane,
    system: &CrystalSystem,
    settings: &SolverSettings,
) -> AlignResult<RotationMatrix> {
    let n = current_plane_normal(p0, p1, p2, settings.epsilon)?;
    let target = plane_normal(plane, system)?;

    // Plane alignment always flips antiparallel normals
    rotation_between(&n, &target, settings.epsilon, AntiparallelPolicy::Flip)
}

/// Unit normal of the plane through three points, (p1 - p0) x (p2 - p0).
pub fn current_plane_normal(
    p0: Point3,
    p1: Point3,
    p2: Point3,
    epsilon: f64,
) -> AlignResult<Vector3<f64>> {
    let a = Vector3::from(p0);
    let n = (Vector3::from(p1) - a).cross(&(Vector3::from(p2) - a));
    if n.norm() < epsilon {
        return Err(AlignError::DegenerateGeometry(
            "the three selected atoms are collinear or repeated",
        ));
    }
    Ok(n.normalize())
}

fn rotation_between(
    from: &Vector3<f64>,
    to: &Vector3<f64>,
    epsilon: f64,
    antiparallel: AntiparallelPolicy,
) -> AlignResult<RotationMatrix> {
    let axis = from.cross(to);
    let cos = from.dot(to).clamp(-1.0, 1.0);

    if axis.norm() < epsilon {
        if cos > 0.0 {
            return Ok(RotationMatrix::identity());
        }
        return match antiparallel {
            AntiparallelPolicy::Flip => {
                let perp = any_perpendicular(from);
                RotationMatrix::from_axis_angle(&perp, PI).verify()
            }
            AntiparallelPolicy::Identity => {
                log::warn!("Selection is antiparallel to the target; orientation unchanged");
                Ok(RotationMatrix::identity())
            }
        };
    }

    // Same angle as acos(cos), without the precision loss near 0 and pi
    let angle = axis.norm().atan2(cos);
    RotationMatrix::from_axis_angle(&axis.normalize(), angle).verify()
}
