// src/physics/operations/transform.rs
use crate::error::{AlignError, AlignResult};
use crate::model::{Model, Point3};
use crate::physics::operations::rotation::RotationMatrix;

/// Rotates every atom about the origin: position <- R * position.
/// Lattice vectors turn with the atoms so fractional coordinates are preserved.
pub fn apply_rotation(model: &mut Model, rotation: &RotationMatrix) {
    for atom in model.atoms.iter_mut() {
        atom.position = rotation.apply(atom.position);
    }
    if let Some(lattice) = model.lattice.as_mut() {
        for v in lattice.iter_mut() {
            *v = rotation.apply(*v);
        }
    }
}

/// Rigidly shifts the whole model so that atom `from_index` lands on `target`.
pub fn apply_translation(model: &mut Model, from_index: usize, target: Point3) -> AlignResult<()> {
    let anchor = model
        .atom(from_index)
        .ok_or(AlignError::AtomIndexOutOfBounds(from_index, model.len()))?
        .position;

    let delta = [target[0] - anchor[0], target[1] - anchor[1], target[2] - anchor[2]];
    translate_by(model, delta);
    Ok(())
}

pub fn translate_by(model: &mut Model, delta: Point3) {
    for atom in model.atoms.iter_mut() {
        atom.position[0] += delta[0];
        atom.position[1] += delta[1];
        atom.position[2] += delta[2];
    }
}

/// Root-mean-square deviation between two equally sized point sets.
pub fn compute_rmsd(before: &[Point3], after: &[Point3]) -> AlignResult<f64> {
    if before.len() != after.len() {
        return Err(AlignError::LengthMismatch(before.len(), after.len()));
    }
    if before.is_empty() {
        return Ok(0.0);
    }

    let sum_sq: f64 = before
        .iter()
        .zip(after)
        .map(|(a, b)| {
            let dx = b[0] - a[0];
            let dy = b[1] - a[1];
            let dz = b[2] - a[2];
            dx * dx + dy * dy + dz * dz
        })
        .sum();

    Ok((sum_sq / before.len() as f64).sqrt())
}
