// src/utils/linalg.rs

use nalgebra::{Matrix3, Vector3};

fn lattice_matrix(lattice: [[f64; 3]; 3]) -> Matrix3<f64> {
  Matrix3::from_row_slice(&[
    lattice[0][0],
    lattice[0][1],
    lattice[0][2],
    lattice[1][0],
    lattice[1][1],
    lattice[1][2],
    lattice[2][0],
    lattice[2][1],
    lattice[2][2],
  ])
}

/// Convert fractional coordinates (or lattice direction indices) to Cartesian
///
/// # Arguments
/// * `frac` - Fractional coordinates [x, y, z]
/// * `lattice` - Lattice vectors as row matrix [[ax, ay, az], [bx, by, bz], [cx, cy, cz]]
///
/// # Formula
/// ```text
/// Cartesian = Lattice^T × Fractional
/// ```
pub fn frac_to_cart(frac: [f64; 3], lattice: [[f64; 3]; 3]) -> [f64; 3] {
  let cart_vec = lattice_matrix(lattice).transpose() * Vector3::from(frac);
  [cart_vec.x, cart_vec.y, cart_vec.z]
}

/// Convert Cartesian coordinates to fractional; None if the lattice is singular
///
/// # Formula
/// ```text
/// Fractional = (Lattice^T)^-1 × Cartesian
/// ```
pub fn cart_to_frac(cart: [f64; 3], lattice: [[f64; 3]; 3]) -> Option<[f64; 3]> {
  let inv_lat = lattice_matrix(lattice).transpose().try_inverse()?;
  let frac_vec = inv_lat * Vector3::from(cart);
  Some([frac_vec.x, frac_vec.y, frac_vec.z])
}

/// Largest absolute entry of `RᵀR - I`
pub fn orthogonality_error(m: &Matrix3<f64>) -> f64 {
  (m.transpose() * m - Matrix3::identity()).amax()
}

/// Unit vector perpendicular to `v`, built from the coordinate axis least aligned with it
pub fn any_perpendicular(v: &Vector3<f64>) -> Vector3<f64> {
  let abs = v.abs();
  let axis = if abs.x <= abs.y && abs.x <= abs.z {
    Vector3::x()
  } else if abs.y <= abs.z {
    Vector3::y()
  } else {
    Vector3::z()
  };
  v.cross(&axis).normalize()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cubic_lattice() {
    let lattice = [[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]];

    let cart = frac_to_cart([0.5, 0.5, 0.5], lattice);

    assert!((cart[0] - 2.5).abs() < 1e-10);
    assert!((cart[1] - 2.5).abs() < 1e-10);
    assert!((cart[2] - 2.5).abs() < 1e-10);
  }

  #[test]
  fn test_roundtrip() {
    // Non-orthogonal lattice
    let lattice = [[4.0, 0.0, 0.0], [2.0, 3.46, 0.0], [0.0, 0.0, 5.0]];

    let frac_orig = [0.333, 0.667, 0.25];
    let cart = frac_to_cart(frac_orig, lattice);
    let frac_back = cart_to_frac(cart, lattice).unwrap();

    assert!((frac_back[0] - frac_orig[0]).abs() < 1e-10);
    assert!((frac_back[1] - frac_orig[1]).abs() < 1e-10);
    assert!((frac_back[2] - frac_orig[2]).abs() < 1e-10);
  }

  #[test]
  fn test_singular_lattice() {
    let lattice = [[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
    assert!(cart_to_frac([1.0, 1.0, 1.0], lattice).is_none());
  }

  #[test]
  fn test_any_perpendicular() {
    for v in [Vector3::x(), Vector3::new(0.3, -0.8, 0.1).normalize(), Vector3::new(0.0, 0.0, -1.0)] {
      let p = any_perpendicular(&v);
      assert!(p.dot(&v).abs() < 1e-12);
      assert!((p.norm() - 1.0).abs() < 1e-12);
    }
  }
}
