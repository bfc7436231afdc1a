use crate::error::ParseError;
use crate::model::{CrystalDirection, CrystalSystem, MillerPlane};
use crate::utils::linalg::frac_to_cart;
use nalgebra::Vector3;

const MIN_NORM: f64 = 1e-9;

/// Unit normal of the Miller plane (h k l).
///
/// Cubic: the normal is simply (h, k, l) normalized.
/// General: the reciprocal-lattice direction
/// ```text
/// n = h (b x c) + k (c x a) + l (a x b)
/// ```
/// which is parallel to h a* + k b* + l c* (the 1/V factor drops out on normalization).
/// Both forms come out in the frame of the system's lattice vectors.
pub fn plane_normal(
    plane: &MillerPlane,
    system: &CrystalSystem,
) -> Result<Vector3<f64>, ParseError> {
    let (h, k, l) = (plane.h as f64, plane.k as f64, plane.l as f64);

    let n = match system.vectors() {
        None => Vector3::new(h, k, l),
        Some(lat) => {
            let v_a = Vector3::from(lat[0]);
            let v_b = Vector3::from(lat[1]);
            let v_c = Vector3::from(lat[2]);

            let b_x_c = v_b.cross(&v_c);
            let c_x_a = v_c.cross(&v_a);
            let a_x_b = v_a.cross(&v_b);

            b_x_c * h + c_x_a * k + a_x_b * l
        }
    };

    normalized(n)
}

/// Unit Cartesian vector of the lattice direction [u v w] = u a + v b + w c.
pub fn direction_vector(
    dir: &CrystalDirection,
    system: &CrystalSystem,
) -> Result<Vector3<f64>, ParseError> {
    let uvw = [dir.h as f64, dir.k as f64, dir.l as f64];

    let v = match system.vectors() {
        None => Vector3::from(uvw),
        Some(lat) => Vector3::from(frac_to_cart(uvw, lat)),
    };

    normalized(v)
}

fn normalized(v: Vector3<f64>) -> Result<Vector3<f64>, ParseError> {
    let mag = v.norm();
    if mag < MIN_NORM {
        return Err(ParseError::ZeroIndices);
    }
    Ok(v / mag)
}
