// src/model/lattice.rs
use crate::error::ParseError;
use serde::{Deserialize, Serialize};

/// Conventional cell parameters: lengths in Angstrom, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CrystalSystem {
    #[default]
    Cubic,
    /// Cell parameters in the standard orientation (a along x, b in the xy plane)
    General(LatticeParams),
    /// Lattice vectors as rows [a, b, c] in the frame of the atom coordinates
    Cell([[f64; 3]; 3]),
}

impl LatticeParams {
    pub fn new(
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Result<Self, ParseError> {
        let params = Self { a, b, c, alpha, beta, gamma };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<(), ParseError> {
        if [self.a, self.b, self.c].iter().any(|&x| !(x > 0.0)) {
            return Err(ParseError::InvalidLattice("lengths must be positive".to_string()));
        }
        if [self.alpha, self.beta, self.gamma].iter().any(|&x| !(x > 0.0 && x < 180.0)) {
            let msg = "angles must lie in (0, 180) degrees";
            return Err(ParseError::InvalidLattice(msg.to_string()));
        }
        // Cell volume factor must be real and non-zero
        if self.volume_factor() <= 1e-12 {
            return Err(ParseError::InvalidLattice("angles do not form a cell".to_string()));
        }
        Ok(())
    }

    fn volume_factor(&self) -> f64 {
        let (ca, cb, cg) = (
            self.alpha.to_radians().cos(),
            self.beta.to_radians().cos(),
            self.gamma.to_radians().cos(),
        );
        1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg
    }

    /// Lattice vectors as rows [a_vec, b_vec, c_vec]; a along x, b in the xy plane.
    pub fn to_vectors(&self) -> [[f64; 3]; 3] {
        let (ca, cb) = (self.alpha.to_radians().cos(), self.beta.to_radians().cos());
        let (cg, sg) = (self.gamma.to_radians().cos(), self.gamma.to_radians().sin());

        let cx = self.c * cb;
        let cy = self.c * (ca - cb * cg) / sg;
        let cz = (self.c * self.c - cx * cx - cy * cy).max(0.0).sqrt();

        [
            [self.a, 0.0, 0.0],
            [self.b * cg, self.b * sg, 0.0],
            [cx, cy, cz],
        ]
    }

    /// Recovers cell parameters from lattice vectors (e.g. extended-XYZ `Lattice=`).
    pub fn from_vectors(lattice: [[f64; 3]; 3]) -> Result<Self, ParseError> {
        let len = |v: [f64; 3]| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        let angle = |u: [f64; 3], v: [f64; 3]| {
            let d = u[0] * v[0] + u[1] * v[1] + u[2] * v[2];
            (d / (len(u) * len(v))).clamp(-1.0, 1.0).acos().to_degrees()
        };
        let [va, vb, vc] = lattice;
        if len(va) < 1e-9 || len(vb) < 1e-9 || len(vc) < 1e-9 {
            return Err(ParseError::InvalidLattice("zero-length lattice vector".to_string()));
        }
        Self::new(len(va), len(vb), len(vc), angle(vb, vc), angle(va, vc), angle(va, vb))
    }

    pub fn is_cubic(&self) -> bool {
        let eq = |x: f64, y: f64| (x - y).abs() < 1e-6;
        eq(self.a, self.b)
            && eq(self.b, self.c)
            && eq(self.alpha, 90.0)
            && eq(self.beta, 90.0)
            && eq(self.gamma, 90.0)
    }
}

impl CrystalSystem {
    /// Cubic cells collapse to `Cubic` so the plain (h,k,l) normalization is used.
    pub fn from_params(params: LatticeParams) -> Self {
        if params.is_cubic() {
            CrystalSystem::Cubic
        } else {
            CrystalSystem::General(params)
        }
    }

    /// Keeps the cell exactly as given, orientation included. Even a cubic
    /// cell stays a `Cell` since it may be rotated against the Cartesian axes.
    pub fn from_lattice(vectors: [[f64; 3]; 3]) -> Result<Self, ParseError> {
        LatticeParams::from_vectors(vectors)?;
        Ok(CrystalSystem::Cell(vectors))
    }

    /// Lattice vectors in Cartesian space; `None` for the plain cubic frame.
    pub fn vectors(&self) -> Option<[[f64; 3]; 3]> {
        match self {
            CrystalSystem::Cubic => None,
            CrystalSystem::General(params) => Some(params.to_vectors()),
            CrystalSystem::Cell(vectors) => Some(*vectors),
        }
    }
}
