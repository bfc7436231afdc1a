//! Atom selection and rigid alignment of molecular structures to Cartesian
//! axes, lattice directions and Miller planes.

pub mod config;
pub mod error;
pub mod io;
pub mod menu;
pub mod model;
pub mod physics;
pub mod state;
pub mod utils;

pub use error::{AlignError, AlignResult, ParseError, XyzError};
pub use model::{Atom, CrystalSystem, LatticeParams, MillerPlane, Model, SelectionSet, TargetSpec};
pub use physics::operations::align::{solve_axis_alignment, solve_plane_alignment, AntiparallelPolicy, SolverSettings};
pub use physics::operations::rotation::RotationMatrix;
pub use physics::operations::transform::{apply_rotation, apply_translation, compute_rmsd};
pub use state::Session;
