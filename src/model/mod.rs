//src/model/mod.rs
pub mod structure;
pub mod lattice;
pub mod miller;
pub mod selection;

// Re-exports for cleaner imports
pub use lattice::{CrystalSystem, LatticeParams};
pub use miller::{Axis, CrystalDirection, MillerPlane, TargetSpec};
pub use selection::{SelectionChange, SelectionSet, SelectionState, ToggleOutcome, VisualAid};
pub use structure::{Atom, Model, Point3};
