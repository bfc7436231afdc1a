// src/state.rs
//! One viewer session: the active model, its atom selection and the solver
//! settings. Every alignment action reads the selection in insertion order and
//! rewrites the model in place; a failed action leaves the model untouched.

use crate::config::Config;
use crate::error::{AlignError, AlignResult, XyzError};
use crate::io::xyz;
use crate::model::{
    CrystalSystem, MillerPlane, Model, Point3, SelectionChange, SelectionSet, TargetSpec,
    ToggleOutcome,
};
use crate::physics::operations::align::{self, SolverSettings};
use crate::physics::operations::rotation::RotationMatrix;
use crate::physics::operations::transform;

/// Summary of an applied rotation, for logging and the caller's status line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentReport {
    pub rotation: RotationMatrix,
    pub angle_deg: f64,
    pub rmsd: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    model: Option<Model>,
    selection: SelectionSet,
    // Explicit system from config or a `lattice` command; wins over the model lattice
    pinned_system: Option<CrystalSystem>,
    pub settings: SolverSettings,
    pub export_comment: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            pinned_system: config.crystal_system,
            settings: config.solver_settings(),
            export_comment: config.export_comment,
            ..Self::default()
        }
    }

    // --- Model ---

    /// Replaces the active model; the selection is cleared before anything can
    /// refer to the new atoms.
    pub fn load_model(&mut self, model: Model) -> SelectionChange {
        let change = self.selection.clear();

        if let Some(Err(e)) = model.lattice.map(CrystalSystem::from_lattice) {
            log::warn!("Ignoring lattice of loaded model: {}", e);
        }

        log::info!("Loaded model: {} atoms ({})", model.len(), model.formula());
        self.model = Some(model);
        change
    }

    pub fn load_xyz_str(&mut self, payload: &str) -> Result<SelectionChange, XyzError> {
        let model = xyz::parse_str(payload)?;
        Ok(self.load_model(model))
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn export_xyz(&self) -> AlignResult<String> {
        let model = self.model.as_ref().ok_or(AlignError::NoModel)?;
        Ok(xyz::to_string(model, self.export_comment))
    }

    // --- Crystal system ---

    /// Pinned system, else the model's own lattice vectors as they stand now
    /// (rotations carry them along), else cubic.
    pub fn crystal_system(&self) -> CrystalSystem {
        self.pinned_system.unwrap_or_else(|| self.model_system())
    }

    fn model_system(&self) -> CrystalSystem {
        self.model
            .as_ref()
            .and_then(|m| m.lattice)
            .and_then(|lat| CrystalSystem::from_lattice(lat).ok())
            .unwrap_or_default()
    }

    pub fn set_crystal_system(&mut self, system: Option<CrystalSystem>) {
        self.pinned_system = system;
    }

    // --- Selection ---

    pub fn toggle_atom(&mut self, index: usize) -> AlignResult<SelectionChange> {
        let model = self.model.as_ref().ok_or(AlignError::NoModel)?;
        if index >= model.len() {
            return Err(AlignError::AtomIndexOutOfBounds(index, model.len()));
        }

        let change = self.selection.toggle(index);
        match change.outcome {
            ToggleOutcome::Ignored => {
                log::warn!(
                    "Selection is full ({} atoms); click on atom #{} ignored",
                    change.size,
                    index
                )
            }
            _ => log::debug!(
                "Selection {:?} atom #{} -> {} selected",
                change.outcome,
                index,
                change.size
            ),
        }
        Ok(change)
    }

    pub fn clear_selection(&mut self) -> SelectionChange {
        self.selection.clear()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_size(&self) -> usize {
        self.selection.len()
    }

    fn selected_positions<const N: usize>(&self) -> AlignResult<[Point3; N]> {
        let model = self.model.as_ref().ok_or(AlignError::NoModel)?;
        let indices = self.selection.indices();
        if indices.len() != N {
            return Err(AlignError::WrongSelection { required: N, actual: indices.len() });
        }

        let mut out = [[0.0; 3]; N];
        for (slot, &idx) in out.iter_mut().zip(indices) {
            *slot = model
                .atom(idx)
                .ok_or(AlignError::AtomIndexOutOfBounds(idx, model.len()))?
                .position;
        }
        Ok(out)
    }

    // --- Alignment actions ---

    /// Rotates the model so the first -> second selected atom points along `target`.
    pub fn align_selection_to(&mut self, target: &TargetSpec) -> AlignResult<AlignmentReport> {
        let [p0, p1] = self.selected_positions::<2>()?;
        let system = self.crystal_system();
        let rotation = align::solve_axis_alignment(p0, p1, target, &system, &self.settings)?;
        let report = self.rotate(rotation)?;
        log::info!(
            "Aligned bond to {}: rotated {:.3}°, RMSD {:.4} Å",
            target,
            report.angle_deg,
            report.rmsd
        );
        Ok(report)
    }

    /// Rotates the model so the plane of the three selected atoms is parallel to `plane`.
    pub fn align_plane_to(&mut self, plane: &MillerPlane) -> AlignResult<AlignmentReport> {
        let [p0, p1, p2] = self.selected_positions::<3>()?;
        let system = self.crystal_system();
        let rotation = align::solve_plane_alignment(p0, p1, p2, plane, &system, &self.settings)?;
        let report = self.rotate(rotation)?;
        log::info!(
            "Aligned plane to {}: rotated {:.3}°, RMSD {:.4} Å",
            plane,
            report.angle_deg,
            report.rmsd
        );
        Ok(report)
    }

    /// Moves the whole model so the single selected atom sits at `target`.
    pub fn translate_selection_to(&mut self, target: Point3) -> AlignResult<()> {
        let required = 1;
        let indices = self.selection.indices();
        if indices.len() != required {
            return Err(AlignError::WrongSelection { required, actual: indices.len() });
        }
        let index = indices[0];
        let model = self.model.as_mut().ok_or(AlignError::NoModel)?;
        transform::apply_translation(model, index, target)?;
        log::info!(
            "Translated model: atom #{} now at ({:.6}, {:.6}, {:.6})",
            index,
            target[0],
            target[1],
            target[2]
        );
        Ok(())
    }

    fn rotate(&mut self, rotation: RotationMatrix) -> AlignResult<AlignmentReport> {
        let model = self.model.as_mut().ok_or(AlignError::NoModel)?;
        let before = model.positions();
        transform::apply_rotation(model, &rotation);
        let rmsd = transform::compute_rmsd(&before, &model.positions())?;

        Ok(AlignmentReport { rotation, angle_deg: rotation.angle().to_degrees(), rmsd })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Axis, SelectionState, VisualAid};

    fn two_atoms() -> Session {
        let mut s = Session::new();
        s.load_model(Model::from_positions([("Si", [0.0, 0.0, 0.0]), ("Si", [2.0, 0.0, 0.0])]));
        s
    }

    #[test]
    fn test_toggle_requires_model() {
        let mut s = Session::new();
        assert_eq!(s.toggle_atom(0), Err(AlignError::NoModel));
    }

    #[test]
    fn test_toggle_out_of_bounds() {
        let mut s = two_atoms();
        assert_eq!(s.toggle_atom(2), Err(AlignError::AtomIndexOutOfBounds(2, 2)));
        assert_eq!(s.selection_size(), 0);
    }

    #[test]
    fn test_reload_clears_selection() {
        let mut s = two_atoms();
        s.toggle_atom(0).unwrap();
        let change = s.toggle_atom(1).unwrap();
        assert_eq!(change.show, Some(VisualAid::Line));

        let change = s.load_model(Model::from_positions([("H", [0.0; 3])]));
        assert_eq!(change.retract, Some(VisualAid::Line));
        assert_eq!(s.selection_size(), 0);
        assert_eq!(s.selection().state(), SelectionState::Empty);
    }

    #[test]
    fn test_align_pair_to_z() {
        let mut s = two_atoms();
        s.toggle_atom(0).unwrap();
        s.toggle_atom(1).unwrap();
        let report = s.align_selection_to(&TargetSpec::CartesianAxis(Axis::Z)).unwrap();
        assert!((report.angle_deg - 90.0).abs() < 1e-9);
        assert!(report.rmsd > 0.0);

        let atoms = &s.model().unwrap().atoms;
        assert!(atoms[0].position.iter().all(|c| c.abs() < 1e-6));
        assert!(atoms[1].position[0].abs() < 1e-6);
        assert!(atoms[1].position[1].abs() < 1e-6);
        assert!((atoms[1].position[2] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_wrong_state_does_not_mutate() {
        let mut s = two_atoms();
        s.toggle_atom(0).unwrap();
        let before = s.model().unwrap().positions();

        let err = s.align_selection_to(&TargetSpec::CartesianAxis(Axis::Y));
        assert_eq!(err, Err(AlignError::WrongSelection { required: 2, actual: 1 }));
        let err = s.align_plane_to(&MillerPlane::new(1, 1, 1).unwrap());
        assert_eq!(err, Err(AlignError::WrongSelection { required: 3, actual: 1 }));
        assert_eq!(s.model().unwrap().positions(), before);
    }

    #[test]
    fn test_degenerate_plane_does_not_mutate() {
        let mut s = Session::new();
        s.load_model(Model::from_positions([
            ("C", [0.0, 0.0, 0.0]),
            ("C", [1.0, 0.0, 0.0]),
            ("C", [2.0, 0.0, 0.0]),
        ]));
        for i in 0..3 {
            s.toggle_atom(i).unwrap();
        }
        let before = s.model().unwrap().positions();
        let res = s.align_plane_to(&MillerPlane::new(0, 0, 1).unwrap());
        assert!(matches!(res, Err(AlignError::DegenerateGeometry(_))));
        assert_eq!(s.model().unwrap().positions(), before);
    }

    #[test]
    fn test_translate_single() {
        let mut s = two_atoms();
        s.toggle_atom(1).unwrap();
        s.translate_selection_to([0.0, 0.0, 0.0]).unwrap();
        let atoms = &s.model().unwrap().atoms;
        assert_eq!(atoms[1].position, [0.0, 0.0, 0.0]);
        assert_eq!(atoms[0].position, [-2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_model_lattice_sets_system() {
        let mut s = Session::new();
        s.load_xyz_str("1\nLattice=\"3.0 0.0 0.0 0.0 4.0 0.0 0.0 0.0 5.0\"\nSi 0 0 0\n").unwrap();
        assert!(matches!(s.crystal_system(), CrystalSystem::Cell(_)));

        s.set_crystal_system(Some(CrystalSystem::Cubic));
        assert_eq!(s.crystal_system(), CrystalSystem::Cubic);

        s.load_xyz_str("1\n\nSi 0 0 0\n").unwrap();
        assert_eq!(s.crystal_system(), CrystalSystem::Cubic);
    }

    #[test]
    fn test_export_requires_model() {
        assert_eq!(Session::new().export_xyz(), Err(AlignError::NoModel));
        let s = two_atoms();
        assert!(s.export_xyz().unwrap().starts_with("2\n\n"));
    }

    const ROTATED_CELL: &str = "\
3
Lattice=\"0 3 0 -4 0 0 0 0 5\"
Si 0.0 0.0 0.0
Si -4.0 0.0 0.0
Si 0.0 0.0 5.0
";

    #[test]
    fn test_plane_in_rotated_cell() {
        // the atoms span b and c, i.e. the (100) plane of a cell whose a axis is +y
        let mut s = Session::new();
        s.load_xyz_str(ROTATED_CELL).unwrap();
        for i in 0..3 {
            s.toggle_atom(i).unwrap();
        }
        let before = s.model().unwrap().positions();
        let report = s.align_plane_to(&MillerPlane::new(1, 0, 0).unwrap()).unwrap();
        assert!(report.rotation.is_identity(1e-9), "rotated {}°", report.angle_deg);
        for (a, b) in before.iter().flatten().zip(s.model().unwrap().positions().iter().flatten()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rotation_updates_lattice_and_export() {
        let mut s = Session::new();
        s.export_comment = true;
        s.load_xyz_str("2\nLattice=\"3 0 0 0 4 0 0 0 5\"\nSi 0 0 0\nSi 3 0 0\n").unwrap();
        s.toggle_atom(0).unwrap();
        s.toggle_atom(1).unwrap();
        s.align_selection_to(&TargetSpec::CartesianAxis(Axis::Z)).unwrap();

        // a now points along z with the bond
        let lat = s.model().unwrap().lattice.unwrap();
        assert!(lat[0][0].abs() < 1e-9 && (lat[0][2] - 3.0).abs() < 1e-9);
        match s.crystal_system() {
            CrystalSystem::Cell(v) => assert!((v[0][2] - 3.0).abs() < 1e-9),
            other => panic!("unexpected system {:?}", other),
        }

        // the rotated atom still sits at fractional (1, 0, 0)
        let moved = s.model().unwrap().atoms[1].position;
        let frac = crate::utils::linalg::cart_to_frac(moved, lat).unwrap();
        for (got, want) in frac.iter().zip([1.0, 0.0, 0.0]) {
            assert!((got - want).abs() < 1e-9);
        }

        let text = s.export_xyz().unwrap();
        let reloaded = xyz::parse_str(&text).unwrap();
        let got = reloaded.lattice.unwrap();
        for (a, b) in got.iter().flatten().zip(lat.iter().flatten()) {
            assert!((a - b).abs() < 1e-6);
        }
        assert!(!text.contains("Lattice=\"3 0 0"));
    }
}
