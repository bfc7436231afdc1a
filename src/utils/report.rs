// src/utils/report.rs

use crate::model::{Model, SelectionSet, SelectionState};
use crate::utils::geometry;
use crate::utils::linalg::cart_to_frac;

/// Text shown when a model is loaded
pub fn structure_summary(model: &Model, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("File: {}\n", name));
    out.push_str(&format!("Formula: {}\n", model.formula()));
    if !model.comment.is_empty() {
        out.push_str(&format!("Comment: {}\n", model.comment));
    }
    out.push_str("--------------------------------------------------\n");
    out.push_str(&format!(
        "{:<8} {:<8} {:<10} {:<10} {:<10}\n",
        "Index", "Element", "X", "Y", "Z"
    ));
    out.push_str("--------------------------------------------------\n");

    for atom in model.atoms.iter().take(20) {
        out.push_str(&format!(
            "{:<8} {:<8} {:<10.4} {:<10.4} {:<10.4}\n",
            atom.index, atom.element, atom.position[0], atom.position[1], atom.position[2]
        ));
    }

    if model.atoms.len() > 20 {
        out.push_str(&format!("... and {} more atoms.\n", model.atoms.len() - 20));
    }

    out
}

/// Text shown after every selection change: selected atoms, their geometry and
/// the alignment actions now available.
pub fn selection_report(model: &Model, selection: &SelectionSet) -> String {
    let sel: Vec<usize> = selection
        .indices()
        .iter()
        .copied()
        .filter(|&i| i < model.atoms.len())
        .collect();

    if sel.is_empty() {
        return "Select atoms to align.".to_string();
    }

    let mut out = String::new();
    out.push_str("Selection:\n");

    for (i, &idx) in sel.iter().enumerate() {
        let atom = &model.atoms[idx];
        if i > 0 {
            out.push_str(" - ");
        }
        out.push_str(&format!("Atom (#{}, {})", idx, atom.element));
    }
    out.push_str("\n\n");

    let pos = |k: usize| model.atoms[sel[k]].position;

    match SelectionState::from_len(sel.len()) {
        SelectionState::Single => {
            let p = pos(0);
            out.push_str(&format!("Position: ({:.4}, {:.4}, {:.4})", p[0], p[1], p[2]));
            if let Some(f) = model.lattice.and_then(|lat| cart_to_frac(p, lat)) {
                out.push_str(&format!("\nFractional: ({:.4}, {:.4}, {:.4})", f[0], f[1], f[2]));
            }
            out.push_str("\nAvailable: translate");
        }
        SelectionState::Pair => {
            let d = geometry::calculate_distance(pos(0), pos(1));
            out.push_str(&format!("Distance: {:.5} Å\n", d));
            for (label, unit) in [("x", [1.0, 0.0, 0.0]), ("y", [0.0, 1.0, 0.0]), ("z", [0.0, 0.0, 1.0])] {
                let a = geometry::angle_to_direction(pos(0), pos(1), unit);
                out.push_str(&format!("Angle to {}: {:.2}°\n", label, a));
            }
            out.push_str("Available: align to axis / [hkl] / (hkl) normal");
        }
        SelectionState::Triple => {
            let angle = geometry::calculate_angle(pos(0), pos(1), pos(2));
            let d1 = geometry::calculate_distance(pos(0), pos(1));
            let d2 = geometry::calculate_distance(pos(1), pos(2));

            out.push_str(&format!("Angle (A-B-C): {:.2}°\n", angle));
            out.push_str(&format!("Dist (A-B):    {:.4} Å\n", d1));
            out.push_str(&format!("Dist (B-C):    {:.4} Å\n", d2));
            out.push_str("Available: align plane to (hkl)");
        }
        SelectionState::Empty => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model::from_positions([
            ("O", [0.0, 0.0, 0.0]),
            ("H", [1.0, 0.0, 0.0]),
            ("H", [0.0, 1.0, 0.0]),
        ])
    }

    #[test]
    fn test_summary_lists_atoms() {
        let text = structure_summary(&model(), "water.xyz");
        assert!(text.contains("Formula: H2 O1"));
        assert!(text.contains("water.xyz"));
        assert!(!text.contains("more atoms"));
    }

    #[test]
    fn test_pair_report() {
        let m = model();
        let mut sel = SelectionSet::new();
        sel.toggle(0);
        sel.toggle(1);
        let text = selection_report(&m, &sel);
        assert!(text.contains("Distance: 1.00000"));
        assert!(text.contains("Angle to x: 0.00°"));
    }

    #[test]
    fn test_triple_report() {
        let m = model();
        let mut sel = SelectionSet::new();
        sel.toggle(1);
        sel.toggle(0);
        sel.toggle(2);
        let text = selection_report(&m, &sel);
        assert!(text.contains("Angle (A-B-C): 90.00°"));
        assert!(text.contains("plane"));
    }

    #[test]
    fn test_single_fractional() {
        let mut m = model();
        m.lattice = Some([[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]]);
        let mut sel = SelectionSet::new();
        sel.toggle(1);
        let text = selection_report(&m, &sel);
        assert!(text.contains("Fractional: (0.5000, 0.0000, 0.0000)"));
    }
}
