use serde::{Deserialize, Serialize};

pub type Point3 = [f64; 3];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    // Stable identifier assigned at load time (line order of the atom block)
    pub index: usize,
    pub element: String,
    pub position: Point3,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Model {
    pub atoms: Vec<Atom>,
    // Second line of the xyz payload (energy, metadata, extended-XYZ keys)
    pub comment: String,
    // Lattice vectors [a_vec, b_vec, c_vec] when the payload declares one
    pub lattice: Option<[[f64; 3]; 3]>,
}

impl Model {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms, comment: String::new(), lattice: None }
    }

    /// Builds a model from (element, position) pairs, numbering atoms in order.
    pub fn from_positions<S: Into<String>>(atoms: impl IntoIterator<Item = (S, Point3)>) -> Self {
        let atoms = atoms
            .into_iter()
            .enumerate()
            .map(|(index, (element, position))| Atom { index, element: element.into(), position })
            .collect();
        Self::new(atoms)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn positions(&self) -> Vec<Point3> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    /// Alphabetical formula string with explicit counts, e.g. "H4 Si2"
    pub fn formula(&self) -> String {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for atom in &self.atoms {
            match counts.iter_mut().find(|(el, _)| *el == atom.element) {
                Some((_, n)) => *n += 1,
                None => counts.push((atom.element.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| a.0.cmp(&b.0));
        counts
            .iter()
            .map(|(el, n)| format!("{}{}", el, n))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
