use crate::error::XyzError;
use crate::model::{Atom, Model};
use std::fmt::Write as _;
use std::fs;

pub fn parse(path: &str) -> Result<Model, XyzError> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses an xyz payload: atom count, free-form comment line, then `element x y z` rows.
pub fn parse_str(content: &str) -> Result<Model, XyzError> {
    let mut lines = content.lines();

    // 1. Number of Atoms
    let n_atoms_str = lines.next().ok_or(XyzError::Empty)?;
    let n_atoms: usize = n_atoms_str
        .trim()
        .parse()
        .map_err(|_| XyzError::InvalidCount(n_atoms_str.trim().to_string()))?;

    // 2. Comment Line (energy, or extended XYZ keys such as Lattice="...")
    let comment = lines.next().unwrap_or_default().trim().to_string();
    let lattice = parse_lattice(&comment);

    // 3. Atoms
    let mut atoms = Vec::with_capacity(n_atoms);
    for (i, line) in lines.enumerate() {
        let line_no = i + 3;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        if parts.len() < 4 {
            return Err(XyzError::InvalidAtom {
                line: line_no,
                reason: format!("expected 'element x y z', got '{}'", line.trim()),
            });
        }

        let coord = |s: &str, axis: &str| {
            s.parse::<f64>().map_err(|_| XyzError::InvalidAtom {
                line: line_no,
                reason: format!("invalid {} coordinate '{}'", axis, s),
            })
        };
        let x = coord(parts[1], "x")?;
        let y = coord(parts[2], "y")?;
        let z = coord(parts[3], "z")?;

        atoms.push(Atom {
            index: atoms.len(),
            element: parts[0].to_string(),
            position: [x, y, z],
        });
    }

    if atoms.len() != n_atoms {
        return Err(XyzError::CountMismatch { expected: n_atoms, actual: atoms.len() });
    }

    Ok(Model { atoms, comment, lattice })
}

const LATTICE_KEY: &str = "Lattice=\"";

// Byte range of the quoted value of `Lattice="..."`
fn lattice_value(comment: &str) -> Option<(usize, usize)> {
    let start = comment.find(LATTICE_KEY)? + LATTICE_KEY.len();
    let len = comment[start..].find('"')?;
    Some((start, start + len))
}

/// Extended XYZ `Lattice="ax ay az bx by bz cx cy cz"`
fn parse_lattice(comment: &str) -> Option<[[f64; 3]; 3]> {
    let (start, end) = lattice_value(comment)?;
    let parts: Vec<f64> = comment[start..end]
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();

    if parts.len() != 9 {
        return None;
    }
    Some([
        [parts[0], parts[1], parts[2]],
        [parts[3], parts[4], parts[5]],
        [parts[6], parts[7], parts[8]],
    ])
}

/// Serializes the model: count, blank (or comment) line, one row per atom with 6 decimals.
pub fn to_string(model: &Model, include_comment: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", model.atoms.len());
    if include_comment {
        let _ = writeln!(out, "{}", comment_line(model));
    } else {
        out.push('\n');
    }

    for atom in &model.atoms {
        let _ = writeln!(
            out,
            "{}          {:.6}       {:.6}       {:.6}",
            atom.element, atom.position[0], atom.position[1], atom.position[2]
        );
    }
    out
}

/// The stored comment with its `Lattice=` value replaced by the model's current
/// vectors, which follow every rotation.
fn comment_line(model: &Model) -> String {
    let Some(lattice) = model.lattice else {
        return model.comment.clone();
    };
    let value = lattice
        .iter()
        .flatten()
        .map(|x| format!("{:.6}", x))
        .collect::<Vec<_>>()
        .join(" ");

    let comment = &model.comment;
    match lattice_value(comment) {
        Some((start, end)) => format!("{}{}{}", &comment[..start], value, &comment[end..]),
        None if comment.is_empty() => format!("{}{}\"", LATTICE_KEY, value),
        None => format!("{}{}\" {}", LATTICE_KEY, value, comment),
    }
}

pub fn write(path: &str, model: &Model, include_comment: bool) -> Result<(), XyzError> {
    fs::write(path, to_string(model, include_comment))?;
    Ok(())
}
