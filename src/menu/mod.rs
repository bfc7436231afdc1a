// src/menu/mod.rs
//! Line-oriented commands standing in for the viewer's buttons and clicks.
//!
//! ```text
//! load mol.xyz          # replace the model, clear the selection
//! select 4              # toggle atom #4
//! clear                 # empty the selection
//! align z               # 2 atoms: bond onto an axis, [hkl] or (hkl) normal
//! plane (111)           # 3 atoms: atom plane onto a Miller plane
//! translate 0 0 0       # 1 atom: move the model so it sits at the point
//! lattice 3 3 5 90 90 120 | lattice cubic | lattice auto
//! report
//! export out.xyz
//! ```

pub mod actions;

use crate::error::ParseError;
use crate::model::{CrystalSystem, LatticeParams, MillerPlane, Point3, TargetSpec};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(String),
    Select(usize),
    Clear,
    Align(TargetSpec),
    Plane(MillerPlane),
    Translate(Point3),
    // None returns to the lattice of the loaded model
    Lattice(Option<CrystalSystem>),
    Report,
    Export(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    Usage { command: &'static str, expected: &'static str },

    #[error(transparent)]
    Notation(#[from] ParseError),
}

fn numbers(args: &[&str]) -> Option<Vec<f64>> {
    args.iter().map(|s| s.parse::<f64>().ok()).collect()
}

fn usage(command: &'static str, expected: &'static str) -> CommandError {
    CommandError::Usage { command, expected }
}

/// Cuts the line at the first `#` that starts a token, so `run#2.xyz` survives.
fn strip_comment(line: &str) -> &str {
    let mut prev = None;
    for (i, c) in line.char_indices() {
        if c == '#' && prev.map_or(true, char::is_whitespace) {
            return &line[..i];
        }
        prev = Some(c);
    }
    line
}

/// Parses one script line; blank lines and `#` comments give `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = strip_comment(line).trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    let cmd = match name.to_lowercase().as_str() {
        "load" if !rest.is_empty() => Command::Load(rest.to_string()),
        "load" => return Err(usage("load", "a file path")),

        "select" | "toggle" => match args.as_slice() {
            [idx] => Command::Select(idx.parse().map_err(|_| usage("select", "an atom index"))?),
            _ => return Err(usage("select", "an atom index")),
        },

        "clear" => Command::Clear,
        "align" if !rest.is_empty() => Command::Align(rest.parse()?),
        "align" => return Err(usage("align", "x, y, z, [hkl] or (hkl)")),
        "plane" if !rest.is_empty() => Command::Plane(rest.parse()?),
        "plane" => return Err(usage("plane", "Miller indices like (111)")),

        "translate" => match numbers(&args).as_deref() {
            Some(&[x, y, z]) => Command::Translate([x, y, z]),
            _ => return Err(usage("translate", "three coordinates")),
        },

        "lattice" => match args.as_slice() {
            ["cubic"] => Command::Lattice(Some(CrystalSystem::Cubic)),
            ["auto"] => Command::Lattice(None),
            _ => match numbers(&args).as_deref() {
                Some(&[a, b, c, alpha, beta, gamma]) => {
                    let params = LatticeParams::new(a, b, c, alpha, beta, gamma)?;
                    Command::Lattice(Some(CrystalSystem::from_params(params)))
                }
                _ => return Err(usage("lattice", "'cubic', 'auto' or a b c alpha beta gamma")),
            },
        },

        "report" => Command::Report,
        "export" if !rest.is_empty() => Command::Export(rest.to_string()),
        "export" => return Err(usage("export", "a file path")),

        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(cmd))
}
