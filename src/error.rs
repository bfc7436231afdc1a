// src/error.rs
//! Error types for notation parsing, structure files and alignment.

use std::io;
use thiserror::Error;

/// Errors raised while parsing Miller planes, directions and axis names
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Expected exactly 3 Miller indices in '{input}', found {found}")]
    ComponentCount { input: String, found: usize },

    #[error("Indices cannot all be zero")]
    ZeroIndices,

    #[error(
        "Unsupported direction '{0}': only one sign is allowed and it applies to the \
         axis holding the digit 1 (mixed signs like [1-10] cannot be expressed)"
    )]
    UnsupportedSign(String),

    #[error("Unknown alignment target '{0}' (use x, y, z, [hkl] or (hkl))")]
    UnknownTarget(String),

    #[error("Notation pattern: {0}")]
    Pattern(String),

    #[error("Invalid lattice: {0}")]
    InvalidLattice(String),
}

/// Errors raised while reading or writing xyz payloads
#[derive(Error, Debug)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported structure format: {0} (expected .xyz)")]
    UnsupportedFormat(String),

    #[error("Empty XYZ payload")]
    Empty,

    #[error("Invalid atom count '{0}'")]
    InvalidCount(String),

    #[error("Line {line}: {reason}")]
    InvalidAtom { line: usize, reason: String },

    #[error("Atom count mismatch: header says {expected}, found {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

/// Errors raised by the session, solver and transform operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("No model loaded")]
    NoModel,

    #[error("Atom index {0} is out of bounds (atoms: {1})")]
    AtomIndexOutOfBounds(usize, usize),

    #[error("Operation needs {required} selected atoms, {actual} selected")]
    WrongSelection { required: usize, actual: usize },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    #[error("Rotation invariant violated (orthogonality error {ortho_error:e}, det {det})")]
    RotationInvariant { ortho_error: f64, det: f64 },

    #[error("Point set length mismatch: {0} vs {1}")]
    LengthMismatch(usize, usize),
}

/// Result type for alignment operations
pub type AlignResult<T> = Result<T, AlignError>;
