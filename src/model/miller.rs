// src/model/miller.rs
use crate::error::ParseError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// One signed single-digit index
static SIGNED_DIGIT: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"-?\d"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> [f64; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }
}

/// Plane (h k l), each index a signed single digit when parsed from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MillerPlane {
    pub h: i32,
    pub k: i32,
    pub l: i32,
}

impl MillerPlane {
    pub fn new(h: i32, k: i32, l: i32) -> Result<Self, ParseError> {
        if h == 0 && k == 0 && l == 0 {
            return Err(ParseError::ZeroIndices);
        }
        Ok(Self { h, k, l })
    }

    pub fn indices(&self) -> [i32; 3] {
        [self.h, self.k, self.l]
    }
}

impl FromStr for MillerPlane {
    type Err = ParseError;

    /// Accepts "(2-11)", "(111)" or "2 -1 1".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = SIGNED_DIGIT.as_ref().map_err(|e| ParseError::Pattern(e.to_string()))?;
        let parts: Vec<i32> = re
            .find_iter(s)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();

        if parts.len() != 3 {
            return Err(ParseError::ComponentCount { input: s.to_string(), found: parts.len() });
        }
        Self::new(parts[0], parts[1], parts[2])
    }
}

impl fmt::Display for MillerPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{}{})", self.h, self.k, self.l)
    }
}

/// Direction [h k l]. The bracket grammar carries a single sign flag: one `-`
/// anywhere negates the component holding the first digit `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrystalDirection {
    pub h: i32,
    pub k: i32,
    pub l: i32,
    pub signed: bool,
}

impl CrystalDirection {
    pub fn indices(&self) -> [i32; 3] {
        [self.h, self.k, self.l]
    }
}

impl FromStr for CrystalDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim().trim_start_matches('[').trim_end_matches(']');
        let minus_count = body.matches('-').count();
        let digits: Vec<u32> = body
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .map(|c| c.to_digit(10))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ParseError::ComponentCount { input: s.to_string(), found: 0 })?;

        if digits.len() != 3 {
            return Err(ParseError::ComponentCount { input: s.to_string(), found: digits.len() });
        }
        if minus_count > 1 {
            return Err(ParseError::UnsupportedSign(s.to_string()));
        }

        let mut idx = [digits[0] as i32, digits[1] as i32, digits[2] as i32];
        if idx == [0, 0, 0] {
            return Err(ParseError::ZeroIndices);
        }

        let signed = minus_count == 1;
        if signed {
            let flagged = digits
                .iter()
                .position(|&d| d == 1)
                .ok_or_else(|| ParseError::UnsupportedSign(s.to_string()))?;
            idx[flagged] = -idx[flagged];
        }

        Ok(Self { h: idx[0], k: idx[1], l: idx[2], signed })
    }
}

impl fmt::Display for CrystalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}{}{}]", self.h, self.k, self.l)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetSpec {
    CartesianAxis(Axis),
    CrystalDirection(CrystalDirection),
    MillerPlane(MillerPlane),
}

impl FromStr for TargetSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t {
            "x" | "X" => Ok(TargetSpec::CartesianAxis(Axis::X)),
            "y" | "Y" => Ok(TargetSpec::CartesianAxis(Axis::Y)),
            "z" | "Z" => Ok(TargetSpec::CartesianAxis(Axis::Z)),
            _ if t.starts_with('[') => t.parse().map(TargetSpec::CrystalDirection),
            _ if t.starts_with('(') => t.parse().map(TargetSpec::MillerPlane),
            _ => Err(ParseError::UnknownTarget(t.to_string())),
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSpec::CartesianAxis(axis) => write!(f, "{:?} axis", axis),
            TargetSpec::CrystalDirection(d) => write!(f, "direction {}", d),
            TargetSpec::MillerPlane(p) => write!(f, "plane {} normal", p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plane() {
        assert_eq!("(111)".parse::<MillerPlane>().unwrap().indices(), [1, 1, 1]);
        assert_eq!("(2-11)".parse::<MillerPlane>().unwrap().indices(), [2, -1, 1]);
        assert_eq!("1 0 -1".parse::<MillerPlane>().unwrap().indices(), [1, 0, -1]);
    }

    #[test]
    fn test_plane_pattern_compiles_once() {
        assert!(SIGNED_DIGIT.is_ok());
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| "(2-11)".parse::<MillerPlane>()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().unwrap().indices(), [2, -1, 1]);
        }
    }

    #[test]
    fn test_parse_plane_wrong_count() {
        assert_eq!(
            "(11)".parse::<MillerPlane>(),
            Err(ParseError::ComponentCount { input: "(11)".to_string(), found: 2 })
        );
        assert!("(1111)".parse::<MillerPlane>().is_err());
        assert_eq!("(000)".parse::<MillerPlane>(), Err(ParseError::ZeroIndices));
    }

    #[test]
    fn test_parse_direction() {
        let d: CrystalDirection = "[100]".parse().unwrap();
        assert_eq!(d.indices(), [1, 0, 0]);
        assert!(!d.signed);

        let d: CrystalDirection = "[0-10]".parse().unwrap();
        assert_eq!(d.indices(), [0, -1, 0]);
        assert!(d.signed);

        let d: CrystalDirection = "[-001]".parse().unwrap();
        assert_eq!(d.indices(), [0, 0, -1]);

        let d: CrystalDirection = "[110]".parse().unwrap();
        assert_eq!(d.indices(), [1, 1, 0]);
    }

    #[test]
    fn test_direction_sign_limitation() {
        // The sign always lands on the first `1`, wherever the minus was written
        let d: CrystalDirection = "[1-10]".parse().unwrap();
        assert_eq!(d.indices(), [-1, 1, 0]);

        assert!(matches!("[-1-10]".parse::<CrystalDirection>(), Err(ParseError::UnsupportedSign(_))));
        assert!(matches!("[-220]".parse::<CrystalDirection>(), Err(ParseError::UnsupportedSign(_))));
        assert!(matches!("[10]".parse::<CrystalDirection>(), Err(ParseError::ComponentCount { .. })));
        assert_eq!("[000]".parse::<CrystalDirection>(), Err(ParseError::ZeroIndices));
    }

    #[test]
    fn test_parse_target() {
        assert_eq!("z".parse::<TargetSpec>().unwrap(), TargetSpec::CartesianAxis(Axis::Z));
        assert!(matches!("[010]".parse::<TargetSpec>().unwrap(), TargetSpec::CrystalDirection(_)));
        assert!(matches!("(001)".parse::<TargetSpec>().unwrap(), TargetSpec::MillerPlane(_)));
        assert!(matches!("w".parse::<TargetSpec>(), Err(ParseError::UnknownTarget(_))));
    }
}
