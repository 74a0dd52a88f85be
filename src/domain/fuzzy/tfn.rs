//! Triangular fuzzy number value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A triangular fuzzy number `(l, m, u)` with `l <= m <= u`.
///
/// Serializes as a 3-element array to match the solver wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 3]", try_from = "[f64; 3]")]
pub struct Tfn {
    l: f64,
    m: f64,
    u: f64,
}

impl Tfn {
    /// The "equal importance" judgment `(1, 1, 1)`.
    pub const IDENTITY: Self = Self { l: 1.0, m: 1.0, u: 1.0 };

    /// Creates a TFN, rejecting non-finite bounds and bound ordering violations.
    ///
    /// The error names the offending bound so manual entry can surface it.
    pub fn try_new(l: f64, m: f64, u: f64) -> Result<Self, ValidationError> {
        for (name, v) in [("lower", l), ("middle", m), ("upper", u)] {
            if !v.is_finite() {
                return Err(ValidationError::invalid_format(
                    name,
                    format!("bound must be a finite number, got {}", v),
                ));
            }
        }
        if l > m {
            return Err(ValidationError::invalid_format(
                "lower",
                format!("lower bound {} exceeds middle bound {}", l, m),
            ));
        }
        if m > u {
            return Err(ValidationError::invalid_format(
                "middle",
                format!("middle bound {} exceeds upper bound {}", m, u),
            ));
        }
        Ok(Self { l, m, u })
    }

    pub fn lower(&self) -> f64 {
        self.l
    }

    pub fn middle(&self) -> f64 {
        self.m
    }

    pub fn upper(&self) -> f64 {
        self.u
    }

    /// The implied reciprocal `(1/u, 1/m, 1/l)`.
    ///
    /// Only defined for strictly positive TFNs; the judgment scales used
    /// here never produce non-positive bounds.
    pub fn reciprocal(&self) -> Option<Self> {
        if self.l <= 0.0 {
            return None;
        }
        Some(Self {
            l: 1.0 / self.u,
            m: 1.0 / self.m,
            u: 1.0 / self.l,
        })
    }

    /// Returns the bounds as an array `[l, m, u]`.
    pub fn bounds(&self) -> [f64; 3] {
        [self.l, self.m, self.u]
    }
}

impl Default for Tfn {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Tfn> for [f64; 3] {
    fn from(t: Tfn) -> Self {
        t.bounds()
    }
}

impl TryFrom<[f64; 3]> for Tfn {
    type Error = ValidationError;

    fn try_from(v: [f64; 3]) -> Result<Self, Self::Error> {
        Tfn::try_new(v[0], v[1], v[2])
    }
}

impl fmt::Display for Tfn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.l, self.m, self.u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_accepts_ordered_bounds() {
        let t = Tfn::try_new(0.5, 1.0, 1.5).unwrap();
        assert_eq!(t.bounds(), [0.5, 1.0, 1.5]);
    }

    #[test]
    fn try_new_accepts_degenerate_identity() {
        assert_eq!(Tfn::try_new(1.0, 1.0, 1.0).unwrap(), Tfn::IDENTITY);
    }

    #[test]
    fn try_new_rejects_lower_above_middle() {
        let err = Tfn::try_new(2.0, 1.0, 3.0).unwrap_err();
        assert!(err.to_string().contains("lower"));
    }

    #[test]
    fn try_new_rejects_middle_above_upper() {
        let err = Tfn::try_new(1.0, 3.0, 2.0).unwrap_err();
        assert!(err.to_string().contains("middle"));
    }

    #[test]
    fn try_new_rejects_nan_bound() {
        assert!(Tfn::try_new(f64::NAN, 1.0, 2.0).is_err());
    }

    #[test]
    fn reciprocal_inverts_and_swaps_bounds() {
        let t = Tfn::try_new(2.0, 4.0, 8.0).unwrap();
        let r = t.reciprocal().unwrap();
        assert_eq!(r.bounds(), [0.125, 0.25, 0.5]);
    }

    #[test]
    fn identity_is_its_own_reciprocal() {
        assert_eq!(Tfn::IDENTITY.reciprocal(), Some(Tfn::IDENTITY));
    }
}
