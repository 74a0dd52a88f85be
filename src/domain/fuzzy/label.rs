//! Linguistic fuzzy scale: the fixed 9-label alphabet and its TFN table.
//!
//! Each label states how much the row criterion is preferred over the
//! column criterion; "more importance" and "less importance" labels are
//! reciprocal judgments of each other.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Tfn;
use crate::domain::foundation::ValidationError;

/// Linguistic judgment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FuzzyLabel {
    /// Equal importance.
    #[default]
    EI,
    /// Weak more importance.
    WMI,
    /// Fair more importance.
    FMI,
    /// Strong more importance.
    VMI,
    /// Absolute more importance.
    AMI,
    /// Weak less importance.
    WLI,
    /// Fair less importance.
    FLI,
    /// Strong less importance.
    VLI,
    /// Absolute less importance.
    ALI,
}

/// The full ordered alphabet, "more important" side first.
pub const SCALE: [FuzzyLabel; 9] = [
    FuzzyLabel::EI,
    FuzzyLabel::WMI,
    FuzzyLabel::FMI,
    FuzzyLabel::VMI,
    FuzzyLabel::AMI,
    FuzzyLabel::WLI,
    FuzzyLabel::FLI,
    FuzzyLabel::VLI,
    FuzzyLabel::ALI,
];

/// Canonical label -> TFN conversion table.
static TFN_TABLE: Lazy<Vec<(FuzzyLabel, Tfn)>> = Lazy::new(|| {
    let tfn = |l: f64, m: f64, u: f64| Tfn::try_new(l, m, u).expect("scale table is ordered");
    vec![
        (FuzzyLabel::EI, Tfn::IDENTITY),
        (FuzzyLabel::WMI, tfn(2.0 / 3.0, 1.0, 3.0 / 2.0)),
        (FuzzyLabel::FMI, tfn(3.0 / 2.0, 2.0, 5.0 / 2.0)),
        (FuzzyLabel::VMI, tfn(5.0 / 2.0, 3.0, 7.0 / 2.0)),
        (FuzzyLabel::AMI, tfn(7.0 / 2.0, 4.0, 9.0 / 2.0)),
        (FuzzyLabel::WLI, tfn(2.0 / 3.0, 1.0, 3.0 / 2.0)),
        (FuzzyLabel::FLI, tfn(2.0 / 5.0, 1.0 / 2.0, 2.0 / 3.0)),
        (FuzzyLabel::VLI, tfn(2.0 / 7.0, 1.0 / 3.0, 2.0 / 5.0)),
        (FuzzyLabel::ALI, tfn(2.0 / 9.0, 1.0 / 4.0, 2.0 / 7.0)),
    ]
});

impl FuzzyLabel {
    /// Converts the label to its canonical TFN.
    pub fn to_tfn(self) -> Tfn {
        TFN_TABLE
            .iter()
            .find(|(label, _)| *label == self)
            .map(|(_, tfn)| *tfn)
            .unwrap_or(Tfn::IDENTITY)
    }

    /// The reciprocal label under the more/less pairing; `EI` maps to itself.
    pub fn reciprocal(self) -> Self {
        match self {
            FuzzyLabel::EI => FuzzyLabel::EI,
            FuzzyLabel::WMI => FuzzyLabel::WLI,
            FuzzyLabel::FMI => FuzzyLabel::FLI,
            FuzzyLabel::VMI => FuzzyLabel::VLI,
            FuzzyLabel::AMI => FuzzyLabel::ALI,
            FuzzyLabel::WLI => FuzzyLabel::WMI,
            FuzzyLabel::FLI => FuzzyLabel::FMI,
            FuzzyLabel::VLI => FuzzyLabel::VMI,
            FuzzyLabel::ALI => FuzzyLabel::AMI,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FuzzyLabel::EI => "EI",
            FuzzyLabel::WMI => "WMI",
            FuzzyLabel::FMI => "FMI",
            FuzzyLabel::VMI => "VMI",
            FuzzyLabel::AMI => "AMI",
            FuzzyLabel::WLI => "WLI",
            FuzzyLabel::FLI => "FLI",
            FuzzyLabel::VLI => "VLI",
            FuzzyLabel::ALI => "ALI",
        }
    }
}

impl FromStr for FuzzyLabel {
    type Err = ValidationError;

    /// Parses a label token. Unknown tokens are a reported validation error
    /// rather than a silent "equal importance" default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SCALE
            .into_iter()
            .find(|label| label.as_str() == s.trim())
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "label",
                    format!("unknown fuzzy label '{}'", s.trim()),
                )
            })
    }
}

impl fmt::Display for FuzzyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element-wise conversion of a label matrix into TFN values.
///
/// Pure: the input is untouched.
pub fn convert_matrix_to_values(labels: &[Vec<FuzzyLabel>]) -> Vec<Vec<Tfn>> {
    labels
        .iter()
        .map(|row| row.iter().map(|label| label.to_tfn()).collect())
        .collect()
}
