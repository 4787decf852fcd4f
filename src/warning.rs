use std::fmt;

use serde_derive::Serialize;

/// Recoverable conditions: the detection goes on with a corrected criterion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    /// Several criterion values were supplied, only the first one is used
    MultipleCriterionValues,
    /// The criterion is missing, so no observation is flagged
    CriterionIsMissing,
    /// The criterion was negative and has been replaced by its absolute value
    NegativeCriterionCorrected,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MultipleCriterionValues => {
                f.write_str("crit has more than one element, only the first is used")
            }
            Warning::CriterionIsMissing => f.write_str("crit is NA, no values are flagged"),
            Warning::NegativeCriterionCorrected => {
                f.write_str("crit is negative, its absolute value is used")
            }
        }
    }
}

/// Collects the warnings raised during one detection and forwards them to `tracing`
#[derive(Debug, Default)]
pub(crate) struct Warnings(Vec<Warning>);

impl Warnings {
    pub(crate) fn push(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning, "{}", warning);
        self.0.push(warning);
    }

    pub(crate) fn into_vec(self) -> Vec<Warning> {
        self.0
    }
}
