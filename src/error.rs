use thiserror::Error;

use crate::variable::Role;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid input for `{variable}`: {value} ({reason})")]
    InvalidInput {
        variable: String,
        value: f64,
        reason: &'static str,
    },

    #[error("no input was supplied for `{variable}`")]
    MissingInput { variable: String },

    /// Every rule fired with strength zero, so the aggregated output set is
    /// empty and has no centroid. Distinct from a legitimate score of zero.
    #[error("no rule fired for `{variable}`; the aggregated output set is empty")]
    UndefinedDefuzzification { variable: String },

    #[error("invalid membership function breakpoints {points:?}: {reason}")]
    InvalidShape {
        points: Vec<f64>,
        reason: &'static str,
    },

    #[error("invalid domain [{min}, {max}] for `{variable}`")]
    InvalidDomain { variable: String, min: f64, max: f64 },

    #[error("resolution of `{variable}` must be at least 2 sample points, got {resolution}")]
    InvalidResolution { variable: String, resolution: usize },

    #[error("rule {rule} references a variable that is not part of this system")]
    UnknownVariable { rule: usize },

    #[error("rule {rule} needs `{variable}` as {expected:?}, but it is declared {found:?}")]
    WrongRole {
        rule: usize,
        variable: String,
        expected: Role,
        found: Role,
    },

    #[error("rule {rule} references a term that `{variable}` does not define")]
    UnknownTerm { rule: usize, variable: String },

    #[error("rule {rule} must conclude with a single `variable is term` proposition")]
    InvalidConsequence { rule: usize },

    #[error("category thresholds must descend within [0, 100]: {0:?}")]
    InvalidThresholds([f64; 3]),
}

pub type Result<T> = std::result::Result<T, Error>;
