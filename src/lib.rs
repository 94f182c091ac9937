//! Mamdani fuzzy inference, and a house price fairness appraisal built on it.
//!
//! ```
//! use fuzzy_appraisal::{CategoryThresholds, EngineConfig, FairnessEngine, Listing};
//!
//! let engine = FairnessEngine::new(&EngineConfig::default())?;
//! let listing = Listing {
//!     land_area: 150.,
//!     building_area: 110.,
//!     bedrooms: 2,
//!     bathrooms: 1,
//!     garage: 1,
//!     asking_price: 810_000_000.,
//! };
//! let assessment = engine.assess(listing.input_vector(), &CategoryThresholds::default())?;
//!
//! assert!(assessment.score >= 75.);
//! # Ok::<(), fuzzy_appraisal::Error>(())
//! ```

mod appraisal;
mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod system;
mod terms;
mod variable;

pub use appraisal::{
    Area, Assessment, Category, Facility, Fairness, FairnessEngine, InputVector, Listing, Price, Term,
};
pub use config::{CategoryThresholds, EngineConfig};
pub use dsl::Expr;
pub use error::{Error, Result};
pub use inference::Inference;
pub use inputs::Inputs;
pub use membership::MembershipFunction;
pub use ops::{AggregationOp, AndOp, DefuzzificationOp, ImplicationOp, OrOp};
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use system::System;
pub use terms::{Key, Term as Label, Terms};
pub use variable::{Fuzzification, LinguisticVariable, Role, Variable, VariableKey, Variables};
