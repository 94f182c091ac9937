//! House price fairness appraisal built on the generic engine.
//!
//! Three antecedents (effective area, facility capacity, asking price) feed
//! nine rules concluding on a 0 to 100 fairness index.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CategoryThresholds, EngineConfig};
use crate::error::{Error, Result};
use crate::inference::Inference;
use crate::inputs::Inputs;
use crate::membership::MembershipFunction;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::system::System;
use crate::terms::{Key, Terms};
use crate::variable::{Variable, Variables};

/// Land plus building area, in square meters.
#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Area {
    Small,
    Medium,
    Large,
}

/// Bedrooms, bathrooms and garage slots combined.
#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Facility {
    Low,
    Adequate,
    High,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Price {
    Cheap,
    Normal,
    Expensive,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Fairness {
    VeryUnfair,
    Unfair,
    FairlyFair,
    Fair,
    VeryFair,
}

/// Every label of every appraisal variable.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Term {
    Area(Area),
    Facility(Facility),
    Price(Price),
    Fairness(Fairness),
}

macro_rules! into_term {
    ($($label:ident),* $(,)?) => {
        $(
            impl From<$label> for Term {
                fn from(label: $label) -> Self {
                    Self::$label(label)
                }
            }
        )*
    };
}

into_term!(Area, Facility, Price, Fairness);

/// The three crisp scalars the engine consumes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputVector {
    pub effective_area: f64,
    pub facility_capacity: f64,
    pub price: f64,
}

/// A property as a listing form describes it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub land_area: f64,
    pub building_area: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub garage: u32,
    pub asking_price: f64,
}

impl Listing {
    pub fn effective_area(&self) -> f64 {
        self.land_area + self.building_area
    }

    pub fn facility_capacity(&self) -> f64 {
        let count = self
            .bedrooms
            .saturating_add(self.bathrooms)
            .saturating_add(self.garage);

        f64::from(count)
    }

    pub fn input_vector(&self) -> InputVector {
        InputVector {
            effective_area: self.effective_area(),
            facility_capacity: self.facility_capacity(),
            price: self.asking_price,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    VeryFair,
    Fair,
    FairlyFair,
    Unfair,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryFair => "Very Fair / Best Deal",
            Self::Fair => "Fair / Good Deal",
            Self::FairlyFair => "Fairly Fair / Market Price",
            Self::Unfair => "Unfair / Overpriced",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl CategoryThresholds {
    pub fn categorize(&self, score: f64) -> Category {
        if score >= self.very_fair {
            Category::VeryFair
        } else if score >= self.fair {
            Category::Fair
        } else if score >= self.fairly_fair {
            Category::FairlyFair
        } else {
            Category::Unfair
        }
    }
}

/// A fairness score together with the verdict a threshold policy gives it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub score: f64,
    pub category: Category,
}

/// The appraisal variables and rules, built once and then only read.
///
/// Construct one at startup and hand out references; it is `Send + Sync`
/// and evaluations never mutate it.
pub struct FairnessEngine {
    system: System<Term>,
    inference: Inference,
    area: Variable<Area>,
    facility: Variable<Facility>,
    price: Variable<Price>,
    fairness: Variable<Fairness>,
}

impl FairnessEngine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let mut area_terms = Terms::new();
        area_terms
            .insert(Area::Small, MembershipFunction::trapezoidal(0., 0., 100., 250.)?)
            .insert(Area::Medium, MembershipFunction::triangular(150., 400., 750.)?)
            .insert(Area::Large, MembershipFunction::trapezoidal(600., 900., 2000., 2000.)?);

        let mut facility_terms = Terms::new();
        facility_terms
            .insert(Facility::Low, MembershipFunction::trapezoidal(0., 0., 3., 5.)?)
            .insert(Facility::Adequate, MembershipFunction::triangular(4., 8., 14.)?)
            .insert(Facility::High, MembershipFunction::trapezoidal(10., 15., 25., 25.)?);

        let mut price_terms = Terms::new();
        price_terms
            .insert(Price::Cheap, MembershipFunction::trapezoidal(0., 0., 9e8, 1.1e9)?)
            .insert(Price::Normal, MembershipFunction::triangular(1e9, 2e9, 4.2e9)?)
            .insert(Price::Expensive, MembershipFunction::trapezoidal(4e9, 7e9, 2e10, 2e10)?);

        let mut fairness_terms = Terms::new();
        fairness_terms
            .insert(Fairness::VeryUnfair, MembershipFunction::triangular(0., 0., 35.)?)
            .insert(Fairness::Unfair, MembershipFunction::triangular(25., 45., 65.)?)
            .insert(Fairness::FairlyFair, MembershipFunction::triangular(55., 70., 85.)?)
            .insert(Fairness::Fair, MembershipFunction::triangular(75., 85., 95.)?)
            .insert(Fairness::VeryFair, MembershipFunction::triangular(85., 100., 100.)?);

        let mut vars = Variables::<Term>::new();
        let area = vars.add_antecedent("effective area", 0. ..=2000., area_terms, config.area_resolution)?;
        let facility = vars.add_antecedent(
            "facility capacity",
            0. ..=25.,
            facility_terms,
            config.facility_resolution,
        )?;
        let price = vars.add_antecedent("price", 0. ..=2e10, price_terms, config.price_resolution)?;
        let fairness = vars.add_consequent(
            "fairness index",
            0. ..=100.,
            fairness_terms,
            config.fairness_resolution,
        )?;

        let mut rules = Rules::<Term>::with_capacity(9);

        rules
            .add(price.is(Price::Expensive).and(area.is(Area::Small)), fairness.is(Fairness::VeryUnfair))
            .add(price.is(Price::Expensive).and(facility.is(Facility::Low)), fairness.is(Fairness::VeryUnfair))
            .add(
                price.is(Price::Normal).and2(area.is(Area::Medium), facility.is(Facility::Adequate)),
                fairness.is(Fairness::FairlyFair),
            )
            .add(price.is(Price::Cheap).and(area.is(Area::Large)), fairness.is(Fairness::VeryFair))
            .add(
                price.is(Price::Normal).and2(area.is(Area::Large), facility.is(Facility::High)),
                fairness.is(Fairness::VeryFair),
            )
            .add(price.is(Price::Cheap).and(facility.is(Facility::High)), fairness.is(Fairness::VeryFair))
            .add(
                price.is(Price::Normal).and2(area.is(Area::Medium), facility.is(Facility::High)),
                fairness.is(Fairness::Fair),
            )
            .add(
                price.is(Price::Normal).and2(area.is(Area::Large), facility.is(Facility::Adequate)),
                fairness.is(Fairness::Fair),
            )
            .add(
                price.is(Price::Cheap).and2(area.is(Area::Medium), facility.is(Facility::Adequate)),
                fairness.is(Fairness::Fair),
            );

        Ok(Self {
            system: System::new(vars, rules)?,
            inference: config.inference(),
            area,
            facility,
            price,
            fairness,
        })
    }

    /// Full evaluation, including rule firing strengths and the degree each
    /// input had in each label.
    pub fn evaluate(&self, input: InputVector) -> Result<Outputs<Term>> {
        let mut inputs = Inputs::with_capacity(3);

        inputs
            .add(self.area, input.effective_area)
            .add(self.facility, input.facility_capacity)
            .add(self.price, input.price);

        self.inference.eval(&self.system, &inputs)
    }

    /// Fairness index in `[0, 100]`.
    pub fn score(&self, input: InputVector) -> Result<f64> {
        self.evaluate(input)?
            .value(self.fairness)
            .ok_or_else(|| Error::UndefinedDefuzzification {
                variable: "fairness index".to_owned(),
            })
    }

    pub fn assess(&self, input: InputVector, thresholds: &CategoryThresholds) -> Result<Assessment> {
        let score = self.score(input)?;
        let category = thresholds.categorize(score);

        debug!(score, ?category, "assessed listing");

        Ok(Assessment { score, category })
    }

    pub fn system(&self) -> &System<Term> {
        &self.system
    }

    pub fn area(&self) -> Variable<Area> {
        self.area
    }

    pub fn facility(&self) -> Variable<Facility> {
        self.facility
    }

    pub fn price(&self) -> Variable<Price> {
        self.price
    }

    pub fn fairness(&self) -> Variable<Fairness> {
        self.fairness
    }
}

#[test]
fn test_listing_sums() {
    let listing = Listing {
        land_area: 150.,
        building_area: 110.,
        bedrooms: 2,
        bathrooms: 1,
        garage: 1,
        asking_price: 810_000_000.,
    };

    assert_eq!(
        listing.input_vector(),
        InputVector {
            effective_area: 260.,
            facility_capacity: 4.,
            price: 810_000_000.,
        }
    );
}

#[test]
fn test_categorize() {
    let thresholds = CategoryThresholds::default();

    assert_eq!(thresholds.categorize(100.), Category::VeryFair);
    assert_eq!(thresholds.categorize(85.), Category::VeryFair);
    assert_eq!(thresholds.categorize(84.9), Category::Fair);
    assert_eq!(thresholds.categorize(75.), Category::Fair);
    assert_eq!(thresholds.categorize(55.), Category::FairlyFair);
    assert_eq!(thresholds.categorize(54.99), Category::Unfair);
    assert_eq!(thresholds.categorize(0.), Category::Unfair);
    assert_eq!(Category::FairlyFair.to_string(), "Fairly Fair / Market Price");

    let strict = CategoryThresholds::new(95., 90., 80.).unwrap();

    assert_eq!(strict.categorize(85.), Category::FairlyFair);
    assert_eq!(strict.categorize(79.), Category::Unfair);
}

#[test]
fn test_engine_shape() {
    let engine = FairnessEngine::new(&EngineConfig::default()).unwrap();
    let fairness = engine.system().variable(engine.fairness()).unwrap();

    assert_eq!(engine.system().rules().len(), 9);
    assert_eq!(fairness.universe().len(), 101);
    assert_eq!(fairness.domain(), 0. ..=100.);
    assert_eq!(fairness.labels().count(), 5);
    assert_eq!(
        fairness.membership(&Term::Fairness(Fairness::VeryFair)),
        Some(&MembershipFunction::Triangular(85., 100., 100.))
    );
}
