use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::inference::Inference;
use crate::ops::{AggregationOp, AndOp, DefuzzificationOp, ImplicationOp, OrOp};
use crate::variable::Fuzzification;

/// Sampling resolutions and operator choices for a [`FairnessEngine`].
///
/// The defaults reproduce the classic Mamdani pipeline (min AND, clipping
/// implication, max aggregation, centroid) on 1000 points for area and
/// price, 200 for facilities, and one point per whole score for the output.
///
/// [`FairnessEngine`]: crate::FairnessEngine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub area_resolution: usize,
    pub facility_resolution: usize,
    pub price_resolution: usize,
    pub fairness_resolution: usize,
    pub fuzzification: Fuzzification,
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub implication: ImplicationOp,
    pub aggregation: AggregationOp,
    pub defuzzification: DefuzzificationOp,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            area_resolution: 1000,
            facility_resolution: 200,
            price_resolution: 1000,
            fairness_resolution: 101,
            fuzzification: Fuzzification::Sampled,
            and_op: AndOp::Min,
            or_op: OrOp::Max,
            implication: ImplicationOp::Min,
            aggregation: AggregationOp::Max,
            defuzzification: DefuzzificationOp::Centroid,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        let resolutions = [
            ("effective area", self.area_resolution),
            ("facility capacity", self.facility_resolution),
            ("price", self.price_resolution),
            ("fairness index", self.fairness_resolution),
        ];

        for (variable, resolution) in resolutions {
            if resolution < 2 {
                return Err(Error::InvalidResolution {
                    variable: variable.to_owned(),
                    resolution,
                });
            }
        }

        Ok(())
    }

    pub fn inference(&self) -> Inference {
        Inference::new(
            self.and_op,
            self.or_op,
            self.implication,
            self.aggregation,
            self.defuzzification,
            self.fuzzification,
        )
    }
}

/// Lower score bounds for each verdict. A caller policy, kept apart from the
/// engine so it can change without rebuilding anything.
///
/// Deserialization goes through [`CategoryThresholds::new`], so a loaded
/// policy is validated like a constructed one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct CategoryThresholds {
    pub very_fair: f64,
    pub fair: f64,
    pub fairly_fair: f64,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            very_fair: 85.,
            fair: 75.,
            fairly_fair: 55.,
        }
    }
}

/// Unchecked wire form of [`CategoryThresholds`]; missing bounds take the
/// default policy's values.
#[derive(Deserialize)]
#[serde(default)]
struct RawThresholds {
    very_fair: f64,
    fair: f64,
    fairly_fair: f64,
}

impl Default for RawThresholds {
    fn default() -> Self {
        let CategoryThresholds {
            very_fair,
            fair,
            fairly_fair,
        } = CategoryThresholds::default();

        Self {
            very_fair,
            fair,
            fairly_fair,
        }
    }
}

impl TryFrom<RawThresholds> for CategoryThresholds {
    type Error = Error;

    fn try_from(raw: RawThresholds) -> Result<Self> {
        Self::new(raw.very_fair, raw.fair, raw.fairly_fair)
    }
}

impl CategoryThresholds {
    pub fn new(very_fair: f64, fair: f64, fairly_fair: f64) -> Result<Self> {
        let this = Self {
            very_fair,
            fair,
            fairly_fair,
        };

        this.validate()?;

        Ok(this)
    }

    /// Thresholds must be strictly descending and lie within `[0, 100]`.
    pub fn validate(&self) -> Result<()> {
        let bounds = [self.very_fair, self.fair, self.fairly_fair];
        let in_range = bounds.iter().all(|b| (0.0..=100.0).contains(b));
        let descending = bounds.windows(2).all(|w| w[0] > w[1]);

        if in_range && descending {
            Ok(())
        } else {
            Err(Error::InvalidThresholds(bounds))
        }
    }
}

#[test]
fn test_engine_config_from_json() {
    let config: EngineConfig = serde_json::from_str(
        r#"{ "fairness_resolution": 1001, "fuzzification": "exact", "defuzzification": "cog" }"#,
    )
    .unwrap();

    assert_eq!(config.fairness_resolution, 1001);
    assert_eq!(config.fuzzification, Fuzzification::Exact);
    assert_eq!(config.defuzzification, DefuzzificationOp::Cog);
    assert_eq!(config.area_resolution, 1000);
    assert_eq!(config.and_op, AndOp::Min);
    assert!(config.validate().is_ok());

    let config = EngineConfig {
        facility_resolution: 1,
        ..EngineConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(Error::InvalidResolution { resolution: 1, .. })
    ));
}

#[test]
fn test_thresholds() {
    assert!(CategoryThresholds::default().validate().is_ok());
    assert!(CategoryThresholds::new(90., 80., 60.).is_ok());
    assert_eq!(
        CategoryThresholds::new(75., 85., 55.),
        Err(Error::InvalidThresholds([75., 85., 55.]))
    );
    assert!(CategoryThresholds::new(120., 85., 55.).is_err());

    let thresholds: CategoryThresholds = serde_json::from_str(r#"{ "very_fair": 90 }"#).unwrap();

    assert_eq!(thresholds.very_fair, 90.);
    assert_eq!(thresholds.fair, 75.);
}

#[test]
fn test_thresholds_from_json_are_validated() {
    let err = serde_json::from_str::<CategoryThresholds>(r#"{ "very_fair": 50 }"#).unwrap_err();

    assert!(err.to_string().contains("category thresholds"), "{err}");
    assert!(serde_json::from_str::<CategoryThresholds>(r#"{ "fairly_fair": -1 }"#).is_err());

    let thresholds: CategoryThresholds =
        serde_json::from_str(r#"{ "very_fair": 95, "fair": 90, "fairly_fair": 80 }"#).unwrap();

    assert_eq!(thresholds, CategoryThresholds::new(95., 90., 80.).unwrap());
}
