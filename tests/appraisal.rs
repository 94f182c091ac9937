use fuzzy_appraisal::{
    Area, Category, CategoryThresholds, DefuzzificationOp, EngineConfig, Error, Facility, FairnessEngine,
    Fuzzification, InputVector, Listing, Price,
};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

fn engine() -> FairnessEngine {
    FairnessEngine::new(&EngineConfig::default()).unwrap()
}

fn input(effective_area: f64, facility_capacity: f64, price: f64) -> InputVector {
    InputVector {
        effective_area,
        facility_capacity,
        price,
    }
}

fn representative_listing() -> Listing {
    Listing {
        land_area: 150.,
        building_area: 110.,
        bedrooms: 2,
        bathrooms: 1,
        garage: 1,
        asking_price: 810_000_000.,
    }
}

#[test]
fn expensive_tiny_house_is_very_unfair() {
    let engine = engine();
    let outputs = engine.evaluate(input(0., 0., 2e10)).unwrap();
    let score = outputs.value(engine.fairness()).unwrap();

    assert_eq!(&outputs.firing_strengths()[..2], &[1., 1.]);
    assert!(outputs.firing_strengths()[2..].iter().all(|&s| s == 0.));
    assert!(score < 35.);
    // Centroid of the full VeryUnfair triangle sampled at whole scores
    assert!((score - 34. / 3.).abs() < EPSILON, "{score}");

    let assessment = engine
        .assess(input(0., 0., 2e10), &CategoryThresholds::default())
        .unwrap();

    assert_eq!(assessment.category, Category::Unfair);
}

#[test]
fn representative_listing_baseline() {
    let engine = engine();
    let outputs = engine.evaluate(representative_listing().input_vector()).unwrap();
    let score = outputs.value(engine.fairness()).unwrap();

    assert_eq!(outputs.degree(engine.price(), Price::Cheap), Some(1.));
    assert_eq!(outputs.degree(engine.area(), Area::Small), Some(0.));
    assert!((outputs.degree(engine.area(), Area::Medium).unwrap() - 0.44).abs() < EPSILON);
    assert!((outputs.degree(engine.facility(), Facility::Low).unwrap() - 0.5).abs() < 0.01);

    // Sampled fuzzification puts 4 facilities just inside the foot of
    // Adequate, so only the last rule (cheap, medium, adequate) fires
    let strengths = outputs.firing_strengths();
    assert_eq!(strengths.len(), 9);
    assert!(strengths[..8].iter().all(|&s| s == 0.));
    assert!((strengths[8] - 0.004_221_105_527_638_13).abs() < EPSILON);

    // A clipped Fair triangle is symmetric about its peak
    assert!((score - 85.).abs() < EPSILON, "{score}");

    let assessment = engine
        .assess(representative_listing().input_vector(), &CategoryThresholds::default())
        .unwrap();

    assert!(matches!(assessment.category, Category::VeryFair | Category::Fair));
}

#[test]
fn exact_fuzzification_leaves_representative_listing_undefined() {
    let config = EngineConfig {
        fuzzification: Fuzzification::Exact,
        ..EngineConfig::default()
    };
    let engine = FairnessEngine::new(&config).unwrap();

    // 4 facilities is exactly the foot of Adequate and below High, and the
    // area is neither Large nor Small: no rule can reach a non-zero strength
    let err = engine.score(representative_listing().input_vector()).unwrap_err();

    assert_eq!(
        err,
        Error::UndefinedDefuzzification {
            variable: "fairness index".to_owned()
        }
    );
}

#[test]
fn mansion_at_max_price_matches_no_rule() {
    let err = engine().score(input(5000., 40., 3e10)).unwrap_err();

    assert!(matches!(err, Error::UndefinedDefuzzification { .. }));
}

#[test]
fn normal_price_medium_house_is_fairly_fair() {
    let engine = engine();
    let score = engine.score(input(400., 8., 2e9)).unwrap();

    assert!((score - 70.).abs() < EPSILON, "{score}");
    assert_eq!(CategoryThresholds::default().categorize(score), Category::FairlyFair);
}

#[test]
fn score_does_not_drop_as_cheap_house_grows() {
    let engine = engine();
    let mut previous = f64::MIN;

    // Below 150 nothing with adequate facilities fires
    for area in (160..=2000).step_by(10) {
        let score = engine.score(input(f64::from(area), 8., 5e8)).unwrap();

        assert!(score >= previous - EPSILON, "area {area}: {score} < {previous}");
        previous = score;
    }

    assert!(previous > 85.);
}

#[test]
fn rejects_invalid_inputs() {
    let engine = engine();

    for bad in [input(-1., 4., 1e9), input(200., f64::NAN, 1e9), input(200., 4., f64::INFINITY)] {
        assert!(matches!(engine.score(bad), Err(Error::InvalidInput { .. })), "{bad:?}");
    }

    assert!(matches!(
        engine.score(input(200., 4., -5.)),
        Err(Error::InvalidInput { variable, .. }) if variable == "price"
    ));
}

#[test]
fn finer_output_grid_converges_on_centroid() {
    // Continuous centroid of the VeryUnfair triangle (0, 0, 35)
    let exact = 35. / 3.;
    let mut previous_error = f64::MAX;

    for resolution in [101, 201, 401, 1001, 2001] {
        let config = EngineConfig {
            fairness_resolution: resolution,
            fuzzification: Fuzzification::Exact,
            ..EngineConfig::default()
        };
        let score = FairnessEngine::new(&config).unwrap().score(input(0., 0., 2e10)).unwrap();
        let error = (score - exact).abs();

        assert!(error < previous_error, "resolution {resolution}: {error} >= {previous_error}");
        previous_error = error;
    }
}

#[test]
fn alternative_defuzzifiers_stay_in_range() {
    for defuzzification in [
        DefuzzificationOp::Cog,
        DefuzzificationOp::Boa,
        DefuzzificationOp::Mom,
        DefuzzificationOp::Lom,
        DefuzzificationOp::Som,
    ] {
        let config = EngineConfig {
            defuzzification,
            ..EngineConfig::default()
        };
        let score = FairnessEngine::new(&config).unwrap().score(input(700., 12., 1.5e9)).unwrap();

        assert!((0.0..=100.0).contains(&score), "{defuzzification:?}: {score}");
    }

    let config = EngineConfig {
        defuzzification: DefuzzificationOp::Cog,
        ..EngineConfig::default()
    };
    let score = FairnessEngine::new(&config).unwrap().score(input(0., 0., 2e10)).unwrap();

    // The triangle's breakpoints sit on the grid, so the area centroid is exact
    assert!((score - 35. / 3.).abs() < EPSILON, "{score}");
}

#[test]
fn engine_is_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FairnessEngine>();

    let engine = engine();
    let inputs: Vec<InputVector> = (0..32)
        .map(|i| input(100. + 60. * f64::from(i), f64::from(i % 20), 3e8 * f64::from(i + 1)))
        .collect();
    let expected: Vec<_> = inputs.iter().map(|&i| engine.score(i)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| inputs.iter().map(|&i| engine.score(i)).collect::<Vec<_>>()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

proptest! {
    #[test]
    fn saturates_above_domain_max(
        area_excess in 0.0f64..1e6,
        facility_excess in 0.0f64..1e3,
        price_excess in 0.0f64..1e12,
        area in 0.0f64..2000.,
        facility in 0.0f64..25.,
        price in 0.0f64..2e10,
    ) {
        let engine = engine();

        prop_assert_eq!(
            engine.score(input(2000. + area_excess, facility, price)),
            engine.score(input(2000., facility, price))
        );
        prop_assert_eq!(
            engine.score(input(area, 25. + facility_excess, price)),
            engine.score(input(area, 25., price))
        );
        prop_assert_eq!(
            engine.score(input(area, facility, 2e10 + price_excess)),
            engine.score(input(area, facility, 2e10))
        );
    }

    #[test]
    fn identical_inputs_give_identical_scores(
        area in 0.0f64..3000.,
        facility in 0.0f64..30.,
        price in 0.0f64..3e10,
    ) {
        let engine = engine();
        let first = engine.score(input(area, facility, price));
        let second = engine.score(input(area, facility, price));

        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.to_bits(), b.to_bits());
                prop_assert!((0.0..=100.0).contains(&a));
            },
            (first, second) => prop_assert_eq!(first, second),
        }
    }
}
