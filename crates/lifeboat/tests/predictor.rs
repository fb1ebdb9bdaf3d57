//! End-to-end prediction tests against the golden fixture and the bundled model.

use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use rstest::rstest;

use lifeboat::features::FEATURE_COUNT;
use lifeboat::testing::{DEFAULT_TOLERANCE, golden_model, random_records};
use lifeboat::{
    FeatureRecord, OutputTransform, Parallelism, PassengerClass, PassengerForm, PassengerInputs,
    Port, PredictError, PredictorConfig, Survival, SurvivalPredictor, ValidationError,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/test-cases")
        .join(name)
}

fn golden_predictor() -> SurvivalPredictor {
    SurvivalPredictor::load(fixture("golden_two_tree.model.json"), PredictorConfig::default())
        .expect("load golden fixture")
}

fn bundled_predictor() -> SurvivalPredictor {
    SurvivalPredictor::bundled(PredictorConfig::default()).expect("bundled model")
}

fn inputs(
    age: f32,
    sib_sp: u32,
    parch: u32,
    fare: f32,
    sex_male: bool,
    class: PassengerClass,
    port: Port,
) -> PassengerInputs {
    PassengerInputs::new(age, sib_sp, parch, fare, sex_male, class, port)
}

// =============================================================================
// Golden two-tree ensemble
// =============================================================================

#[test]
fn golden_fixture_matches_hand_built_model() {
    assert_eq!(golden_predictor().model(), &golden_model());
}

#[rstest]
#[case::adult_man_third_class(
    inputs(35.0, 0, 0, 7.25, true, PassengerClass::Third, Port::Southampton),
    -2.0,
    Survival::DidNotSurvive
)]
#[case::woman_first_class(
    inputs(30.0, 0, 0, 30.0, false, PassengerClass::First, Port::Cherbourg),
    1.5,
    Survival::Survived
)]
#[case::boy_at_age_threshold(
    inputs(12.0, 1, 1, 21.0, true, PassengerClass::Second, Port::Queenstown),
    0.5,
    Survival::Survived
)]
#[case::woman_third_class(
    inputs(22.0, 1, 0, 7.9, false, PassengerClass::Third, Port::Southampton),
    0.5,
    Survival::Survived
)]
fn golden_scores(
    #[case] inputs: PassengerInputs,
    #[case] expected_score: f32,
    #[case] expected: Survival,
) {
    let result = golden_predictor().predict(&inputs).unwrap();

    assert_abs_diff_eq!(result.raw_score(), expected_score, epsilon = DEFAULT_TOLERANCE);
    assert_eq!(result.outcome(), expected);
    assert_eq!(result.probability(), None);
}

#[test]
fn strict_comparator_routes_threshold_right() {
    let mut value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(fixture("golden_two_tree.model.json")).unwrap())
            .unwrap();
    value["model"]["forest"]["comparator"] = "less".into();
    let model = lifeboat::persist::from_json_str(&value.to_string()).unwrap();
    let strict = SurvivalPredictor::from_model(model).unwrap();

    let boy = inputs(12.0, 1, 1, 21.0, true, PassengerClass::Second, Port::Queenstown);
    let result = strict.predict(&boy).unwrap();
    assert_abs_diff_eq!(result.raw_score(), -1.0, epsilon = DEFAULT_TOLERANCE);
    assert_eq!(result.outcome(), Survival::DidNotSurvive);

    // Away from any threshold the convention doesn't matter.
    let woman = inputs(30.0, 0, 0, 30.0, false, PassengerClass::First, Port::Cherbourg);
    assert_eq!(
        strict.predict(&woman).unwrap(),
        golden_predictor().predict(&woman).unwrap()
    );
}

// =============================================================================
// Bundled model
// =============================================================================

#[rstest]
#[case::first_class_woman(
    inputs(30.0, 0, 0, 30.0, false, PassengerClass::First, Port::Cherbourg),
    0.6,
    0.645_656,
    Survival::Survived
)]
#[case::third_class_man(
    inputs(30.0, 0, 0, 8.0, true, PassengerClass::Third, Port::Southampton),
    -1.7,
    0.154_465,
    Survival::DidNotSurvive
)]
#[case::young_boy_with_family(
    inputs(5.0, 1, 2, 60.0, true, PassengerClass::Second, Port::Southampton),
    0.45,
    0.610_639,
    Survival::Survived
)]
#[case::large_third_class_family(
    inputs(40.0, 4, 2, 20.0, false, PassengerClass::Third, Port::Queenstown),
    -1.0,
    0.268_941,
    Survival::DidNotSurvive
)]
fn bundled_scores(
    #[case] inputs: PassengerInputs,
    #[case] expected_score: f32,
    #[case] expected_probability: f32,
    #[case] expected: Survival,
) {
    let result = bundled_predictor().predict(&inputs).unwrap();

    assert_abs_diff_eq!(result.raw_score(), expected_score, epsilon = 1e-5);
    assert_abs_diff_eq!(result.probability().unwrap(), expected_probability, epsilon = 1e-5);
    assert_eq!(result.outcome(), expected);
}

#[test]
fn default_form_predicts_with_bundled_model() {
    let predictor = bundled_predictor();
    let mut form = PassengerForm::new();
    let woman = predictor.predict(&form.inputs()).unwrap();

    form.toggle_sex();
    let man = predictor.predict(&form.inputs()).unwrap();

    assert!(woman.probability().unwrap() > man.probability().unwrap());
}

#[test]
fn identity_override_thresholds_raw_score() {
    let config = PredictorConfig::builder()
        .output_transform(OutputTransform::Identity)
        .build()
        .unwrap();
    let predictor = SurvivalPredictor::bundled(config).unwrap();
    let woman = inputs(30.0, 0, 0, 30.0, false, PassengerClass::First, Port::Cherbourg);

    let result = predictor.predict(&woman).unwrap();
    assert_eq!(result.probability(), None);
    // 0.6 >= 0.5
    assert!(result.survived());
}

#[test]
fn higher_threshold_flips_borderline_decision() {
    let config = PredictorConfig::builder().threshold(0.7).build().unwrap();
    let predictor = SurvivalPredictor::bundled(config).unwrap();
    let woman = inputs(30.0, 0, 0, 30.0, false, PassengerClass::First, Port::Cherbourg);

    let result = predictor.predict(&woman).unwrap();
    assert_eq!(result.outcome(), Survival::DidNotSurvive);
    assert_abs_diff_eq!(result.probability().unwrap(), 0.645_656, epsilon = 1e-5);
}

// =============================================================================
// Input validation
// =============================================================================

#[test]
fn age_out_of_range_is_rejected() {
    let err = bundled_predictor()
        .predict(&inputs(81.0, 0, 0, 30.0, false, PassengerClass::First, Port::Cherbourg))
        .unwrap_err();

    assert!(err.is_recoverable());
    assert!(matches!(
        err,
        PredictError::Validation(ValidationError::OutOfRange { value, .. }) if value == 81.0
    ));
}

#[test]
fn bad_selectors_are_rejected() {
    let predictor = bundled_predictor();
    let mut raw = inputs(30.0, 0, 0, 30.0, false, PassengerClass::First, Port::Cherbourg);

    raw.pclass = 4;
    assert!(matches!(
        predictor.predict(&raw),
        Err(PredictError::Validation(ValidationError::UnknownClass(4)))
    ));

    raw.pclass = 1;
    raw.embarked = "X".into();
    assert!(matches!(
        predictor.predict(&raw),
        Err(PredictError::Validation(ValidationError::UnknownPort(_)))
    ));
}

// =============================================================================
// Batches and determinism
// =============================================================================

#[test]
fn repeated_predictions_are_identical() {
    let predictor = bundled_predictor();
    let records = random_records(64, 7);

    for record in &records {
        let first = predictor.predict_record(record).unwrap();
        let second = predictor.predict_record(record).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn parallel_batch_matches_sequential() {
    let records = random_records(500, 42);
    let sequential = bundled_predictor().predict_batch(&records).unwrap();

    let config = PredictorConfig::builder()
        .parallelism(Parallelism::Parallel)
        .build()
        .unwrap();
    let parallel = SurvivalPredictor::bundled(config)
        .unwrap()
        .predict_batch(&records)
        .unwrap();

    assert_eq!(sequential.len(), records.len());
    assert_eq!(sequential, parallel);
}

#[test]
fn matrix_prediction_matches_batch() {
    let predictor = bundled_predictor();
    let records = random_records(32, 3);
    let matrix = FeatureRecord::stack(&records);

    let from_matrix = predictor.predict_matrix(matrix.view()).unwrap();
    let from_records = predictor.predict_batch(&records).unwrap();
    assert_eq!(from_matrix, from_records);
}

#[test]
fn matrix_width_is_checked() {
    let matrix = ndarray::Array2::<f32>::zeros((2, FEATURE_COUNT - 1));
    let err = bundled_predictor().predict_matrix(matrix.view()).unwrap_err();
    assert_eq!(
        err,
        PredictError::Validation(ValidationError::WrongWidth {
            expected: FEATURE_COUNT,
            got: FEATURE_COUNT - 1
        })
    );
}

#[test]
fn matrix_rows_are_validated() {
    let records = random_records(4, 11);
    let mut matrix = FeatureRecord::stack(&records);
    // Break the family size invariant on one row.
    matrix[[2, 4]] += 1.0;

    let err = bundled_predictor().predict_matrix(matrix.view()).unwrap_err();
    assert!(matches!(
        err,
        PredictError::Validation(ValidationError::Inconsistent(_))
    ));
}
