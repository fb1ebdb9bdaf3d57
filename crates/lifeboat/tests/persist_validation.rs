//! Targeted validation-failure tests for corrupted artifacts.

use approx::assert_abs_diff_eq;
use lifeboat::features::FeatureName;
use lifeboat::persist::{self, LoadError};
use lifeboat::repr::{MalformedModelError, TreeValidationError};
use lifeboat::testing::DEFAULT_TOLERANCE;
use lifeboat::{PassengerClass, PassengerInputs, Port, PredictorConfig, Survival, SurvivalPredictor};
use serde_json::Value;

fn load_fixture_value() -> Value {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/test-cases/golden_two_tree.model.json");
    let bytes = std::fs::read(&path).expect("read fixture");
    serde_json::from_slice(&bytes).expect("parse fixture json")
}

fn load_err(v: Value) -> LoadError {
    let json = serde_json::to_string(&v).expect("serialize mutated json");
    persist::from_json_str(&json).expect_err("expected error")
}

fn predictor_err(v: Value) -> LoadError {
    let json = serde_json::to_string(&v).expect("serialize mutated json");
    let model = persist::from_json_str(&json).expect("structurally valid model");
    SurvivalPredictor::new(model, PredictorConfig::default()).expect_err("expected error")
}

fn tree_error(err: LoadError) -> (usize, TreeValidationError) {
    match err {
        LoadError::Malformed(MalformedModelError::InvalidTree { tree_idx, error }) => {
            (tree_idx, error)
        }
        other => panic!("expected invalid tree, got: {other:?}"),
    }
}

#[test]
fn validation_fails_on_mismatched_array_lengths() {
    let mut v = load_fixture_value();

    let split_indices = v
        .pointer_mut("/model/forest/trees/0/split_indices")
        .and_then(|x| x.as_array_mut())
        .expect("split_indices array");

    // Remove one element so len != num_nodes.
    split_indices.pop();

    let (tree_idx, error) = tree_error(load_err(v));
    assert_eq!(tree_idx, 0);
    assert!(matches!(error, TreeValidationError::LengthMismatch { .. }), "got: {error:?}");
}

#[test]
fn validation_fails_on_num_nodes_mismatch() {
    let mut v = load_fixture_value();
    v["model"]["forest"]["trees"][1]["num_nodes"] = Value::from(4);

    let (tree_idx, error) = tree_error(load_err(v));
    assert_eq!(tree_idx, 1);
    assert!(matches!(error, TreeValidationError::LengthMismatch { field: "is_leaf", .. }));
}

#[test]
fn validation_fails_on_out_of_bounds_child_index() {
    let mut v = load_fixture_value();

    // Force an invalid child index at the root.
    v["model"]["forest"]["trees"][0]["children_left"][0] = Value::from(9_999_999u64);

    let (_, error) = tree_error(load_err(v));
    assert!(
        matches!(error, TreeValidationError::ChildOutOfBounds { child: 9_999_999, .. }),
        "got: {error:?}"
    );
}

#[test]
fn validation_fails_on_cycle() {
    let mut v = load_fixture_value();

    // Node 2 points back at the root.
    v["model"]["forest"]["trees"][0]["children_right"][2] = Value::from(0);

    let (_, error) = tree_error(load_err(v));
    assert!(
        matches!(
            error,
            TreeValidationError::CycleDetected { .. } | TreeValidationError::UnreachableNode { .. }
        ),
        "got: {error:?}"
    );
}

#[test]
fn validation_fails_on_shared_child() {
    let mut v = load_fixture_value();

    // Root's right child becomes node 1, which is already its left child.
    v["model"]["forest"]["trees"][1]["children_right"][0] = Value::from(1);

    let (_, error) = tree_error(load_err(v));
    assert!(
        matches!(
            error,
            TreeValidationError::DuplicateVisit { node: 1 } | TreeValidationError::UnreachableNode { .. }
        ),
        "got: {error:?}"
    );
}

#[test]
fn validation_fails_on_feature_index_out_of_range() {
    let mut v = load_fixture_value();
    v["model"]["forest"]["trees"][1]["split_indices"][0] = Value::from(11);

    let (_, error) = tree_error(load_err(v));
    assert_eq!(
        error,
        TreeValidationError::FeatureIndexOutOfRange {
            node: 0,
            feature: 11,
            n_features: 11
        }
    );
}

#[test]
fn validation_fails_on_empty_forest() {
    let mut v = load_fixture_value();
    v["model"]["forest"]["trees"] = Value::from(Vec::<Value>::new());

    assert!(matches!(
        load_err(v),
        LoadError::Malformed(MalformedModelError::NoTrees)
    ));
}

#[test]
fn validation_fails_on_unknown_format_version() {
    let mut v = load_fixture_value();
    v["format_version"] = Value::from(9);

    assert!(matches!(load_err(v), LoadError::UnsupportedVersion(9)));
}

#[test]
fn validation_fails_on_unknown_comparator() {
    let mut v = load_fixture_value();
    v["model"]["forest"]["comparator"] = Value::from("greater");

    assert!(matches!(load_err(v), LoadError::Json(_)));
}

#[test]
fn predictor_rejects_unknown_feature() {
    let mut v = load_fixture_value();
    v["model"]["meta"]["feature_names"][2] = Value::from("Cabin");

    assert!(matches!(predictor_err(v), LoadError::UnknownFeature(name) if name == "Cabin"));
}

#[test]
fn predictor_rejects_duplicate_feature() {
    let mut v = load_fixture_value();
    v["model"]["meta"]["feature_names"][2] = Value::from("SibSp");

    assert!(matches!(
        predictor_err(v),
        LoadError::DuplicateFeature(FeatureName::SibSp)
    ));
}

#[test]
fn predictor_accepts_permuted_features() {
    let mut v = load_fixture_value();

    // Swap Age (0) and Sex_male (6) in both the names and the splits.
    let names = v["model"]["meta"]["feature_names"].as_array_mut().unwrap();
    names.swap(0, 6);
    v["model"]["forest"]["trees"][0]["split_indices"][0] = Value::from(0);
    v["model"]["forest"]["trees"][0]["split_indices"][2] = Value::from(6);

    let json = serde_json::to_string(&v).unwrap();
    let permuted =
        SurvivalPredictor::from_model(persist::from_json_str(&json).unwrap()).unwrap();
    let canonical = SurvivalPredictor::from_model(lifeboat::testing::golden_model()).unwrap();

    for record in lifeboat::testing::random_records(100, 9) {
        assert_eq!(
            permuted.predict_record(&record).unwrap(),
            canonical.predict_record(&record).unwrap()
        );
    }
}

fn score_boy(v: Value) -> (f32, Survival) {
    let json = serde_json::to_string(&v).expect("serialize mutated json");
    let model = persist::from_json_str(&json).expect("valid model");
    let predictor = SurvivalPredictor::from_model(model).expect("valid predictor");
    let boy =
        PassengerInputs::new(12.0, 1, 1, 21.0, true, PassengerClass::Second, Port::Queenstown);
    let result = predictor.predict(&boy).expect("valid inputs");
    (result.raw_score(), result.outcome())
}

#[test]
fn threshold_just_below_value_routes_right() {
    let mut v = load_fixture_value();

    // Nearest f32 is 12.0, which would send a 12-year-old left under `<=`.
    v["model"]["forest"]["trees"][0]["thresholds"][2] = Value::from(11.9999999);

    let (raw_score, outcome) = score_boy(v);
    assert_abs_diff_eq!(raw_score, -1.0, epsilon = DEFAULT_TOLERANCE);
    assert_eq!(outcome, Survival::DidNotSurvive);
}

#[test]
fn threshold_just_above_value_routes_left_under_strict_comparator() {
    let mut v = load_fixture_value();
    v["model"]["forest"]["comparator"] = Value::from("less");

    // Nearest f32 is 12.0, which would send a 12-year-old right under `<`.
    v["model"]["forest"]["trees"][0]["thresholds"][2] = Value::from(12.0000001);

    let (raw_score, outcome) = score_boy(v);
    assert_abs_diff_eq!(raw_score, 0.5, epsilon = DEFAULT_TOLERANCE);
    assert_eq!(outcome, Survival::Survived);
}
