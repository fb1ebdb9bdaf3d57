//! Fixtures shared by unit tests, integration tests and benches.

use rand::prelude::*;

use crate::features::{
    AGE_RANGE, FeatureName, FeatureRecord, MAX_PARCH, MAX_SIB_SP, PassengerInputs,
};
use crate::model::{GbdtModel, ModelMeta, OutputTransform};
use crate::repr::{Forest, TreeBuilder};

/// Default absolute tolerance for score comparisons.
pub const DEFAULT_TOLERANCE: f32 = 1e-6;

/// Hand-built two-tree forest over the record features, bias `-0.25`.
///
/// ```text
/// tree 0: Sex_male <= 0.5 ? 1.5 : (Age <= 12 ? 0.5 : -1.0)
/// tree 1: Pclass_3 <= 0.5 ? 0.25 : -0.75
/// ```
///
/// Expected raw scores:
/// - adult man, third class: `-2.0`
/// - woman, first or second class: `1.5`
/// - boy of exactly 12, second class: `0.5` (`-1.0` under a strict comparator)
pub fn golden_forest() -> Forest {
    let mut forest = Forest::new().with_base_score(-0.25);

    let mut b = TreeBuilder::new();
    b.add_split(FeatureName::SexMale.index() as u32, 0.5, true, 1, 2);
    b.add_leaf(1.5);
    b.add_split(FeatureName::Age.index() as u32, 12.0, true, 3, 4);
    b.add_leaf(0.5);
    b.add_leaf(-1.0);
    forest.push_tree(b.build());

    let mut b = TreeBuilder::new();
    b.add_split(FeatureName::Pclass3.index() as u32, 0.5, true, 1, 2);
    b.add_leaf(0.25);
    b.add_leaf(-0.75);
    forest.push_tree(b.build());

    forest
}

/// [`golden_forest`] wrapped as an identity-transform model with the
/// canonical feature names.
pub fn golden_model() -> GbdtModel {
    let meta = ModelMeta::new(FeatureName::column_names()).with_description("golden two-tree");
    GbdtModel::new(meta, golden_forest(), OutputTransform::Identity)
        .expect("golden forest is structurally valid")
}

/// Random, always valid passenger inputs.
pub fn random_inputs(n: usize, seed: u64) -> Vec<PassengerInputs> {
    const PORTS: [&str; 3] = ["C", "Q", "S"];

    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| PassengerInputs {
            age: rng.gen_range(AGE_RANGE),
            sib_sp: rng.gen_range(0..=MAX_SIB_SP),
            parch: rng.gen_range(0..=MAX_PARCH),
            fare: rng.gen_range(0.0..=512.0),
            sex_male: rng.r#gen(),
            pclass: rng.gen_range(1..=3),
            embarked: PORTS[rng.gen_range(0..PORTS.len())].to_string(),
        })
        .collect()
}

/// Records built from [`random_inputs`]. Inputs that fail validation are
/// skipped, so fewer than `n` records may be returned.
pub fn random_records(n: usize, seed: u64) -> Vec<FeatureRecord> {
    random_inputs(n, seed)
        .iter()
        .filter_map(|inputs| FeatureRecord::build(inputs).ok())
        .collect()
}
