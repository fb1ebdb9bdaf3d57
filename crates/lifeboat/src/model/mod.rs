//! Loaded models: metadata, forest and output transform.

pub mod gbdt;
pub mod meta;
pub mod transform;

pub use gbdt::GbdtModel;
pub use meta::ModelMeta;
pub use transform::OutputTransform;
