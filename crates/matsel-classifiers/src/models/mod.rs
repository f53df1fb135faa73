pub mod classifier_trait;
pub mod gbdt;

pub use classifier_trait::Classifier;
pub use self::gbdt::GBDTClassifier;
