//! matsel-classifiers: training and inference helpers for material selection.
//!
//! This crate loads labelled material-property tables, splits them with a
//! seeded stratified split, fits a gradient-boosted tree classifier (GBDT),
//! evaluates it, and persists the fitted model together with its ordered
//! feature schema as a bundle that the prediction service reloads.
//!
//! The boosting itself is delegated to the `gbdt` crate; this crate only
//! configures it and wraps it behind the [`models::Classifier`] trait so
//! callers can swap in other implementations (or stubs in tests).
pub mod bundle;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod models;
pub mod recommend;
pub mod split;
pub mod training;
