//! `matsel recommend`: predict suitability for one property vector and list
//! the known materials that match it exactly.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use matsel_classifiers::bundle::{ModelBundle, DEFAULT_BUNDLE_PATH};
use matsel_classifiers::dataset::{load_material_data, MaterialProperties};
use matsel_classifiers::recommend::{recommend_materials, Recommendation};

#[derive(Debug, Clone)]
pub struct RecommendConfig {
    pub model_path: PathBuf,
    pub data: PathBuf,
    pub properties: MaterialProperties,
}

impl RecommendConfig {
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let value = |name: &str| -> Result<f64> {
            matches
                .get_one::<f64>(name)
                .copied()
                .with_context(|| format!("Missing required property --{}", name))
        };

        Ok(Self {
            model_path: matches
                .get_one::<PathBuf>("model_path")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BUNDLE_PATH)),
            data: matches
                .get_one::<PathBuf>("data")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("data/material.csv")),
            properties: MaterialProperties {
                su: value("su")?,
                sy: value("sy")?,
                e: value("e")?,
                g: value("g")?,
                mu: value("mu")?,
                ro: value("ro")?,
            },
        })
    }
}

pub fn run_recommend(config: &RecommendConfig) -> Result<Recommendation> {
    let bundle = ModelBundle::load(&config.model_path)?;
    let dataset = load_material_data(&config.data)?;
    let recommendation = recommend_materials(&config.properties, &bundle.model, &dataset)
        .context("Failed to score material properties")?;
    println!("{}", recommendation);
    Ok(recommendation)
}
