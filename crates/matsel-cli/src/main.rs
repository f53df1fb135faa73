use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use matsel_cli::recommend::{run_recommend, RecommendConfig};
use matsel_cli::train::{input, trainer};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MATSEL_LOG", "error,matsel=info"))
        .init();

    let matches = Command::new("matsel")
        .version(clap::crate_version!())
        .about("Material selection: train a suitability classifier and query it")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Train the gradient-boosted classifier and write a model bundle")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Optional JSON training configuration; flags below override it")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .help("Path to material.csv (default: data/material.csv)")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("model_out")
                        .short('o')
                        .long("model-out")
                        .help("Output path for trained model bundle (default: model/material_gbc.joblib)")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("test_size")
                        .long("test-size")
                        .help("Test split size (default: 0.30)")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("random_state")
                        .long("random-state")
                        .help("Random state for reproducibility (default: 0)")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("recommend")
                .about("Predict suitability for one set of properties and list matching materials")
                .arg(
                    Arg::new("model_path")
                        .short('m')
                        .long("model")
                        .help("Path to the trained model bundle (default: model/material_gbc.joblib)")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .help("Path to material.csv used for the lookup (default: data/material.csv)")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .args(property_args()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("recommend", sub_m)) => handle_recommend(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn property_args() -> Vec<Arg> {
    [
        ("su", "Ultimate tensile strength"),
        ("sy", "Yield strength"),
        ("e", "Elastic modulus"),
        ("g", "Shear modulus"),
        ("mu", "Poisson ratio"),
        ("ro", "Density"),
    ]
    .into_iter()
    .map(|(name, help)| {
        Arg::new(name)
            .long(name)
            .help(help)
            .required(true)
            .allow_negative_numbers(true)
            .value_parser(clap::value_parser!(f64))
    })
    .collect()
}

fn handle_train(matches: &ArgMatches) -> Result<()> {
    let config = input::from_arguments(matches)?;
    log::info!("[matsel::train] Training from data: {}", config.data);

    match trainer::run_training(&config) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_recommend(matches: &ArgMatches) -> Result<()> {
    let config = RecommendConfig::from_arguments(matches)?;
    log::info!(
        "[matsel::recommend] Querying {} against {}",
        config.model_path.display(),
        config.data.display()
    );

    match run_recommend(&config) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Recommendation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
