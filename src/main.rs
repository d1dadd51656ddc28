//! featsel: nearest-neighbor feature selection from the terminal.
//!
//! Runs forward selection or backward elimination over a dataset file, or over
//! a generated dataset when no file is given.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use dialoguer::Input;
use tracing_subscriber::EnvFilter;

use nn_feature_selection::config::{self, SelectionConfig};
use nn_feature_selection::data::synthetic::{self, SyntheticSpec};
use nn_feature_selection::data::{self, Normalization};
use nn_feature_selection::report::{self, ConsoleReporter};
use nn_feature_selection::{Algorithm, FeatureSearch, Instance, LeaveOneOut, NoopObserver, SelectionError};

/// Greedy feature selection for a nearest-neighbor classifier
#[derive(Parser, Debug)]
#[command(name = "featsel", version, about, long_about = None)]
struct Cli {
    /// Dataset file: one instance per line, class label first
    dataset: Option<PathBuf>,

    /// Search algorithm: 1/forward or 2/backward (prompted for if omitted)
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Number of features in the generated dataset when no file is given
    #[arg(short = 'n', long)]
    features: Option<usize>,

    /// Feature normalization: none, min-max or z-score
    #[arg(long)]
    normalization: Option<Normalization>,

    /// Leading feature columns to drop before normalizing
    #[arg(long)]
    skip_leading: Option<usize>,

    /// Evaluate candidates in parallel
    #[arg(long)]
    parallel: bool,

    /// Memoize subset accuracies
    #[arg(long)]
    cache: bool,

    /// Seed for the generated dataset
    #[arg(long)]
    seed: Option<u64>,

    /// Only print the per-step summaries, not every candidate
    #[arg(long)]
    brief: bool,

    /// Print the result as JSON instead of the trace
    #[arg(long)]
    json: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Write a generated dataset in the input format
    Generate {
        /// Output file
        output: PathBuf,

        /// Number of instances
        #[arg(short, long, default_value_t = 100)]
        instances: usize,

        /// Number of features
        #[arg(short = 'n', long, default_value_t = 10)]
        features: usize,

        /// Comma-separated 1-based informative features (default: 1,2)
        #[arg(long, value_delimiter = ',')]
        informative: Vec<usize>,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Some(Commands::Generate {
        output,
        instances,
        features,
        informative,
        seed,
    }) = &cli.command
    {
        if let Err(message) = check_informative(informative, *features) {
            Cli::command().error(ErrorKind::ValueValidation, message).exit();
        }
        let mut spec = SyntheticSpec::new(*instances, *features, *seed);
        if !informative.is_empty() {
            spec = spec.with_informative(informative.clone());
        }
        let dataset = synthetic::generate(&spec);
        let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
        data::write_dataset(BufWriter::new(file), &dataset)?;
        println!(
            "Wrote {} instances with {} features to {}",
            dataset.len(),
            features,
            output.display()
        );
        return Ok(());
    }

    let workspace = std::env::current_dir().ok();
    let mut config = config::load_config(workspace.as_deref(), cli.config.as_deref())?;
    apply_overrides(&mut config, &cli);

    let dataset = match &cli.dataset {
        Some(path) => data::load_dataset(path, &config.load_options())
            .with_context(|| format!("loading {}", path.display()))?,
        None => generated_dataset(&cli, &config)?,
    };
    let num_features = dataset.first().map_or(0, Instance::num_features);
    if !cli.json {
        println!(
            "This dataset has {} features (not including the class attribute), with {} instances.",
            num_features,
            dataset.len()
        );
        println!();
    }

    let choice = match (&cli.algorithm, config.algorithm) {
        (Some(choice), _) => choice.clone(),
        (None, Some(Algorithm::ForwardSelection)) => "1".to_string(),
        (None, Some(Algorithm::BackwardElimination)) => "2".to_string(),
        (None, None) => Input::<String>::new()
            .with_prompt("Type the number of the algorithm you want to run.\n  1) Forward Selection\n  2) Backward Elimination\n")
            .interact_text()?,
    };
    let Some(algorithm) = resolve_algorithm(&choice, &mut io::stdout().lock())? else {
        return Ok(());
    };

    let scorer = LeaveOneOut::new(&dataset)
        .with_parallel(config.parallel)
        .with_cache(config.cache);
    let search = FeatureSearch::new(&scorer).with_parallel(config.parallel);

    if cli.json {
        let result = search.run(algorithm, &mut NoopObserver)?;
        println!("{}", report::to_json(&result)?);
    } else {
        let mut reporter = ConsoleReporter::new(io::stdout().lock()).with_candidates(!cli.brief);
        search.run(algorithm, &mut reporter)?;
    }
    Ok(())
}

/// Maps the menu choice to an algorithm. An invalid choice is reported on `out`
/// and yields `None`, which ends the run successfully without searching.
fn resolve_algorithm(choice: &str, out: &mut impl Write) -> anyhow::Result<Option<Algorithm>> {
    match Algorithm::from_choice(choice) {
        Ok(algorithm) => Ok(Some(algorithm)),
        Err(SelectionError::InvalidAlgorithm(choice)) => {
            writeln!(
                out,
                "Invalid choice {choice:?}! Please pick 1 (Forward Selection) or 2 (Backward Elimination)."
            )?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Informative features must name existing 1-based columns.
fn check_informative(informative: &[usize], num_features: usize) -> Result<(), String> {
    match informative.iter().find(|&&f| f == 0 || f > num_features) {
        Some(f) => Err(format!(
            "informative feature {f} is out of range; expected 1..={num_features}"
        )),
        None => Ok(()),
    }
}

fn apply_overrides(config: &mut SelectionConfig, cli: &Cli) {
    if let Some(normalization) = cli.normalization {
        config.normalization = normalization;
    }
    if let Some(skip) = cli.skip_leading {
        config.skip_leading_features = skip;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.parallel |= cli.parallel;
    config.cache |= cli.cache;
}

/// Without a data file the user picks the feature count and the search runs on
/// a seeded synthetic dataset.
fn generated_dataset(cli: &Cli, config: &SelectionConfig) -> anyhow::Result<Vec<Instance>> {
    let num_features = match cli.features {
        Some(n) => n,
        None => Input::<usize>::new()
            .with_prompt("Enter the total number of features")
            .interact_text()?,
    };
    let spec = SyntheticSpec::new(config.synthetic_instances, num_features, config.seed);
    tracing::info!(?spec, "No dataset given; generating one");
    Ok(synthetic::generate(&spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_choice_prints_message_and_skips_search() {
        let mut out = Vec::new();
        let algorithm = resolve_algorithm("3", &mut out).unwrap();
        assert_eq!(algorithm, None);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Invalid choice \"3\"!"), "got {text:?}");
    }

    #[test]
    fn test_valid_choices_write_nothing() {
        let mut out = Vec::new();
        assert_eq!(resolve_algorithm("1", &mut out).unwrap(), Some(Algorithm::ForwardSelection));
        assert_eq!(resolve_algorithm(" backward\n", &mut out).unwrap(), Some(Algorithm::BackwardElimination));
        assert!(out.is_empty());
    }

    #[test]
    fn test_informative_features_must_exist() {
        assert!(check_informative(&[], 3).is_ok());
        assert!(check_informative(&[1, 3], 3).is_ok());
        assert!(check_informative(&[0], 3).unwrap_err().contains("feature 0"));
        assert!(check_informative(&[2, 4], 3).unwrap_err().contains("feature 4"));
    }

    #[test]
    fn test_generate_subcommand_parses_informative_list() {
        let cli = Cli::try_parse_from(["featsel", "generate", "out.txt", "-n", "5", "--informative", "2,4"]).unwrap();
        match cli.command {
            Some(Commands::Generate { features, informative, .. }) => {
                assert_eq!(features, 5);
                assert_eq!(informative, vec![2, 4]);
            }
            other => panic!("expected generate, got {other:?}"),
        }
    }
}
