//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads scraped listings (or generates a synthetic sample)
//! - runs one evaluation session
//! - prints the report

use clap::Parser;

use crate::cli::{Command, DemoArgs, EvaluateArgs, OfferArgs, RankArgs, TuningArgs};
use crate::data::{SampleConfig, generate_sample};
use crate::domain::{EvalConfig, MonotoneGuard, OfferQuery};
use crate::error::AppError;
use crate::io::read_listings_json;
use crate::report::format_session;

pub mod pipeline;

/// Entry point for the `carval` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Evaluate(args) => handle_evaluate(args),
        Command::Rank(args) => handle_rank(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn handle_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.tuning);
    let query = query_from_args(&args.offer);
    let raw = read_listings_json(&args.listings)?;

    let session = pipeline::run_session(&raw, &query, &config)?;
    println!("{}", format_session(&session, Some(&query)));
    Ok(())
}

fn handle_rank(args: RankArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.tuning);
    let raw = read_listings_json(&args.listings)?;

    let session = pipeline::run_ranking(&raw, &config)?;
    println!("{}", crate::report::format_offers(&session.offers));
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.tuning);
    let query = query_from_args(&args.offer);
    let sample = SampleConfig {
        count: args.count,
        seed: args.sample_seed,
        ..SampleConfig::default()
    };
    let raw = generate_sample(&sample)?;

    let session = pipeline::run_session(&raw, &query, &config)?;
    println!("{}", format_session(&session, Some(&query)));
    Ok(())
}

pub fn config_from_args(args: &TuningArgs) -> EvalConfig {
    EvalConfig {
        validation_split: args.split,
        min_dataset: args.min_dataset,
        knots: args.knots,
        degree: args.degree,
        top_n: args.top,
        seed: args.seed,
        outlier_iqr_k: if args.no_outlier_filter { None } else { Some(args.outlier_k) },
        monotone: if args.no_monotone {
            MonotoneGuard::Off
        } else {
            MonotoneGuard::Prefer
        },
    }
}

fn query_from_args(args: &OfferArgs) -> OfferQuery {
    OfferQuery {
        brand: args.brand.trim().to_lowercase(),
        mileage: args.mileage,
        price: args.price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    #[test]
    fn default_flags_match_default_config() {
        let cli = Cli::parse_from(["carval", "rank", "--listings", "x.json"]);
        let Command::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert_eq!(config_from_args(&args.tuning), EvalConfig::default());
    }

    #[test]
    fn flags_disable_filter_and_guard() {
        let cli = Cli::parse_from([
            "carval", "demo", "--mileage", "1", "--price", "2", "--no-outlier-filter", "--no-monotone",
        ]);
        let Command::Demo(args) = cli.command else {
            panic!("expected demo");
        };
        let config = config_from_args(&args.tuning);
        assert_eq!(config.outlier_iqr_k, None);
        assert_eq!(config.monotone, MonotoneGuard::Off);
    }
}
