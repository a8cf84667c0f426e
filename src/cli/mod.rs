//! Command-line parsing for the offer evaluator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/evaluation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::KnotPolicy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "carval", version, about = "Used-car offer evaluator (price vs. mileage spline)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate an offer against scraped listings and list the best deals.
    Evaluate(EvaluateArgs),
    /// Print the most underpriced listings only (useful for scripting).
    Rank(RankArgs),
    /// Evaluate an offer against a synthetic sample of listings.
    Demo(DemoArgs),
}

/// The offer being asked about.
#[derive(Debug, Args, Clone)]
pub struct OfferArgs {
    /// Mileage of the offered car (km).
    #[arg(long)]
    pub mileage: f64,

    /// Asked price (CHF).
    #[arg(long)]
    pub price: f64,

    /// Brand label for the report (filtering happens in the scraper).
    #[arg(long, default_value = "")]
    pub brand: String,
}

/// Model and session tunables shared by every command.
#[derive(Debug, Args, Clone)]
pub struct TuningArgs {
    /// Fraction of listings held out to estimate the MAE.
    #[arg(long, default_value_t = 0.2)]
    pub split: f64,

    /// Minimum number of cleaned listings required to fit.
    #[arg(long, default_value_t = 5)]
    pub min_dataset: usize,

    /// Spline knot count (boundaries included), or `auto`.
    #[arg(long, default_value_t = KnotPolicy::Auto)]
    pub knots: KnotPolicy,

    /// Spline degree.
    #[arg(long, default_value_t = 3)]
    pub degree: usize,

    /// Number of lucrative offers to show.
    #[arg(long, default_value_t = 3)]
    pub top: usize,

    /// Seed for the train/validation split.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// IQR multiplier for outlier trimming.
    #[arg(long, default_value_t = 1.5)]
    pub outlier_k: f64,

    /// Disable outlier trimming.
    #[arg(long)]
    pub no_outlier_filter: bool,

    /// Do not prefer a non-increasing price curve.
    #[arg(long)]
    pub no_monotone: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct EvaluateArgs {
    /// Scraped listings (JSON array of {title, price, mileage}).
    #[arg(long, value_name = "JSON")]
    pub listings: PathBuf,

    #[command(flatten)]
    pub offer: OfferArgs,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct RankArgs {
    /// Scraped listings (JSON array of {title, price, mileage}).
    #[arg(long, value_name = "JSON")]
    pub listings: PathBuf,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Number of synthetic listings to generate.
    #[arg(short = 'n', long, default_value_t = 120)]
    pub count: usize,

    /// Seed for sample generation.
    #[arg(long, default_value_t = 42)]
    pub sample_seed: u64,

    #[command(flatten)]
    pub offer: OfferArgs,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_evaluate_with_defaults() {
        let cli = Cli::parse_from([
            "carval", "evaluate", "--listings", "cars.json", "--mileage", "80000", "--price", "21500",
        ]);
        let Command::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(args.listings, PathBuf::from("cars.json"));
        assert_eq!(args.offer.mileage, 80000.0);
        assert_eq!(args.tuning.knots, KnotPolicy::Auto);
        assert_eq!(args.tuning.top, 3);
        assert_eq!(args.tuning.min_dataset, 5);
    }

    #[test]
    fn parses_fixed_knots() {
        let cli = Cli::parse_from(["carval", "rank", "--listings", "x.json", "--knots", "4", "--no-outlier-filter"]);
        let Command::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert_eq!(args.tuning.knots, KnotPolicy::Fixed(4));
        assert!(args.tuning.no_outlier_filter);
    }
}
