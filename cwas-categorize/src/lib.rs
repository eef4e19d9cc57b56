//! Core module for CWAS variant categorization
//! Alejandro Gonzales-Irribarren, 2025
//!
//! This crate assigns every annotated variant to all the categories it
//! belongs to and counts them across a cohort. A category picks one
//! term from each of five annotation domains (variant type, gene list,
//! conservation, GENCODE region and custom region), so a single variant
//! usually lands in dozens of categories at once.
//!
//! Per variant, five classifiers encode the terms it carries as one
//! bitmask per domain. The combinator walks the Cartesian product of the
//! set bits, drops every combination holding a redundant term pair, and
//! hands the rest to an aggregator: plain counts (optionally per sample)
//! or a category-by-category co-occurrence matrix. Rows are processed in
//! parallel, each worker folding into its own partial aggregate before a
//! key-wise merge.

use anyhow::Result;
use config::ArgCheck;
use std::path::PathBuf;

pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod combine;
pub mod core;
pub mod domain;
pub mod utils;

pub use aggregate::{Accumulate, CategoryCounts, CooccurrenceCounts, SampleCounts};
pub use classify::{AnnotationInts, Categorizer};
pub use combine::{CategoryKey, Combinator};
pub use crate::core::{categorize, Categorization, Mode};
pub use domain::{Domain, DomainConfig, DomainError, DomainRegistry};

pub fn lib_cwas_categorize(args: Vec<String>) -> Result<PathBuf> {
    let args = cli::Args::from(args)?;
    args.check()?;

    crate::core::run(args)
}
