#![forbid(unsafe_code)]

//! Core domain model and business logic for fitcoach.
//!
//! This crate provides:
//! - Domain types (catalog entries, generated plans, user profiles)
//! - Built-in exercise, yoga and meditation catalogs
//! - Name normalization, similarity scoring and catalog matching
//! - Plan enrichment (attaching catalog media to generated plan items)
//! - Derived profile metrics (BMI, daily calorie target)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod normalize;
pub mod similarity;
pub mod matcher;
pub mod enrich;
pub mod metrics;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{default_catalog, CatalogQuery, Catalogs};
pub use config::Config;
pub use normalize::normalize;
pub use similarity::ScoringStrategy;
pub use matcher::{best_match, find_best_match, CatalogMatcher, Match, MatchPolicy};
pub use enrich::{attach_media, attach_media_with, EnrichOptions, EnrichReport};
pub use metrics::{compute_bmi, compute_daily_calories, derive_metrics, BmiResult};
