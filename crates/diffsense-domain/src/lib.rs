//! Diffsense Domain - Shared data model for the review pipeline
//!
//! This crate defines the types every other diffsense crate speaks:
//! change units produced by the diff parser, findings produced by the
//! analyzers, and the supported-language table. It has no I/O and no
//! dependencies beyond serialization.

pub mod languages;
pub mod models;

pub use languages::Language;
pub use models::{
    ChangeUnit, Finding, ReviewCategory, ReviewOutcome, Severity, SeverityBreakdown,
};
