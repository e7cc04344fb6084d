//! Explainable matching of clinical trials to a patient profile.

pub mod config;
pub mod domain;
pub mod error;
pub mod explainability;
pub mod import;
pub mod matching;
pub mod invocation;
pub mod telemetry;
