//! Wellness triage engine: constitutional and risk scoring behind a confirmation gate that
//! keeps medicine recommendations locked until enough evidence is on file.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

pub use error::AppError;
