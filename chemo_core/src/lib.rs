#![forbid(unsafe_code)]

//! Core calculation logic for the ChemoCalc tablet scheduler.
//!
//! This crate provides:
//! - Domain types (dose inputs, schedule modes, rounded and ordered schedules)
//! - Dose resolver (BSA-scaled dose to a whole-tablet high/low split)
//! - Schedule orderer (front-load, weekly front-load, alternating)
//! - Sig composer (one-line pharmacy instruction)
//! - Calendar, summary and RTF document rendering
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod resolver;
pub mod orderer;
pub mod sig;
pub mod engine;
pub mod calendar;
pub mod report;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use resolver::{resolve_dose, resolve_exact};
pub use orderer::order_schedule;
pub use sig::compose_sig;
pub use engine::calculate;
pub use calendar::render_calendar;
pub use export::{write_document, DocumentKind};
