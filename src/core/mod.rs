//! Core types: errors, the unit interchange format and batch filtering.

mod analyzer;
mod error;
mod unit_file;

pub use analyzer::{Analysis, Analyzer, Summary, UnitReport};
pub use error::{Error, Result};
pub use unit_file::UnitFile;
