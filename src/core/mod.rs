//! Core data types
//!
//! Defines:
//! - Contract / OptionType: one flattened option quote
//! - Formatting: dense and sentence text records
//! - OptionsError: error taxonomy shared by every fetcher

pub mod option;
pub mod format;
pub mod error;

pub use option::*;
pub use format::*;
pub use error::*;
