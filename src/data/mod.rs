//! Data fetching
//!
//! Handles:
//! - Blocking HTTP transport with a fixed timeout
//! - CSV quote download for the underlying close
//! - JSON options chain download and flattening

pub mod http;
pub mod price;
pub mod chain;

pub use http::*;
pub use price::*;
pub use chain::*;
