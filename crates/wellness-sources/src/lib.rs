//! Source adapters for the wellness digest.
//!
//! Each adapter wraps one external data source (Google Trends, X recent
//! search, Reddit hot listings, a chain of paper-search APIs) behind the same
//! contract: an instruction string carrying two ISO dates goes in, at most five
//! newline-separated plain-text findings come out. Adapters never fail; any
//! error is logged and replaced by the adapter's fallback text.

pub mod error;
pub mod fallback;
pub mod input;
pub mod types;

mod client;
mod collect;
mod papers;
mod reddit;
mod social;
mod trends;

pub use client::WellnessSources;
pub use error::SourceError;
pub use types::{SourceEndpoints, SourceKind, SourceOutputs, SourcesConfig};

/// Maximum number of findings any adapter returns.
pub const MAX_RESULTS: usize = 5;
