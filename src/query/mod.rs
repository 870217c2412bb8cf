//! Query parsing and processing.

pub mod parser;
mod processor;

pub use parser::{ParsedQuery, QueryParser};
pub use processor::{QueryOutcome, QueryProcessor};
