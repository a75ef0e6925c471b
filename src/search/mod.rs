//! Laptop search: the filter predicate and the store scanner

pub mod filter;
pub mod scanner;

pub use filter::matches;
pub use scanner::{search, Scan, ScanError};
