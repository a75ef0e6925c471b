//! Data models for the laptop catalog

pub mod laptop;

// Re-export commonly used types
pub use laptop::{Filter, Laptop, Memory, MemoryUnit, Weight};
