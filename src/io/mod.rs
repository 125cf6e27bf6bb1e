//! File output for computed results.

pub mod export;
