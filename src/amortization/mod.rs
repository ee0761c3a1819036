//! Fixed-rate payment calculation and amortization schedule generation.

pub mod generator;
pub mod payment;
