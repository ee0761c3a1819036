//! Random loan books for benchmarking and FX shock scenarios.

pub mod fx_shock;
pub mod stress_test;
