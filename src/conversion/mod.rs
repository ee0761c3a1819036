//! Re-expressing computed loans in other currencies.
//!
//! - **rescale** — linear rescaling by a ratio of two spot rates
//! - **provider** — the rate-lookup seam and an in-memory rate table
//! - **session** — caller-owned state tying a computed loan to its origin rate

pub mod provider;
pub mod rescale;
pub mod session;
