//! Foundational types: currencies and exchange rates, loan terms, schedules.

pub mod currency;
pub mod loan;
pub mod schedule;
