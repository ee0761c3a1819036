use serde::{Deserialize, Serialize};

/// One row of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// 1-based payment number.
    pub period: u32,
    /// Portion of the payment that reduces the balance.
    pub principal: f64,
    /// Portion of the payment that pays interest accrued this period.
    pub interest: f64,
    /// Balance after the payment, never negative.
    pub remaining_balance: f64,
}

impl PaymentRecord {
    /// Total amount paid in this period.
    pub fn payment(&self) -> f64 {
        self.principal + self.interest
    }
}

/// An ordered amortization schedule.
///
/// Periods are strictly increasing from 1. A schedule is produced by
/// [`generate_schedule`](crate::amortization::generator::generate_schedule)
/// or by rescaling another schedule; it is never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    records: Vec<PaymentRecord>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: PaymentRecord) {
        debug_assert!(
            self.records
                .last()
                .map_or(record.period == 1, |last| record.period == last.period + 1),
            "schedule periods must be consecutive from 1"
        );
        self.records.push(record);
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaymentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&PaymentRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&PaymentRecord> {
        self.records.last()
    }

    /// Remaining balance after the last payment (0 for an empty schedule).
    pub fn final_balance(&self) -> f64 {
        self.last().map_or(0.0, |r| r.remaining_balance)
    }

    pub fn total_principal(&self) -> f64 {
        self.records.iter().map(|r| r.principal).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.records.iter().map(|r| r.interest).sum()
    }

    /// Sum of every payment made over the schedule.
    pub fn total_paid(&self) -> f64 {
        self.total_principal() + self.total_interest()
    }

    /// `(period, remaining balance)` pairs, the series a balance chart plots.
    pub fn balance_series(&self) -> Vec<(u32, f64)> {
        self.records
            .iter()
            .map(|r| (r.period, r.remaining_balance))
            .collect()
    }
}

impl FromIterator<PaymentRecord> for Schedule {
    fn from_iter<T: IntoIterator<Item = PaymentRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a PaymentRecord;
    type IntoIter = std::slice::Iter<'a, PaymentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:>6} {:>16} {:>16} {:>18}",
            "Period", "Principal", "Interest", "Remaining"
        )?;
        writeln!(f, "{}", "-".repeat(59))?;
        for r in &self.records {
            writeln!(
                f,
                "{:>6} {:>16.2} {:>16.2} {:>18.2}",
                r.period, r.principal, r.interest, r.remaining_balance
            )?;
        }
        Ok(())
    }
}
