use crate::core::loan::LoanTerms;

/// Fixed monthly payment that fully repays `terms` over its term.
///
/// Uses the annuity formula in its discount form `P·r / (1 − (1+r)^−n)`
/// with the monthly rate `r` and `n` monthly periods. The discount factor
/// underflows towards zero instead of overflowing, so very high rates over
/// long terms converge on `P·r` rather than `inf / inf`. A zero rate falls
/// back to `P / n`, the limit of the formula as `r → 0`. No rounding is
/// applied.
///
/// # Examples
///
/// ```
/// use loan_engine::amortization::payment::compute_monthly_payment;
/// use loan_engine::core::loan::LoanTerms;
///
/// let terms = LoanTerms::new(100_000.0, 0.0, 10).unwrap();
/// assert_eq!(compute_monthly_payment(&terms), 100_000.0 / 120.0);
/// ```
pub fn compute_monthly_payment(terms: &LoanTerms) -> f64 {
    let principal = terms.principal();
    let r = terms.periodic_rate();
    let n = terms.period_count();

    if r > 0.0 {
        // period_count() <= MAX_TERM_YEARS * 12, well inside i32.
        let discount = (1.0 + r).powi(-(n as i32));
        principal * r / (1.0 - discount)
    } else {
        principal / n as f64
    }
}
