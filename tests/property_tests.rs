use loan_engine::amortization::generator::{amortize, generate_schedule};
use loan_engine::amortization::payment::compute_monthly_payment;
use loan_engine::conversion::rescale::rescale_schedule;
use loan_engine::core::currency::{CurrencyCode, ExchangeRate, RateRatio};
use loan_engine::core::loan::LoanTerms;
use loan_engine::core::schedule::Schedule;
use proptest::prelude::*;

/// Generate realistic loan terms with a strictly positive rate.
fn arb_terms() -> impl Strategy<Value = LoanTerms> {
    (1_000.0f64..5_000_000.0, 0.01f64..25.0, 1u32..=40).prop_map(|(p, rate, years)| {
        LoanTerms::new(p, rate, years).expect("strategy only yields valid terms")
    })
}

/// Generate a positive exchange rate spanning several orders of magnitude.
fn arb_rate(code: &'static str) -> impl Strategy<Value = ExchangeRate> {
    (0.001f64..20_000.0).prop_map(move |r| {
        ExchangeRate::new(CurrencyCode::new(code), r).expect("positive rate")
    })
}

fn assert_schedules_close(a: &Schedule, b: &Schedule) -> Result<(), TestCaseError> {
    prop_assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        prop_assert_eq!(x.period, y.period);
        for (u, v) in [
            (x.principal, y.principal),
            (x.interest, y.interest),
            (x.remaining_balance, y.remaining_balance),
        ] {
            let scale = u.abs().max(v.abs()).max(1e-9);
            prop_assert!((u - v).abs() / scale < 1e-9, "{} vs {}", u, v);
        }
    }
    Ok(())
}

proptest! {
    // ===================================================================
    // INVARIANT 1: The computed payment fully amortizes the loan.
    // ===================================================================
    #[test]
    fn payment_fully_amortizes(terms in arb_terms()) {
        let loan = amortize(&terms);
        prop_assert_eq!(loan.schedule().len() as u32, terms.period_count());
        prop_assert!(
            loan.schedule().final_balance() <= terms.principal() * 1e-6,
            "final balance {} not ~0",
            loan.schedule().final_balance()
        );
    }

    // ===================================================================
    // INVARIANT 2: Zero-rate loans are straight-line.
    // ===================================================================
    #[test]
    fn zero_rate_is_straight_line(p in 0.0f64..5_000_000.0, years in 1u32..=40) {
        let terms = LoanTerms::new(p, 0.0, years).unwrap();
        let payment = compute_monthly_payment(&terms);
        prop_assert_eq!(payment, p / terms.period_count() as f64);

        let schedule = generate_schedule(&terms, payment);
        for record in &schedule {
            prop_assert_eq!(record.interest, 0.0);
            prop_assert_eq!(record.principal, payment);
        }
    }

    // ===================================================================
    // INVARIANT 3: Remaining balance never increases.
    // ===================================================================
    #[test]
    fn balance_non_increasing(terms in arb_terms()) {
        let loan = amortize(&terms);
        let records = loan.schedule().records();
        for pair in records.windows(2) {
            prop_assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
            prop_assert_eq!(pair[1].period, pair[0].period + 1);
        }
    }

    // ===================================================================
    // INVARIANT 4: Overpaying ends the schedule early at a zero balance.
    // ===================================================================
    #[test]
    fn overpayment_terminates_early(terms in arb_terms(), factor in 1.1f64..5.0) {
        let payment = compute_monthly_payment(&terms) * factor;
        let schedule = generate_schedule(&terms, payment);
        prop_assert!((schedule.len() as u32) < terms.period_count());
        prop_assert_eq!(schedule.final_balance(), 0.0);
    }

    // ===================================================================
    // INVARIANT 5: Rescaling by a unit ratio changes nothing.
    // ===================================================================
    #[test]
    fn identity_rescale(terms in arb_terms(), rate in arb_rate("EUR")) {
        let loan = amortize(&terms);
        let ratio = RateRatio::between(&rate, &rate);
        prop_assert_eq!(&rescale_schedule(loan.schedule(), &ratio), loan.schedule());
    }

    // ===================================================================
    // INVARIANT 6: Chained rescales compose.
    //
    // rescale(rescale(S, r1, r2), r2, r3) ≈ rescale(S, r1, r3)
    // ===================================================================
    #[test]
    fn rescale_composes(
        terms in arb_terms(),
        r1 in arb_rate("USD"),
        r2 in arb_rate("EUR"),
        r3 in arb_rate("INR"),
    ) {
        let loan = amortize(&terms);
        let chained = rescale_schedule(
            &rescale_schedule(loan.schedule(), &RateRatio::between(&r1, &r2)),
            &RateRatio::between(&r2, &r3),
        );
        let direct = rescale_schedule(loan.schedule(), &RateRatio::between(&r1, &r3));
        assert_schedules_close(&chained, &direct)?;
    }

    // ===================================================================
    // INVARIANT 7: Rescaling never touches the input.
    // ===================================================================
    #[test]
    fn rescale_is_pure(terms in arb_terms(), r1 in arb_rate("USD"), r2 in arb_rate("EUR")) {
        let loan = amortize(&terms);
        let before = loan.schedule().clone();
        let _ = rescale_schedule(loan.schedule(), &RateRatio::between(&r1, &r2));
        prop_assert_eq!(loan.schedule(), &before);
    }

    // ===================================================================
    // INVARIANT 8: Principal components sum to the principal.
    // ===================================================================
    #[test]
    fn principal_components_sum_to_principal(terms in arb_terms()) {
        let loan = amortize(&terms);
        let total = loan.schedule().total_principal();
        prop_assert!(
            (total - terms.principal()).abs() <= terms.principal() * 1e-6,
            "principal paid {} vs borrowed {}",
            total,
            terms.principal()
        );
    }
}
