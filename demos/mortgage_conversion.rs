//! Mortgage amortization and currency conversion example.
//!
//! Computes a 30-year EUR mortgage, then re-expresses it in GBP and INR
//! from one set of spot rates without recomputing the schedule.

use loan_engine::conversion::provider::StaticRateTable;
use loan_engine::conversion::session::LoanSession;
use loan_engine::core::currency::CurrencyCode;
use loan_engine::core::loan::LoanTerms;
use loan_engine::simulation::fx_shock::{run_fx_shocks, FxShockConfig};

fn main() {
    println!("╔════════════════════════════════════════════════╗");
    println!("║  loan-engine: Mortgage Conversion Example      ║");
    println!("╚════════════════════════════════════════════════╝\n");

    let rates = StaticRateTable::from_json_str(
        r#"{"base_code": "USD", "conversion_rates": {"EUR": 0.92, "GBP": 0.79, "INR": 83.12}}"#,
    )
    .expect("valid rate payload");

    let terms = LoanTerms::new(250_000.0, 5.0, 30).expect("valid terms");
    let eur = CurrencyCode::new("EUR");

    // --- Scenario 1: Loan in its own currency ---
    println!("━━━ Scenario 1: 30-year mortgage in EUR ━━━\n");

    let mut session = LoanSession::new();
    let computed = session
        .calculate(terms, eur.clone(), &rates)
        .expect("EUR is quoted");
    println!("{}", computed.loan);

    println!("First year:");
    for record in computed.loan.schedule().iter().take(12) {
        println!(
            "  {:>3}  principal {:>10.2}  interest {:>10.2}  balance {:>12.2}",
            record.period, record.principal, record.interest, record.remaining_balance
        );
    }
    println!();

    // --- Scenario 2: Re-express in other currencies ---
    println!("━━━ Scenario 2: Converted views ━━━\n");

    for target in ["GBP", "INR"] {
        let converted = session
            .convert(&CurrencyCode::new(target), &rates)
            .expect("target is quoted");
        println!("{}", converted);
    }

    // --- Scenario 3: Rate sensitivity ---
    println!("━━━ Scenario 3: INR cost under FX shocks ━━━\n");

    let inr = session
        .state()
        .target_rate()
        .expect("converted above")
        .clone();
    let results = run_fx_shocks(
        &computed.loan,
        &computed.origin_rate,
        &inr,
        &FxShockConfig::default(),
    )
    .expect("shocks keep rates positive");
    for result in &results {
        println!("  {}", result);
    }
}
