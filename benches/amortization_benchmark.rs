use criterion::{black_box, criterion_group, criterion_main, Criterion};
use loan_engine::amortization::generator::amortize;
use loan_engine::conversion::rescale::rescale_schedule;
use loan_engine::core::currency::{CurrencyCode, ExchangeRate, RateRatio};
use loan_engine::core::loan::LoanTerms;
use loan_engine::simulation::stress_test::{generate_random_loan_book, LoanBookConfig};

fn bench_single_mortgage(c: &mut Criterion) {
    let terms = LoanTerms::new(250_000.0, 5.0, 30).expect("valid terms");

    c.bench_function("amortize_30_year", |b| b.iter(|| amortize(black_box(&terms))));
}

fn bench_loan_book(c: &mut Criterion) {
    let config = LoanBookConfig {
        loan_count: 1_000,
        ..Default::default()
    };
    let book = generate_random_loan_book(&config).expect("valid loan book");

    c.bench_function("amortize_1000_loans", |b| {
        b.iter(|| {
            for terms in black_box(&book) {
                black_box(amortize(terms));
            }
        })
    });
}

fn bench_rescale(c: &mut Criterion) {
    let loan = amortize(&LoanTerms::new(250_000.0, 5.0, 30).expect("valid terms"));
    let usd = ExchangeRate::new(CurrencyCode::new("USD"), 1.0).expect("valid rate");
    let inr = ExchangeRate::new(CurrencyCode::new("INR"), 83.12).expect("valid rate");
    let ratio = RateRatio::between(&usd, &inr);

    c.bench_function("rescale_360_rows", |b| {
        b.iter(|| rescale_schedule(black_box(loan.schedule()), black_box(&ratio)))
    });
}

criterion_group!(benches, bench_single_mortgage, bench_loan_book, bench_rescale);
criterion_main!(benches);
