//! loan-engine CLI
//!
//! Amortize a fixed-rate loan and re-express it in another currency.
//!
//! # Usage
//!
//! ```bash
//! # Payment and schedule in the loan's own currency
//! loan-engine calculate --principal 250000 --rate 5 --years 30
//!
//! # Same loan read from a file, as JSON
//! loan-engine calculate --input loan.json --format json
//!
//! # Convert a EUR loan to INR using saved rates
//! loan-engine convert --input loan.json --currency EUR --rates rates.json --to INR
//!
//! # How the INR cost moves if the rate shifts
//! loan-engine shock --input loan.json --currency EUR --rates rates.json --to INR
//! ```

use loan_engine::amortization::generator::{amortize, AmortizedLoan};
use loan_engine::conversion::provider::StaticRateTable;
use loan_engine::conversion::rescale::ConvertedLoan;
use loan_engine::conversion::session::{LoanSession, SessionError};
use loan_engine::core::currency::{CurrencyCode, FxError};
use loan_engine::core::loan::LoanTerms;
use loan_engine::core::schedule::Schedule;
use loan_engine::simulation::fx_shock::{run_fx_shocks, FxShockConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"loan-engine — fixed-rate loan amortization with currency conversion

USAGE:
    loan-engine <COMMAND> [OPTIONS]

COMMANDS:
    calculate   Compute the monthly payment and amortization schedule
    convert     Compute the loan, then re-express it in another currency
    shock       Show the converted cost under shocked exchange rates
    help        Show this message

LOAN OPTIONS (all commands):
    --input <FILE>        JSON loan terms file
    --principal <AMOUNT>  Loan amount (instead of --input)
    --rate <PERCENT>      Annual interest rate in percent
    --years <N>           Loan term in years
    --currency <CODE>     Currency the loan is in (default: USD)
    --rates <FILE>        JSON exchange-rate file (required for convert, shock)

OUTPUT OPTIONS:
    --to <CODE>           Target currency (convert, shock)
    --format <FORMAT>     Output format: text (default) or json
    --rows <N>            Show only the first N schedule rows (text output)
    --shocks <LIST>       Comma-separated relative rate moves (shock),
                          e.g. -0.1,0.1

EXAMPLES:
    loan-engine calculate --principal 250000 --rate 5 --years 30
    loan-engine calculate --input loan.json --format json
    loan-engine convert --input loan.json --currency EUR --rates rates.json --to GBP
    loan-engine shock --input loan.json --rates rates.json --to INR --shocks -0.2,0.2"#
    );
}

/// JSON schema for input loan terms.
#[derive(serde::Deserialize)]
struct LoanFile {
    #[serde(flatten)]
    terms: LoanTerms,
    #[serde(default)]
    currency: Option<String>,
}

/// JSON output schema for a computed loan.
#[derive(serde::Serialize)]
struct LoanOutput<'a> {
    currency: String,
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
    monthly_payment: f64,
    total_interest: f64,
    total_paid: f64,
    schedule: &'a Schedule,
}

#[derive(serde::Serialize)]
struct ConversionOutput<'a> {
    original: LoanOutput<'a>,
    currency: String,
    rate_ratio: f64,
    principal: f64,
    monthly_payment: f64,
    total_interest: f64,
    total_paid: f64,
    schedule: &'a Schedule,
}

#[derive(Default)]
struct Options {
    input: Option<String>,
    principal: Option<f64>,
    rate: Option<f64>,
    years: Option<u32>,
    currency: Option<String>,
    rates: Option<String>,
    to: Option<String>,
    format: Option<String>,
    rows: Option<usize>,
    shocks: Option<Vec<f64>>,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn value<'a>(args: &'a [String], i: usize, flag: &str, what: &str) -> &'a str {
    args.get(i)
        .map(String::as_str)
        .unwrap_or_else(|| fail(format!("{} requires {}", flag, what)))
}

fn number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = value(args, i, flag, "a number");
    raw.parse()
        .unwrap_or_else(|_| fail(format!("{} requires a number, got '{}'", flag, raw)))
}

fn parse_options(args: &[String]) -> Options {
    let mut opts = Options::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        match flag {
            "--input" => opts.input = Some(value(args, i, flag, "a file path").to_string()),
            "--principal" => opts.principal = Some(number(args, i, flag)),
            "--rate" => opts.rate = Some(number(args, i, flag)),
            "--years" => opts.years = Some(number(args, i, flag)),
            "--currency" => opts.currency = Some(value(args, i, flag, "a code").to_string()),
            "--rates" => opts.rates = Some(value(args, i, flag, "a file path").to_string()),
            "--to" => opts.to = Some(value(args, i, flag, "a code").to_string()),
            "--format" => {
                opts.format = Some(value(args, i, flag, "'text' or 'json'").to_string())
            }
            "--rows" => opts.rows = Some(number(args, i, flag)),
            "--shocks" => {
                let list = value(args, i, flag, "a comma-separated list");
                let shocks = list
                    .split(',')
                    .map(|s| {
                        s.trim().parse::<f64>().unwrap_or_else(|_| {
                            fail(format!("invalid shock '{}' in --shocks", s.trim()))
                        })
                    })
                    .collect();
                opts.shocks = Some(shocks);
            }
            _ => fail(format!("Unknown option: {}", flag)),
        }
        i += 1;
    }
    opts
}

impl Options {
    fn is_json(&self) -> bool {
        match self.format.as_deref() {
            None | Some("text") => false,
            Some("json") => true,
            Some(other) => fail(format!("unknown format '{}': use 'text' or 'json'", other)),
        }
    }

    /// Loan terms and currency, from `--input` or the individual flags.
    fn loan(&self) -> Result<(LoanTerms, CurrencyCode), SessionError> {
        let (terms, file_currency) = match &self.input {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));
                let file: LoanFile = serde_json::from_str(&content).unwrap_or_else(|e| {
                    eprintln!("Error parsing loan file: {}", e);
                    eprintln!("Expected format:");
                    eprintln!(
                        r#"{{ "principal": 250000, "annual_rate_percent": 5.0, "term_years": 30, "currency": "USD" }}"#
                    );
                    process::exit(1);
                });
                (file.terms, file.currency)
            }
            None => {
                let principal = self
                    .principal
                    .unwrap_or_else(|| fail("--principal or --input is required"));
                let rate = self.rate.unwrap_or_else(|| fail("--rate is required"));
                let years = self.years.unwrap_or_else(|| fail("--years is required"));
                (LoanTerms::new(principal, rate, years)?, None)
            }
        };
        let currency = self
            .currency
            .as_deref()
            .or(file_currency.as_deref())
            .unwrap_or("USD");
        Ok((terms, CurrencyCode::new(currency)))
    }

    fn rate_table(&self) -> Option<StaticRateTable> {
        let path = self.rates.as_ref()?;
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));
        Some(StaticRateTable::from_json_str(&content).unwrap_or_else(|e| fail(e)))
    }

    fn target(&self) -> CurrencyCode {
        let code = self
            .to
            .as_deref()
            .unwrap_or_else(|| fail("--to <CODE> is required"));
        CurrencyCode::new(code)
    }
}

/// One message per failure kind; no schedule is printed after an error.
fn report(error: SessionError) -> ! {
    match error {
        SessionError::Fx(FxError::RateUnavailable { currency }) => {
            fail(format!("could not retrieve exchange rate for {}", currency))
        }
        SessionError::Fx(FxError::MissingOriginRate) => {
            fail("initial exchange rate not found; calculate the loan first")
        }
        other => fail(other),
    }
}

fn loan_output<'a>(loan: &'a AmortizedLoan, currency: &CurrencyCode) -> LoanOutput<'a> {
    LoanOutput {
        currency: currency.to_string(),
        principal: loan.terms().principal(),
        annual_rate_percent: loan.terms().annual_rate_percent(),
        term_years: loan.terms().term_years(),
        monthly_payment: loan.payment(),
        total_interest: loan.schedule().total_interest(),
        total_paid: loan.schedule().total_paid(),
        schedule: loan.schedule(),
    }
}

fn print_json<T: serde::Serialize>(output: &T) {
    let json = serde_json::to_string_pretty(output)
        .unwrap_or_else(|e| fail(format!("serializing output: {}", e)));
    println!("{}", json);
}

fn print_schedule(schedule: &Schedule, currency: &CurrencyCode, rows: Option<usize>) {
    println!("Amortization Schedule in {}:", currency);
    match rows {
        Some(n) if n < schedule.len() => {
            let head: Schedule = schedule.iter().take(n).copied().collect();
            print!("{}", head);
            println!("  ... {} more rows", schedule.len() - n);
        }
        _ => print!("{}", schedule),
    }

    println!("\nRemaining Balance by Year ({}):", currency);
    for (period, balance) in schedule.balance_series() {
        if period % 12 == 0 || period as usize == schedule.len() {
            println!("  {:>6} {:>18.2}", period, balance);
        }
    }
}

fn cmd_calculate(args: &[String]) {
    let opts = parse_options(args);
    let json = opts.is_json();
    let (terms, currency) = opts.loan().unwrap_or_else(|e| report(e));

    // Without a rate file the loan is computed in its own currency with no lookup.
    let loan = match opts.rate_table() {
        Some(rates) => {
            let mut session = LoanSession::new();
            session
                .calculate(terms, currency.clone(), &rates)
                .unwrap_or_else(|e| report(e))
                .loan
        }
        None => amortize(&terms),
    };

    if json {
        print_json(&loan_output(&loan, &currency));
    } else {
        println!("Results in {}", currency);
        println!("{}", loan);
        print_schedule(loan.schedule(), &currency, opts.rows);
    }
}

fn cmd_convert(args: &[String]) {
    let opts = parse_options(args);
    let json = opts.is_json();
    let (terms, currency) = opts.loan().unwrap_or_else(|e| report(e));
    let target = opts.target();
    let rates = opts
        .rate_table()
        .unwrap_or_else(|| fail("--rates <FILE> is required"));

    let mut session = LoanSession::new();
    let computed = session
        .calculate(terms, currency.clone(), &rates)
        .unwrap_or_else(|e| report(e));
    let converted: ConvertedLoan = session
        .convert(&target, &rates)
        .unwrap_or_else(|e| report(e));

    if json {
        print_json(&ConversionOutput {
            original: loan_output(&computed.loan, &currency),
            currency: target.to_string(),
            rate_ratio: converted.ratio().value(),
            principal: converted.principal(),
            monthly_payment: converted.payment(),
            total_interest: converted.schedule().total_interest(),
            total_paid: converted.schedule().total_paid(),
            schedule: converted.schedule(),
        });
    } else {
        println!("Results in {}", currency);
        println!("{}", computed.loan);
        println!("{}", converted);
        print_schedule(converted.schedule(), &target, opts.rows);
    }
}

fn cmd_shock(args: &[String]) {
    let opts = parse_options(args);
    let json = opts.is_json();
    let (terms, currency) = opts.loan().unwrap_or_else(|e| report(e));
    let target = opts.target();
    let rates = opts
        .rate_table()
        .unwrap_or_else(|| fail("--rates <FILE> is required"));
    let config = opts
        .shocks
        .clone()
        .map(|shocks| FxShockConfig { shocks })
        .unwrap_or_default();

    let mut session = LoanSession::new();
    let computed = session
        .calculate(terms, currency, &rates)
        .unwrap_or_else(|e| report(e));
    session
        .convert(&target, &rates)
        .unwrap_or_else(|e| report(e));
    let target_rate = session
        .state()
        .target_rate()
        .cloned()
        .unwrap_or_else(|| report(FxError::MissingOriginRate.into()));

    let results = run_fx_shocks(&computed.loan, &computed.origin_rate, &target_rate, &config)
        .unwrap_or_else(|e| report(e.into()));

    if json {
        print_json(&results);
    } else {
        println!("=== FX Shocks: {} -> {} ===", computed.currency, target);
        for result in &results {
            println!("{}", result);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "calculate" => cmd_calculate(rest),
        "convert" => cmd_convert(rest),
        "shock" => cmd_shock(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
