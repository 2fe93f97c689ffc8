/// snowball - three loans paid down together, report written to output.csv
use debt_snowball_rs::report::write_csv_file;
use debt_snowball_rs::{CalculatorConfig, LoanTerms, Money, Rate, ScheduleCalculator};
use log::info;
use rust_decimal_macros::dec;
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let loans = vec![
        LoanTerms::new(
            "Loan 1",
            Rate::from_decimal(dec!(0.1865)),
            Money::from_decimal(dec!(9700.00)),
            Money::from_decimal(dec!(450.00)),
        ),
        LoanTerms::new(
            "Loan 2",
            Rate::from_decimal(dec!(0.0659)),
            Money::from_decimal(dec!(16726.00)),
            Money::from_decimal(dec!(279.00)),
        ),
        LoanTerms::new(
            "Loan 3",
            Rate::from_decimal(dec!(0.0399)),
            Money::from_decimal(dec!(18174.69)),
            Money::from_decimal(dec!(400.00)),
        ),
    ];

    let schedules = ScheduleCalculator::new(CalculatorConfig::reference()).calculate(&loans)?;
    write_csv_file(&schedules, "output.csv")?;

    for summary in schedules.summaries() {
        info!(
            "{}: paid off in term {}, total paid {}, interest {}",
            summary.name,
            summary.payoff_term.map_or_else(|| "-".to_string(), |t| t.to_string()),
            summary.total_paid.round_dp(2),
            summary.total_interest.round_dp(2)
        );
    }
    info!("wrote {} terms to output.csv", schedules.term_count());

    Ok(())
}
