use std::fs::File;
use std::io;
use std::path::Path;

use rust_decimal::RoundingStrategy;

use crate::decimal::Money;
use crate::errors::Result;
use crate::schedule::LoanSchedules;

/// Write one row per term: payment, interest and resulting balance for each loan.
pub fn write_csv<W: io::Write>(schedules: &LoanSchedules, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    // loan name spans its three value columns
    let mut header = vec!["Term".to_string()];
    for loan in &schedules.loans {
        header.push(loan.name().to_string());
        header.push(String::new());
        header.push(String::new());
    }
    wtr.write_record(&header)?;

    for term_schedule in &schedules.term_schedules {
        let mut row = Vec::with_capacity(1 + term_schedule.items.len() * 3);
        row.push(format!("Term: {}", term_schedule.term));
        for item in &term_schedule.items {
            row.push(two_places(item.payment.payment_amount));
            row.push(two_places(item.payment.interest_amount));
            row.push(two_places(item.balance));
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file<P: AsRef<Path>>(schedules: &LoanSchedules, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_csv(schedules, io::BufWriter::new(file))
}

fn two_places(amount: Money) -> String {
    let rounded = amount
        .as_decimal()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
