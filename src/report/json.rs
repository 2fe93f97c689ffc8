use std::io;

use crate::errors::Result;
use crate::schedule::LoanSchedules;

/// convert to pretty-printed json string
pub fn to_json_pretty(schedules: &LoanSchedules) -> Result<String> {
    Ok(serde_json::to_string_pretty(schedules)?)
}

pub fn write_json<W: io::Write>(schedules: &LoanSchedules, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, schedules)?;
    Ok(())
}
