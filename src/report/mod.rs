//! rendering collaborators for finished schedules

pub mod csv_out;
pub mod json;

pub use csv_out::{write_csv, write_csv_file};
pub use json::{to_json_pretty, write_json};
