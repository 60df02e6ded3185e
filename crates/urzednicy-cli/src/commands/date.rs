//! Date command implementation.

use crate::cli::DateArgs;
use crate::error::Result;
use crate::output::{DateRow, Formatter};
use urzednicy_domain::normalize;

/// Execute the date command.
pub fn execute_date(args: DateArgs, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_dates(&parse_dates(args.texts))?);
    Ok(())
}

fn parse_dates(texts: Vec<String>) -> Vec<DateRow> {
    texts
        .into_iter()
        .map(|text| {
            let parsed = normalize(&text);
            (text, parsed)
        })
        .collect()
}
