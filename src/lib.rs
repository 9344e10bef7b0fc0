#![doc = include_str!("../README.md")]
use std::path::Path;

mod amount;
mod error;
mod records;
mod roster;
mod summary;
mod tally;

pub use amount::{Amount, ParseAmountError};
pub use error::Error;
pub use records::{check_sequence, discover, Mode, Record, RecordFile};
pub use roster::{Entry, Roster, RosterKind};
pub use summary::{read_summary, write_summary, write_summary_file, SummaryRow};
pub use tally::Tally;

/// Totals every record file in `dir` and writes the summary files there.
///
/// Stages run in order, and the first failure stops the run:
/// 1. Load `branch.lst` (and `commodity.lst` for
///    [`Mode::BranchesAndCommodities`])
/// 2. Find the record files, and check their numbering has no gaps
/// 3. Add each record file to the totals, in name order
/// 4. Write `branch.out` (and `commodity.out`)
///
/// Returns the final totals.
///
/// # Errors
///
/// Returns the first [`Error`] met at any stage.
pub fn run(dir: impl AsRef<Path>, mode: Mode) -> Result<Tally, Error> {
    let dir = dir.as_ref();
    let mut tally = Tally::load(dir, mode)?;
    let files = discover(dir)?;
    check_sequence(&files)?;
    tally.read_records(&files)?;
    write_summary_file(dir, tally.branches())?;
    if let Some(commodities) = tally.commodities() {
        write_summary_file(dir, commodities)?;
    }
    Ok(tally)
}
