use log::debug;
use serde::{Deserialize, Serialize};

use std::{fs::File, io::Write, path::Path};

use crate::{amount::Amount, error::Error, roster::Roster};

/// One line of a summary file: `CODE,NAME,TOTAL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub code: String,
    pub name: String,
    pub total: Amount,
}

/// Writes one row per entry of `roster` to `writer`, in roster order.
///
/// Every line, including the last, ends in `\n`. Fields are never quoted.
///
/// # Errors
///
/// Returns any errors from writing.
pub fn write_summary<W: Write>(writer: W, roster: &Roster) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    for entry in roster.entries() {
        wtr.serialize(SummaryRow {
            code: entry.code.clone(),
            name: entry.name.clone(),
            total: entry.total,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the summary file for `roster` into the directory `dir`.
///
/// # Errors
///
/// Returns any errors from creating or writing the file.
pub fn write_summary_file(dir: impl AsRef<Path>, roster: &Roster) -> Result<(), Error> {
    let path = dir.as_ref().join(roster.kind().summary_file());
    write_summary(File::create(&path)?, roster)?;
    debug!("wrote {} {} totals to {}", roster.len(), roster.kind(), path.display());
    Ok(())
}

/// Reads back rows written by [`write_summary`].
///
/// # Errors
///
/// Returns any errors from reading or parsing the rows.
pub fn read_summary<R: std::io::Read>(reader: R) -> Result<Vec<SummaryRow>, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}
