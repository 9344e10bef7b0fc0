use log::{debug, info};
use regex::Regex;

use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use crate::error::Error;

static RECORD_FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}\.rcd$").unwrap());

/// Which rosters a run totals records against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Records hold a branch code and an amount.
    #[default]
    Branches,
    /// Records hold a branch code, a commodity code and an amount.
    BranchesAndCommodities,
}

impl Mode {
    /// The exact number of lines a record file must contain.
    #[must_use]
    pub fn record_lines(self) -> usize {
        match self {
            Self::Branches => 2,
            Self::BranchesAndCommodities => 3,
        }
    }
}

/// A daily sales record file, such as `00000042.rcd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFile {
    pub path: PathBuf,
    pub name: String,
    /// The numeric value of the 8-digit prefix.
    pub ordinal: u32,
}

impl RecordFile {
    /// Returns the record file at `path`, if its name has the record format.
    #[must_use]
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        if !RECORD_FILE_NAME.is_match(&name) {
            return None;
        }
        let ordinal = name[..8].parse().ok()?;
        Some(Self {
            path,
            name,
            ordinal,
        })
    }
}

/// Lists the record files directly inside `dir`, sorted by name.
///
/// Subdirectories, and files whose names aren't 8 digits followed by `.rcd`,
/// are ignored. Finding no record files at all is not an error.
///
/// # Errors
///
/// Returns any errors from reading the directory.
pub fn discover(dir: impl AsRef<Path>) -> Result<Vec<RecordFile>, Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(file) = RecordFile::from_path(path) {
            files.push(file);
        }
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    if files.is_empty() {
        info!("no record files found in {}", dir.as_ref().display());
    }
    Ok(files)
}

/// Checks that each file's ordinal is exactly one more than the previous one.
///
/// # Errors
///
/// Returns [`Error::SequenceBroken`] at the first gap (or repeat).
pub fn check_sequence(files: &[RecordFile]) -> Result<(), Error> {
    for pair in files.windows(2) {
        if i64::from(pair[1].ordinal) - i64::from(pair[0].ordinal) != 1 {
            debug!("{} does not follow {}", pair[1].name, pair[0].name);
            return Err(Error::SequenceBroken);
        }
    }
    Ok(())
}

/// The raw contents of one record file.
///
/// Fields are kept as text: checking them needs the rosters, and happens in
/// [`crate::Tally::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub branch: String,
    pub commodity: Option<String>,
    pub amount: String,
}

impl Record {
    /// Reads `file`, which must have exactly [`Mode::record_lines`] lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordFormat`] for the wrong number of lines, or any
    /// errors from opening or reading the file.
    pub fn read(file: &RecordFile, mode: Mode) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(&file.path)?);
        let mut lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        if lines.len() != mode.record_lines() {
            return Err(Error::RecordFormat {
                file: file.name.clone(),
            });
        }
        let amount = lines.pop().unwrap_or_default();
        let commodity = match mode {
            Mode::Branches => None,
            Mode::BranchesAndCommodities => lines.pop(),
        };
        let branch = lines.pop().unwrap_or_default();
        Ok(Self {
            branch,
            commodity,
            amount,
        })
    }
}
