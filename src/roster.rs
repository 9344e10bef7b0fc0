use log::{debug, warn};
use regex::Regex;

use std::{collections::HashMap, fmt::Display, path::Path, sync::LazyLock};

use crate::{amount::Amount, error::Error};

static BRANCH_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3}$").unwrap());
static COMMODITY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{8}$").unwrap());

/// The two kinds of definition file a run can load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RosterKind {
    Branch,
    Commodity,
}

impl RosterKind {
    /// Name of the definition file, relative to the data directory.
    #[must_use]
    pub fn definition_file(self) -> &'static str {
        match self {
            Self::Branch => "branch.lst",
            Self::Commodity => "commodity.lst",
        }
    }

    /// Name of the summary file written for this kind.
    #[must_use]
    pub fn summary_file(self) -> &'static str {
        match self {
            Self::Branch => "branch.out",
            Self::Commodity => "commodity.out",
        }
    }

    /// The pattern every code of this kind must match.
    #[must_use]
    pub fn code_pattern(self) -> &'static Regex {
        match self {
            Self::Branch => &*BRANCH_CODE,
            Self::Commodity => &*COMMODITY_CODE,
        }
    }
}

impl Display for RosterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Branch => write!(f, "branch"),
            Self::Commodity => write!(f, "commodity"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub code: String,
    pub name: String,
    pub total: Amount,
}

/// Codes, names and running totals loaded from a definition file.
///
/// Entries keep the order of the definition file. A code defined twice keeps
/// its first position and takes the later name.
#[derive(Debug, Clone)]
pub struct Roster {
    kind: RosterKind,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Roster {
    #[must_use]
    pub fn new(kind: RosterKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Loads the definition file for `kind` from the directory `dir`.
    ///
    /// Every non-blank line must read `CODE,NAME`, with `CODE` matching
    /// [`RosterKind::code_pattern`]. Trailing empty fields are ignored, so
    /// `001,Tokyo,` is accepted but `001,` has no name. All totals start at
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// * The file does not exist ([`Error::MissingDefinition`])
    /// * A line has the wrong number of fields, or a malformed code
    ///   ([`Error::DefinitionFormat`])
    /// * The file cannot be opened or read
    pub fn load(dir: impl AsRef<Path>, kind: RosterKind) -> Result<Self, Error> {
        let path = dir.as_ref().join(kind.definition_file());
        if !path.exists() {
            return Err(Error::MissingDefinition(kind));
        }
        let pattern = kind.code_pattern();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_path(&path)?;
        let mut roster = Self::new(kind);
        for result in rdr.records() {
            let record = result?;
            let mut fields: Vec<&str> = record.iter().collect();
            while fields.last() == Some(&"") {
                fields.pop();
            }
            let [code, name] = fields[..] else {
                return Err(Error::DefinitionFormat(kind));
            };
            if !pattern.is_match(code) {
                return Err(Error::DefinitionFormat(kind));
            }
            roster.insert(code, name);
        }
        debug!(
            "loaded {} {kind} codes from {}",
            roster.len(),
            path.display()
        );
        Ok(roster)
    }

    /// Adds `code` with a zero total, or renames it if it's already present.
    pub fn insert(&mut self, code: &str, name: &str) {
        if let Some(&i) = self.index.get(code) {
            warn!("{} code {code} defined more than once", self.kind);
            self.entries[i].name = name.to_string();
            self.entries[i].total = Amount::default();
            return;
        }
        self.index.insert(code.to_string(), self.entries.len());
        self.entries.push(Entry {
            code: code.to_string(),
            name: name.to_string(),
            total: Amount::default(),
        });
    }

    #[must_use]
    pub fn kind(&self) -> RosterKind {
        self.kind
    }

    /// Returns the running total for `code`, if it's defined.
    #[must_use]
    pub fn total(&self, code: &str) -> Option<Amount> {
        self.index.get(code).map(|&i| self.entries[i].total)
    }

    /// Replaces the running total for `code`. Returns `false` if `code` isn't
    /// defined.
    pub fn set_total(&mut self, code: &str, total: Amount) -> bool {
        match self.index.get(code) {
            Some(&i) => {
                self.entries[i].total = total;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(roster: &Roster) -> Vec<(&str, &str)> {
        roster
            .entries()
            .map(|e| (e.code.as_str(), e.name.as_str()))
            .collect()
    }

    #[test]
    fn load_fn_reads_branches_in_file_order() {
        let roster = Roster::load("testdata/valid", RosterKind::Branch).unwrap();
        assert_eq!(
            codes(&roster),
            vec![("003", "Nagoya"), ("001", "Tokyo"), ("002", "Osaka")]
        );
        assert!(roster.entries().all(|e| e.total == Amount::default()));
    }

    #[test]
    fn load_fn_reads_commodities() {
        let roster = Roster::load("testdata/commodities", RosterKind::Commodity).unwrap();
        assert_eq!(
            codes(&roster),
            vec![("SFT00001", "Office suite"), ("HRD00001", "Laptop")]
        );
    }

    #[test]
    fn load_fn_skips_blank_lines() {
        let roster = Roster::load("testdata/blank_lines", RosterKind::Branch).unwrap();
        assert_eq!(codes(&roster), vec![("001", "Tokyo"), ("002", "Osaka")]);
    }

    #[test]
    fn load_fn_reports_missing_file() {
        let err = Roster::load("testdata/missing_roster", RosterKind::Branch).unwrap_err();
        assert!(matches!(err, Error::MissingDefinition(RosterKind::Branch)));
        let err = Roster::load("testdata/valid", RosterKind::Commodity).unwrap_err();
        assert!(matches!(err, Error::MissingDefinition(RosterKind::Commodity)));
    }

    #[test]
    fn load_fn_rejects_short_code() {
        let err = Roster::load("testdata/bad_code", RosterKind::Branch).unwrap_err();
        assert!(matches!(err, Error::DefinitionFormat(RosterKind::Branch)));
    }

    #[test]
    fn load_fn_rejects_extra_fields() {
        let err = Roster::load("testdata/extra_field", RosterKind::Branch).unwrap_err();
        assert!(matches!(err, Error::DefinitionFormat(RosterKind::Branch)));
    }

    #[test]
    fn load_fn_rejects_symbols_in_commodity_code() {
        let err = Roster::load("testdata/bad_code", RosterKind::Commodity).unwrap_err();
        assert!(matches!(err, Error::DefinitionFormat(RosterKind::Commodity)));
    }

    #[test]
    fn load_fn_rejects_empty_name() {
        let err = Roster::load("testdata/empty_name", RosterKind::Branch).unwrap_err();
        assert!(matches!(err, Error::DefinitionFormat(RosterKind::Branch)));
    }

    #[test]
    fn load_fn_accepts_trailing_comma() {
        let roster = Roster::load("testdata/trailing_comma", RosterKind::Branch).unwrap();
        assert_eq!(codes(&roster), vec![("001", "Tokyo"), ("002", "Osaka")]);
    }

    #[test]
    fn insert_fn_overwrites_duplicate_code_in_place() {
        let mut roster = Roster::new(RosterKind::Branch);
        roster.insert("001", "Tokyo");
        roster.insert("002", "Osaka");
        roster.insert("001", "Shinjuku");
        assert_eq!(codes(&roster), vec![("001", "Shinjuku"), ("002", "Osaka")]);
    }

    #[test]
    fn set_total_fn_ignores_unknown_code() {
        let mut roster = Roster::new(RosterKind::Branch);
        roster.insert("001", "Tokyo");
        assert!(roster.set_total("001", Amount::new(5)));
        assert!(!roster.set_total("999", Amount::new(5)));
        assert_eq!(roster.total("001"), Some(Amount::new(5)));
        assert_eq!(roster.total("999"), None);
    }
}
