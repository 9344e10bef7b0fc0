use log::debug;

use std::path::Path;

use crate::{
    amount::{Amount, ParseAmountError},
    error::Error,
    records::{Mode, Record, RecordFile},
    roster::{Roster, RosterKind},
};

/// Running sales totals per branch, and optionally per commodity.
///
/// To load the rosters from a data directory, use [`Tally::load`].
///
/// To add sales data, use [`Tally::read_records`] or [`Tally::apply`].
#[derive(Debug, Clone)]
pub struct Tally {
    branches: Roster,
    commodities: Option<Roster>,
}

impl Tally {
    /// Creates a tally over the given rosters. Passing `commodities` makes
    /// this a tally for [`Mode::BranchesAndCommodities`].
    #[must_use]
    pub fn new(branches: Roster, commodities: Option<Roster>) -> Self {
        Self {
            branches,
            commodities,
        }
    }

    /// Loads the branch roster, then the commodity roster if `mode` needs
    /// it, from `dir`.
    ///
    /// # Errors
    ///
    /// Returns any errors from [`Roster::load`].
    pub fn load(dir: impl AsRef<Path>, mode: Mode) -> Result<Self, Error> {
        let branches = Roster::load(&dir, RosterKind::Branch)?;
        let commodities = match mode {
            Mode::Branches => None,
            Mode::BranchesAndCommodities => Some(Roster::load(&dir, RosterKind::Commodity)?),
        };
        Ok(Self::new(branches, commodities))
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.commodities.is_some() {
            Mode::BranchesAndCommodities
        } else {
            Mode::Branches
        }
    }

    #[must_use]
    pub fn branches(&self) -> &Roster {
        &self.branches
    }

    #[must_use]
    pub fn commodities(&self) -> Option<&Roster> {
        self.commodities.as_ref()
    }

    /// Reads each of `files` in order and adds it to the totals, stopping at
    /// the first file that fails.
    ///
    /// # Errors
    ///
    /// Returns any errors from [`Record::read`] or [`Tally::apply`].
    pub fn read_records(&mut self, files: &[RecordFile]) -> Result<(), Error> {
        for file in files {
            let record = Record::read(file, self.mode())?;
            self.apply(&file.name, &record)?;
            debug!("added {}", file.name);
        }
        Ok(())
    }

    /// Adds the amount in `record` to its branch total (and commodity total).
    ///
    /// Either every affected total is updated, or none is.
    ///
    /// # Errors
    ///
    /// Returns errors, naming `file` where relevant, if:
    /// * The record has a commodity code and this tally doesn't total
    ///   commodities, or the other way round ([`Error::RecordFormat`])
    /// * A code isn't in its roster ([`Error::UnknownCode`])
    /// * The amount isn't a number ([`Error::InvalidAmount`])
    /// * A new total would reach [`Amount::CEILING`] ([`Error::Overflow`])
    pub fn apply(&mut self, file: &str, record: &Record) -> Result<(), Error> {
        let unknown = |kind| Error::UnknownCode {
            file: file.to_string(),
            kind,
        };
        if record.commodity.is_some() != self.commodities.is_some() {
            return Err(Error::RecordFormat {
                file: file.to_string(),
            });
        }
        let branch_total = self
            .branches
            .total(&record.branch)
            .ok_or_else(|| unknown(RosterKind::Branch))?;
        let commodity = match (&mut self.commodities, &record.commodity) {
            (Some(roster), Some(code)) => {
                let total = roster
                    .total(code)
                    .ok_or_else(|| unknown(RosterKind::Commodity))?;
                Some((roster, code, total))
            }
            _ => None,
        };
        let amount = record.amount.parse::<Amount>().map_err(|e| match e {
            ParseAmountError::NotNumeric => Error::InvalidAmount {
                file: file.to_string(),
            },
            ParseAmountError::TooLarge => Error::Overflow,
        })?;
        let branch_total = branch_total.checked_add(amount)?;
        let commodity = match commodity {
            Some((roster, code, total)) => Some((roster, code, total.checked_add(amount)?)),
            None => None,
        };
        self.branches.set_total(&record.branch, branch_total);
        if let Some((roster, code, total)) = commodity {
            roster.set_total(code, total);
        }
        Ok(())
    }
}
