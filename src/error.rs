use thiserror::Error;

use crate::roster::RosterKind;

/// Everything that can stop a run.
///
/// Each variant displays as the single line of text the command-line tool
/// prints before stopping. Failures that can't be blamed on the input files
/// (I/O, CSV plumbing) all display as the same "unexpected error" message,
/// but keep their underlying cause as the error source.
#[derive(Error, Debug)]
pub enum Error {
    #[error("An unexpected error occurred")]
    Usage,
    #[error("The {0} definition file does not exist")]
    MissingDefinition(RosterKind),
    #[error("The {0} definition file has an invalid format")]
    DefinitionFormat(RosterKind),
    #[error("Sales file names are not consecutive")]
    SequenceBroken,
    #[error("{file} has an invalid format")]
    RecordFormat { file: String },
    #[error("{file} has an invalid {kind} code")]
    UnknownCode { file: String, kind: RosterKind },
    #[error("{file} has an invalid sales amount")]
    InvalidAmount { file: String },
    #[error("Total amount exceeded 10 digits")]
    Overflow,
    #[error("An unexpected error occurred")]
    Io(#[from] std::io::Error),
    #[error("An unexpected error occurred")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_file_and_roster() {
        let err = Error::UnknownCode {
            file: "00000002.rcd".into(),
            kind: RosterKind::Commodity,
        };
        assert_eq!(err.to_string(), "00000002.rcd has an invalid commodity code");
        assert_eq!(
            Error::MissingDefinition(RosterKind::Branch).to_string(),
            "The branch definition file does not exist"
        );
    }

    #[test]
    fn io_failures_display_as_unexpected_error() {
        let err = Error::from(std::io::Error::other("disk on fire"));
        assert_eq!(err.to_string(), "An unexpected error occurred");
        assert!(std::error::Error::source(&err).is_some());
    }
}
