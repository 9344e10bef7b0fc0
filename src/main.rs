use anyhow::Result;
use clap::{error::ErrorKind, Parser};
use log::debug;

use std::{ffi::OsString, path::PathBuf, process::ExitCode};

use branch_sales::{run, Error, Mode};

#[derive(Debug, Parser)]
#[command(version, about)]
/// Totals daily sales record files per branch (and per commodity).
struct Args {
    #[arg(long)]
    /// Also total by commodity, using `commodity.lst` and 3-line record files.
    commodities: bool,
    /// Directory holding `branch.lst` and the `NNNNNNNN.rcd` record files.
    dir: PathBuf,
}

impl Args {
    fn mode(&self) -> Mode {
        if self.commodities {
            Mode::BranchesAndCommodities
        } else {
            Mode::Branches
        }
    }
}

/// Parses the command line, mapping any usage problem to [`Error::Usage`].
///
/// `--help` and `--version` print as usual and exit.
fn parse_args<I, T>(args: I) -> Result<Args, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(args) => Ok(args),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            debug!("{e}");
            Err(Error::Usage)
        }
    }
}

fn try_main() -> Result<()> {
    let args = parse_args(std::env::args_os())?;
    run(&args.dir, args.mode())?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{e:#}");
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
