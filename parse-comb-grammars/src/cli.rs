//! Read a file named on the command line, parse it and print the result.

use std::{fmt::Display, fs, process::ExitCode};

use anyhow::Context;
use parse_comb::{Error, Input, Parse};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("usage: {program} <file>")]
    Usage { program: String },
    #[error("error: {0:#}")]
    Read(#[from] anyhow::Error),
    #[error("error: {0}")]
    Parse(#[from] parse_comb::Error),
}

/// Parse the file named by the only argument after the program name and
/// render the parsed value. The whole file must be consumed.
pub fn run<P>(args: impl IntoIterator<Item = String>, parser: &P) -> Result<String, CliError>
where
    P: Parse,
    P::Output: Display,
{
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| "parse".to_owned());
    let (Some(path), None) = (args.next(), args.next()) else {
        return Err(CliError::Usage { program });
    };

    let text = fs::read_to_string(&path).with_context(|| format!("could not read {path}"))?;
    log::debug!("parsing {path} ({} bytes)", text.len());

    let (value, rest) = parser.parse(Input::new(&text))?;
    if !rest.is_empty() {
        log::debug!("unconsumed input in {path} at {:?}", rest.span());
        let line = rest.as_str().lines().next().unwrap_or_default();
        return Err(Error::new(format!("expected end of input at '{line}'")).into());
    }
    log::info!("parsed {path}");
    Ok(value.to_string())
}

/// [`run`], reporting the outcome on stdout/stderr.
pub fn main<P>(args: impl IntoIterator<Item = String>, parser: &P) -> ExitCode
where
    P: Parse,
    P::Output: Display,
{
    match run(args, parser) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
