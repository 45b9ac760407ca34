//! Verify command implementation.

use super::safeguards;
use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the verify command.
///
/// Returns whether the claim was verified; the caller maps a negative
/// verdict to a distinct exit code.
pub fn execute_verify(args: VerifyArgs, config: &Config, formatter: &Formatter) -> Result<bool> {
    let safeguards = safeguards(&config.engine, &args.root)?;
    let result = safeguards.verify_claim(args.kind.as_str(), &args.paths)?;

    println!("{}", formatter.verification(&result)?);
    Ok(result.verified)
}
