//! Script file emission

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, ScriptError};

/// Default script file name
pub const DEFAULT_SCRIPT_NAME: &str = "createOrgUnits.ps1";

/// Trailing line keeping the console window open after the script runs
pub const PAUSE_LINE: &str = "Read-Host -Prompt \"Press Enter to exit\"";

/// Write the command lines to the script file.
///
/// The file is created (or truncated) even when there is nothing to write,
/// then the empty result is reported as a distinct diagnostic: it means no
/// usable OU data came back from the tenant. A non-empty script gets the
/// interactive pause line appended last.
pub fn write_script(path: &Path, lines: &[String]) -> Result<()> {
    let mut file = File::create(path)?;

    for line in lines {
        writeln!(file, "{line}")?;
    }

    if lines.is_empty() {
        return Err(ScriptError::NoOrgUnitData.into());
    }

    writeln!(file, "{PAUSE_LINE}")?;
    log::debug!("wrote {} command lines to {}", lines.len(), path.display());
    Ok(())
}
