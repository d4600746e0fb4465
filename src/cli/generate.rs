//! Generate command implementation
//!
//! The main flow: fetch the OU set, obtain the root DN, translate every
//! path into creation commands, and write the PowerShell script.

use std::path::PathBuf;

use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};

use crate::cli::{CommandContext, GlobalOptions};
use crate::client::DirectoryApi;
use crate::error::Result;
use crate::script;
use crate::script::emitter::{self, DEFAULT_SCRIPT_NAME};

/// Run the generate command
pub async fn run(
    opts: &GlobalOptions,
    root_dn: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let spinner = super::ou::fetch_spinner();
    let ous = ctx.client.list_org_units(&ctx.customer_id).await?;
    spinner.finish_and_clear();
    println!(
        "{} Collected {} organizational units",
        "✓".green(),
        ous.len()
    );

    let root_dn = match root_dn {
        Some(dn) => dn,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Please specify the root DN (ex. CN=domain,CN=com)")
            .interact_text()?,
    };

    // Rejects a too-short DN before any translation happens
    let lines = script::build_script(&ous, root_dn.trim()).await?;

    let output = output
        .or_else(|| ctx.config.preferences.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT_NAME));
    emitter::write_script(&output, &lines)?;

    println!(
        "{} PowerShell script generated: {} ({} commands)",
        "✓".green(),
        output.display().to_string().bold(),
        lines.len()
    );

    Ok(())
}
