//! Organizational unit command implementations

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::{DirectoryApi, OrgUnit};
use crate::output::{json, table};

/// Organizational unit for table display
#[derive(Tabled)]
struct OuDisplay {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PATH")]
    path: String,
    #[tabled(rename = "PARENT")]
    parent: String,
}

impl From<OrgUnit> for OuDisplay {
    fn from(ou: OrgUnit) -> Self {
        Self {
            name: ou.name,
            path: ou.org_unit_path,
            parent: ou.parent_org_unit_path.unwrap_or_else(|| "/".to_string()),
        }
    }
}

/// Spinner shown while the API call is in flight
pub(crate) fn fetch_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("static spinner template is valid"),
    );
    spinner.set_message("Collecting organizational units...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Run the ou list command
pub async fn list(opts: &GlobalOptions) -> crate::error::Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let spinner = fetch_spinner();
    let mut ous = ctx.client.list_org_units(&ctx.customer_id).await?;
    spinner.finish_and_clear();

    // Path order groups parents with their subtrees
    ous.sort_by(|a, b| a.org_unit_path.cmp(&b.org_unit_path));

    match ctx.format {
        OutputFormat::Table => {
            let display: Vec<OuDisplay> = ous.into_iter().map(OuDisplay::from).collect();
            println!("{}", table::format_table(&display));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&ous)?);
        }
    }

    Ok(())
}
