//! Translation of OU paths into Active Directory creation commands
//!
//! Every ancestor-or-self segment of every OU path is translated into one
//! `New-ADOrganizationalUnit` command anchored under the root DN. Names are
//! deduplicated through [`ScriptBuilder`] so each unit is created exactly
//! once no matter how many descendant paths reference it.

pub mod emitter;

use std::collections::HashSet;

use futures::future;

use crate::client::OrgUnit;
use crate::error::{Result, ScriptError};

/// Validate a root DN before any translation happens.
///
/// Only a minimum length is enforced; DN syntax is passed through
/// uninterpreted.
pub fn validate_root_dn(root_dn: &str) -> Result<()> {
    if root_dn.len() <= 3 {
        return Err(ScriptError::InvalidRootDn(root_dn.to_string()).into());
    }
    Ok(())
}

/// One OU creation command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOuCommand {
    /// Resolved OU name, the dedup key
    pub name: String,

    /// The full PowerShell command line
    pub line: String,
}

/// Translate one segment name into a creation command.
///
/// The name is resolved against the OU set (first match by `name`; names are
/// assumed unique across the tenant). The resolved unit's own path supplies
/// the ancestor clause: segments are reversed so the nearest ancestor comes
/// first, and the unit's own segment is excluded.
///
/// Returns `None` when no unit carries the name, which the walker reports
/// instead of emitting a command with empty fields.
pub fn translate(ou_name: &str, ou_set: &[OrgUnit], root_dn: &str) -> Option<CreateOuCommand> {
    let ou = ou_set.iter().find(|ou| ou.name == ou_name)?;

    let mut ancestors = String::new();
    let segments: Vec<&str> = ou.path_segments().collect();
    for segment in segments.into_iter().rev() {
        if segment != ou_name {
            ancestors.push_str("OU=");
            ancestors.push_str(segment);
            ancestors.push(',');
        }
    }

    let line = format!(
        "New-ADOrganizationalUnit -Name \"{}\" -Path \"{}{}\"",
        ou.name, ancestors, root_dn
    );

    Some(CreateOuCommand {
        name: ou.name.clone(),
        line,
    })
}

/// Accumulator for accepted command lines.
///
/// Owns the set of already-created names; the walker threads one instance
/// through the whole run so re-translating a name never re-emits it.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    created: HashSet<String>,
    lines: Vec<String>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a command unless its name was already created.
    ///
    /// Returns whether the line was appended.
    pub fn accept(&mut self, command: CreateOuCommand) -> bool {
        if self.created.insert(command.name) {
            self.lines.push(command.line);
            true
        } else {
            false
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Walk every OU's path and translate every ancestor-or-self segment into
/// the builder.
///
/// Per-segment translations run as independent futures awaited jointly;
/// results are folded into the builder in input order, so each path is
/// processed top-down and every ancestor is accepted before its descendants.
/// Segment names that resolve to no unit are logged and skipped.
pub async fn translate_all(ou_set: &[OrgUnit], root_dn: &str, builder: &mut ScriptBuilder) {
    let tasks = ou_set
        .iter()
        .flat_map(|ou| ou.path_segments())
        .map(|segment| async move { (segment, translate(segment, ou_set, root_dn)) });

    for (segment, command) in future::join_all(tasks).await {
        match command {
            Some(command) => {
                if !builder.accept(command) {
                    log::debug!("{segment:?} already created, skipping");
                }
            }
            None => {
                log::warn!("no organizational unit named {segment:?} in the tenant, skipping");
            }
        }
    }
}

/// Validate the root DN and produce the full ordered command list.
pub async fn build_script(ou_set: &[OrgUnit], root_dn: &str) -> Result<Vec<String>> {
    validate_root_dn(root_dn)?;

    let mut builder = ScriptBuilder::new();
    translate_all(ou_set, root_dn, &mut builder).await;
    Ok(builder.into_lines())
}
