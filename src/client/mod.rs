//! Google Workspace Admin SDK Directory API client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod directory;
#[cfg(test)]
pub mod mock;

pub use directory::GoogleDirectoryClient;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockDirectoryClient;

/// Directory API operations
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// List every organizational unit under the customer's root.
    ///
    /// The endpoint returns the whole tree in one response; hierarchy is
    /// carried in each unit's `orgUnitPath`, not in list order.
    async fn list_org_units(&self, customer_id: &str) -> Result<Vec<OrgUnit>>;
}

/// One organizational unit as returned by orgunits.list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgUnit {
    /// OU name, the last segment of `org_unit_path`
    pub name: String,

    /// Slash-delimited path from the root, e.g. `/Sales/EMEA`
    pub org_unit_path: String,

    /// Opaque unit id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_unit_id: Option<String>,

    /// Path of the parent unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_org_unit_path: Option<String>,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OrgUnit {
    /// Ancestor-or-self name segments of the path, top-down, with the
    /// leading empty segment discarded.
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.org_unit_path.split('/').skip(1)
    }
}
