//! Mock Directory API client for tests

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{DirectoryApi, OrgUnit};
use crate::error::{ApiError, Result};

/// In-memory mock of [`DirectoryApi`]
pub struct MockDirectoryClient {
    org_units: Vec<OrgUnit>,
    fail_with: Option<ApiError>,
    /// Customer ids seen by list_org_units, for asserting call behavior
    pub calls: Mutex<Vec<String>>,
}

impl MockDirectoryClient {
    /// Mock returning the given units
    pub fn with_org_units(org_units: Vec<OrgUnit>) -> Self {
        Self {
            org_units,
            fail_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock rejecting every call with the given error
    pub fn failing(err: ApiError) -> Self {
        Self {
            org_units: Vec::new(),
            fail_with: Some(err),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DirectoryApi for MockDirectoryClient {
    async fn list_org_units(&self, customer_id: &str) -> Result<Vec<OrgUnit>> {
        self.calls.lock().await.push(customer_id.to_string());

        match &self.fail_with {
            Some(ApiError::Unauthorized) => Err(ApiError::Unauthorized.into()),
            Some(ApiError::Forbidden) => Err(ApiError::Forbidden.into()),
            Some(err) => Err(ApiError::ServerError(err.to_string()).into()),
            None => Ok(self.org_units.clone()),
        }
    }
}

/// Build an [`OrgUnit`] from name and path, for test fixtures
pub fn org_unit(name: &str, path: &str) -> OrgUnit {
    OrgUnit {
        name: name.to_string(),
        org_unit_path: path.to_string(),
        org_unit_id: None,
        parent_org_unit_path: None,
        description: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_units_and_records_calls() {
        let mock = MockDirectoryClient::with_org_units(vec![org_unit("Sales", "/Sales")]);

        let ous = mock.list_org_units("my_customer").await.unwrap();
        assert_eq!(ous.len(), 1);

        let calls = mock.calls.lock().await;
        assert_eq!(calls.as_slice(), ["my_customer"]);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockDirectoryClient::failing(ApiError::Forbidden);
        assert!(mock.list_org_units("my_customer").await.is_err());
    }
}
