// Azure Resource Manager wire types for ARM Wizards
//
// This module defines the payload shapes exchanged with the management plane:
// paginated listings, resource group and location entities, and the error
// envelope ARM wraps failures in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One page of a cursor-paginated ARM listing.
///
/// ARM listing endpoints return their items under `value` together with an
/// optional absolute `nextLink` URL pointing at the next page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Items on this page, in API order
    #[serde(default)]
    pub value: Vec<T>,
    /// Continuation URL for the next page, absent on the last page
    #[serde(rename = "nextLink", default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

impl<T> Page<T> {
    /// Create a final page with no continuation
    pub fn new(value: Vec<T>) -> Self {
        Self {
            value,
            next_link: None,
        }
    }

    /// Create a page that continues at the given link
    pub fn with_next_link(value: Vec<T>, next_link: impl Into<String>) -> Self {
        Self {
            value,
            next_link: Some(next_link.into()),
        }
    }
}

/// A resource group as returned by the management plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceGroupSummary {
    /// Fully qualified resource ID
    pub id: String,
    /// Group name, unique within a subscription under case-insensitive comparison
    pub name: String,
    /// Azure location the group lives in
    pub location: String,
    /// Resource tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
    /// Server-side properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ResourceGroupProperties>,
}

/// Server-side resource group properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupProperties {
    /// Provisioning state reported by ARM (e.g. "Succeeded")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// An Azure location available to a subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    /// Fully qualified location ID
    pub id: String,
    /// Canonical location name (e.g. "eastus")
    pub name: String,
    /// Human-readable name (e.g. "East US")
    pub display_name: String,
}

/// Error envelope returned by ARM on non-success responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmErrorResponse {
    /// The wrapped error detail
    pub error: ArmErrorDetail,
}

/// Code and message inside the ARM error envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmErrorDetail {
    /// Machine-readable error code (e.g. "ResourceGroupNotFound")
    pub code: String,
    /// Human-readable description
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_next_link() {
        let json = r#"{"value":[{"id":"/subscriptions/s/resourceGroups/rg-a","name":"rg-a","location":"eastus"}],"nextLink":"https://management.azure.com/next"}"#;
        let page: Page<ResourceGroupSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(page.value.len(), 1);
        assert_eq!(page.value[0].name, "rg-a");
        assert_eq!(page.next_link.as_deref(), Some("https://management.azure.com/next"));
    }

    #[test]
    fn test_page_tolerates_missing_fields() {
        let page: Page<ResourceGroupSummary> = serde_json::from_str("{}").unwrap();
        assert!(page.value.is_empty());
        assert!(page.next_link.is_none());
    }

    #[test]
    fn test_location_summary_camel_case() {
        let json = r#"{"id":"/subscriptions/s/locations/eastus","name":"eastus","displayName":"East US"}"#;
        let location: LocationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(location.display_name, "East US");
    }

    #[test]
    fn test_error_envelope() {
        let json = r#"{"error":{"code":"AuthorizationFailed","message":"The client does not have authorization"}}"#;
        let envelope: ArmErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.code, "AuthorizationFailed");
    }
}
