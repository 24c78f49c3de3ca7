//! Domain Entities - Core lookup objects
//!
//! These entities represent the records exchanged with the remote
//! batch-lookup service. They carry no transport logic.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Status string reported by the lookup service for a resolved address.
pub const STATUS_SUCCESS: &str = "success";

/// A single address submitted for lookup.
///
/// Serialized as `{"query": "<ip>"}`, the item shape the batch endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookupRequestItem {
    /// The address as given by the caller (no normalization)
    #[serde(rename = "query")]
    pub address: String,
}

impl LookupRequestItem {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// One resolved record returned by the lookup service.
///
/// Every field is optional: the service omits whatever it could not
/// resolve, and a failed per-address lookup still yields a record with a
/// non-success status and no enrichment fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    /// Address this record belongs to
    #[serde(
        rename = "query",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    /// Status reported by the service ("success" or "fail")
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Country name
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// City name
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Organization name
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// ISP name
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
}

impl LookupResult {
    /// Create an empty record for an address.
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Default::default()
        }
    }

    /// Whether the service resolved this address successfully.
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();
        write!(
            f,
            "ip : {:?}, country : {:?}, org : {:?}, isp : {:?}",
            field(&self.address),
            format!("{}-{}", field(&self.country), field(&self.city)),
            field(&self.org),
            field(&self.isp)
        )
    }
}

/// Treat empty strings and nulls as absent.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
