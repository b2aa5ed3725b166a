use serde::{Deserialize, Serialize};

use crate::filter::{ConnectionFilter, StatusFilter, StringFilter, UuidFilter};

/// An organization row of `organizationsConnection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// `active` or `inactive`.
    pub status: String,
    /// Short code, when one was assigned.
    pub short_code: Option<String>,
}

/// Filter over `organizationsConnection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizationFilter {
    /// Organization identifier.
    #[serde(rename = "__id__", skip_serializing_if = "Option::is_none")]
    pub id: Option<UuidFilter>,
    /// Organization name.
    #[serde(rename = "__name__", skip_serializing_if = "Option::is_none")]
    pub name: Option<StringFilter>,
    /// Organization status.
    #[serde(rename = "__status__", skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusFilter>,
    /// Short code.
    #[serde(rename = "__shortCode__", skip_serializing_if = "Option::is_none")]
    pub short_code: Option<StringFilter>,
    /// All of these must hold.
    #[serde(rename = "__AND__", skip_serializing_if = "Vec::is_empty")]
    pub and: Vec<Self>,
    /// Any of these must hold.
    #[serde(rename = "__OR__", skip_serializing_if = "Vec::is_empty")]
    pub or: Vec<Self>,
}

impl ConnectionFilter for OrganizationFilter {
    const FILTER_TYPE: &'static str = "organization";
}
