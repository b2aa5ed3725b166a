use serde::{Deserialize, Serialize};

use crate::filter::{BooleanFilter, ConnectionFilter, StatusFilter, StringFilter, UuidFilter};

/// A subject row of `subjectsConnection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// `active` or `inactive`.
    pub status: String,
    /// Shipped with the platform rather than created by an organization.
    pub system: bool,
}

/// Filter over `subjectsConnection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubjectFilter {
    /// Identifier.
    #[serde(rename = "__id__", skip_serializing_if = "Option::is_none")]
    pub id: Option<UuidFilter>,
    /// Name.
    #[serde(rename = "__name__", skip_serializing_if = "Option::is_none")]
    pub name: Option<StringFilter>,
    /// Status.
    #[serde(rename = "__status__", skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusFilter>,
    /// System flag.
    #[serde(rename = "__system__", skip_serializing_if = "Option::is_none")]
    pub system: Option<BooleanFilter>,
    /// Owning organization.
    #[serde(rename = "__organizationId__", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<UuidFilter>,
    /// Contained category.
    #[serde(rename = "__categoryId__", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<UuidFilter>,
    /// All of these must hold.
    #[serde(rename = "__AND__", skip_serializing_if = "Vec::is_empty")]
    pub and: Vec<Self>,
    /// Any of these must hold.
    #[serde(rename = "__OR__", skip_serializing_if = "Vec::is_empty")]
    pub or: Vec<Self>,
}

impl ConnectionFilter for SubjectFilter {
    const FILTER_TYPE: &'static str = "subject";
}
