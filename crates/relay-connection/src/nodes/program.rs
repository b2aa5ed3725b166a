use serde::{Deserialize, Serialize};

use crate::filter::{BooleanFilter, ConnectionFilter, StatusFilter, StringFilter, UuidFilter};

/// A program row of `programsConnection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Program identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// `active` or `inactive`.
    pub status: String,
    /// Shipped with the platform rather than created by an organization.
    pub system: bool,
}

/// Filter over `programsConnection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgramFilter {
    /// Program identifier.
    #[serde(rename = "__id__", skip_serializing_if = "Option::is_none")]
    pub id: Option<UuidFilter>,
    /// Program name.
    #[serde(rename = "__name__", skip_serializing_if = "Option::is_none")]
    pub name: Option<StringFilter>,
    /// Program status.
    #[serde(rename = "__status__", skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusFilter>,
    /// System flag.
    #[serde(rename = "__system__", skip_serializing_if = "Option::is_none")]
    pub system: Option<BooleanFilter>,
    /// Owning organization.
    #[serde(rename = "__organizationId__", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<UuidFilter>,
    /// All of these must hold.
    #[serde(rename = "__AND__", skip_serializing_if = "Vec::is_empty")]
    pub and: Vec<Self>,
    /// Any of these must hold.
    #[serde(rename = "__OR__", skip_serializing_if = "Vec::is_empty")]
    pub or: Vec<Self>,
}

impl ConnectionFilter for ProgramFilter {
    const FILTER_TYPE: &'static str = "program";
}
