use serde::{Deserialize, Serialize};

use crate::filter::{BooleanFilter, ConnectionFilter, StatusFilter, StringFilter, UuidFilter};

/// A subcategory row of `subcategoriesConnection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    /// Subcategory identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// `active` or `inactive`.
    pub status: String,
    /// Shipped with the platform.
    pub system: bool,
}

/// Filter over `subcategoriesConnection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubcategoryFilter {
    /// Subcategory identifier.
    #[serde(rename = "__id__", skip_serializing_if = "Option::is_none")]
    pub id: Option<UuidFilter>,
    /// Subcategory name.
    #[serde(rename = "__name__", skip_serializing_if = "Option::is_none")]
    pub name: Option<StringFilter>,
    /// Subcategory status.
    #[serde(rename = "__status__", skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusFilter>,
    /// System flag.
    #[serde(rename = "__system__", skip_serializing_if = "Option::is_none")]
    pub system: Option<BooleanFilter>,
    /// Owning organization.
    #[serde(rename = "__organizationId__", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<UuidFilter>,
    /// Parent category.
    #[serde(rename = "__categoryId__", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<UuidFilter>,
    /// All of these must hold.
    #[serde(rename = "__AND__", skip_serializing_if = "Vec::is_empty")]
    pub and: Vec<Self>,
    /// Any of these must hold.
    #[serde(rename = "__OR__", skip_serializing_if = "Vec::is_empty")]
    pub or: Vec<Self>,
}

impl ConnectionFilter for SubcategoryFilter {
    const FILTER_TYPE: &'static str = "subcategory";
}
