//! Typed filter expressions and their GraphQL input rendering.
//!
//! Filter structs name their keys (and enum-like values) with a
//! double-underscore delimiter, e.g. `"__name__"`. Rendering strips the
//! delimiter from those names and writes them bare, which turns the filter
//! into GraphQL input syntax: `{name: {operator: contains, value: "Bada"}}`.
//! String values are always quoted as written.

use serde::Serialize;

use crate::error::ConnectionError;
use crate::input::to_graphql_input;

/// A filter value targeting one external connection.
///
/// `FILTER_TYPE` routes the filter to its connection in the
/// [`ConnectionRegistry`](crate::ConnectionRegistry). It is never part of the
/// serialized predicate.
///
/// Leaf predicates are optional fields skipped when unset; composition uses
/// fields named `__AND__` / `__OR__` holding lists of the same filter type.
pub trait ConnectionFilter: Serialize {
    /// Discriminator for this filter type.
    const FILTER_TYPE: &'static str;
}

/// Render a filter as GraphQL input text.
///
/// Returns an empty string when no predicate is set, meaning "fetch
/// unfiltered".
pub fn render_filter<F: Serialize + ?Sized>(filter: &F) -> Result<String, ConnectionError> {
    let text = to_graphql_input(filter).map_err(|err| ConnectionError::Render(err.to_string()))?;
    let trimmed = text.trim();
    if trimmed == "{}" {
        return Ok(String::new());
    }
    Ok(trimmed.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Leaf predicates
// ─────────────────────────────────────────────────────────────────────────────

/// Operators for identifier predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UuidOperator {
    /// Equals.
    #[serde(rename = "__eq__")]
    Eq,
    /// Not equals.
    #[serde(rename = "__neq__")]
    Neq,
}

/// Operators for string predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StringOperator {
    /// Equals.
    #[serde(rename = "__eq__")]
    Eq,
    /// Not equals.
    #[serde(rename = "__neq__")]
    Neq,
    /// Substring match.
    #[serde(rename = "__contains__")]
    Contains,
}

/// Operators for boolean and enum predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EqualityOperator {
    /// Equals.
    #[serde(rename = "__eq__")]
    Eq,
    /// Not equals.
    #[serde(rename = "__neq__")]
    Neq,
}

/// Entity lifecycle status as a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityStatus {
    /// Active.
    #[serde(rename = "__active__")]
    Active,
    /// Inactive.
    #[serde(rename = "__inactive__")]
    Inactive,
}

/// Predicate on an identifier field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UuidFilter {
    /// Operator.
    #[serde(rename = "__operator__")]
    pub operator: UuidOperator,
    /// Identifier to compare against.
    #[serde(rename = "__value__")]
    pub value: String,
}

impl UuidFilter {
    /// `field == value`.
    #[must_use]
    pub fn eq(value: impl Into<String>) -> Self {
        Self {
            operator: UuidOperator::Eq,
            value: value.into(),
        }
    }

    /// `field != value`.
    #[must_use]
    pub fn neq(value: impl Into<String>) -> Self {
        Self {
            operator: UuidOperator::Neq,
            value: value.into(),
        }
    }
}

/// Predicate on a string field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringFilter {
    /// Operator.
    #[serde(rename = "__operator__")]
    pub operator: StringOperator,
    /// Value to compare against.
    #[serde(rename = "__value__")]
    pub value: String,
    /// Compare ignoring case; server default when unset.
    #[serde(rename = "__caseInsensitive__", skip_serializing_if = "Option::is_none")]
    pub case_insensitive: Option<bool>,
}

impl StringFilter {
    fn with_operator(operator: StringOperator, value: impl Into<String>) -> Self {
        Self {
            operator,
            value: value.into(),
            case_insensitive: None,
        }
    }

    /// `field == value`.
    #[must_use]
    pub fn eq(value: impl Into<String>) -> Self {
        Self::with_operator(StringOperator::Eq, value)
    }

    /// `field != value`.
    #[must_use]
    pub fn neq(value: impl Into<String>) -> Self {
        Self::with_operator(StringOperator::Neq, value)
    }

    /// `field` contains `value`.
    #[must_use]
    pub fn contains(value: impl Into<String>) -> Self {
        Self::with_operator(StringOperator::Contains, value)
    }

    /// Set case sensitivity.
    #[must_use]
    pub const fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = Some(enabled);
        self
    }
}

/// Predicate on a boolean field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BooleanFilter {
    /// Operator.
    #[serde(rename = "__operator__")]
    pub operator: EqualityOperator,
    /// Value to compare against.
    #[serde(rename = "__value__")]
    pub value: bool,
}

impl BooleanFilter {
    /// `field == value`.
    #[must_use]
    pub const fn eq(value: bool) -> Self {
        Self {
            operator: EqualityOperator::Eq,
            value,
        }
    }

    /// `field != value`.
    #[must_use]
    pub const fn neq(value: bool) -> Self {
        Self {
            operator: EqualityOperator::Neq,
            value,
        }
    }
}

/// Predicate on an entity status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusFilter {
    /// Operator.
    #[serde(rename = "__operator__")]
    pub operator: EqualityOperator,
    /// Status to compare against.
    #[serde(rename = "__value__")]
    pub value: EntityStatus,
}

impl StatusFilter {
    /// `status == value`.
    #[must_use]
    pub const fn eq(value: EntityStatus) -> Self {
        Self {
            operator: EqualityOperator::Eq,
            value,
        }
    }

    /// `status != value`.
    #[must_use]
    pub const fn neq(value: EntityStatus) -> Self {
        Self {
            operator: EqualityOperator::Neq,
            value,
        }
    }
}
