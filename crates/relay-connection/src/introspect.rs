//! Field-selection introspection for node types.
//!
//! The fields requested for a connection's nodes are read off the node's own
//! serialization: its zero value is serialized to JSON and every top-level key
//! becomes a selected field. The selection therefore always matches what the
//! node can decode.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::IntrospectionError;

/// A flat, JSON-shaped record returned as a connection node.
///
/// Nodes must serialize every field (no `skip_serializing_if`), and nested
/// objects are not supported: the selection only lists scalar fields.
pub trait ConnectionNode: Serialize + DeserializeOwned + Default + Send + 'static {}

impl<T> ConnectionNode for T where T: Serialize + DeserializeOwned + Default + Send + 'static {}

/// Ordered, duplicate-free field names of a node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    fields: Vec<String>,
}

impl FieldSelection {
    /// Field names in serialization order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Space-separated selection set text.
    #[must_use]
    pub fn to_query_text(&self) -> String {
        self.fields.join(" ")
    }
}

/// Field name token: a quoted name followed by a colon, at the start of the
/// text or after `{`, `,` or a space.
fn field_token() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r#"(?:^|[{, ])"(\w+)":"#).expect("valid field token pattern"))
}

/// Derive the field selection for `N`.
pub fn field_selection<N: ConnectionNode>() -> Result<FieldSelection, IntrospectionError> {
    let type_name = std::any::type_name::<N>();
    let zero = N::default();
    let serialize_error = |err: serde_json::Error| IntrospectionError::Serialize {
        type_name,
        message: err.to_string(),
    };
    // The text keeps declaration order; the value is only used as a key set.
    let text = serde_json::to_string(&zero).map_err(serialize_error)?;
    let value = serde_json::to_value(&zero).map_err(serialize_error)?;
    let serde_json::Value::Object(object) = &value else {
        return Err(IntrospectionError::NotAnObject { type_name });
    };

    let mut fields = Vec::with_capacity(object.len());
    let mut seen = HashSet::with_capacity(object.len());
    for captures in field_token().captures_iter(&text) {
        let name = captures
            .get(1)
            .ok_or_else(|| IntrospectionError::MatchFailed {
                type_name,
                detail: format!("no field name captured in {:?}", &captures[0]),
            })?
            .as_str();
        if !seen.insert(name) {
            return Err(IntrospectionError::Duplicate {
                type_name,
                field: name.to_string(),
            });
        }
        fields.push(name.to_string());
    }

    if fields.len() != object.len() || fields.iter().any(|field| !object.contains_key(field)) {
        return Err(IntrospectionError::MatchFailed {
            type_name,
            detail: format!(
                "extracted {fields:?} but the node serializes keys {:?}",
                object.keys().collect::<Vec<_>>()
            ),
        });
    }

    Ok(FieldSelection { fields })
}
