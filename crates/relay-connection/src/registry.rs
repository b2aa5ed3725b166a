//! Registry routing filter discriminators to connections.
//!
//! Each filter/node pair is registered once with the connection name it
//! queries. Registration introspects the node type, so a node whose shape
//! cannot be selected is rejected up front rather than on first use.

use std::any::TypeId;
use std::collections::HashMap;

use tracing::debug;

use crate::error::ConnectionError;
use crate::filter::ConnectionFilter;
use crate::introspect::{ConnectionNode, FieldSelection, field_selection};
use crate::nodes::{
    Category, CategoryFilter, Organization, OrganizationFilter, Program, ProgramFilter, Subcategory,
    SubcategoryFilter, Subject, SubjectFilter,
};

/// What a discriminator resolves to.
#[derive(Debug, Clone)]
pub struct Registration {
    connection_name: String,
    selection: FieldSelection,
    node_type: TypeId,
    node_type_name: &'static str,
}

impl Registration {
    /// Connection field queried, e.g. `programsConnection`.
    #[must_use]
    pub fn connection_name(&self) -> &str {
        &self.connection_name
    }

    /// Node fields requested.
    #[must_use]
    pub const fn selection(&self) -> &FieldSelection {
        &self.selection
    }

    /// Rust type decoded for each node.
    #[must_use]
    pub const fn node_type_name(&self) -> &'static str {
        self.node_type_name
    }
}

/// Maps filter discriminators to connection registrations.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    entries: HashMap<&'static str, Registration>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in connection.
    pub fn with_defaults() -> Result<Self, ConnectionError> {
        let mut registry = Self::new();
        registry
            .register::<ProgramFilter, Program>("programsConnection")?
            .register::<OrganizationFilter, Organization>("organizationsConnection")?
            .register::<SubcategoryFilter, Subcategory>("subcategoriesConnection")?
            .register::<CategoryFilter, Category>("categoriesConnection")?
            .register::<SubjectFilter, Subject>("subjectsConnection")?;
        Ok(registry)
    }

    /// Register `F` to query `connection_name`, decoding nodes as `N`.
    ///
    /// Registering the same discriminator again replaces the earlier entry.
    pub fn register<F, N>(
        &mut self,
        connection_name: impl Into<String>,
    ) -> Result<&mut Self, ConnectionError>
    where
        F: ConnectionFilter,
        N: ConnectionNode,
    {
        let selection = field_selection::<N>()?;
        let connection_name = connection_name.into();
        debug!(
            filter_type = F::FILTER_TYPE,
            connection = %connection_name,
            fields = %selection.to_query_text(),
            "registered connection"
        );
        self.entries.insert(
            F::FILTER_TYPE,
            Registration {
                connection_name,
                selection,
                node_type: TypeId::of::<N>(),
                node_type_name: std::any::type_name::<N>(),
            },
        );
        Ok(self)
    }

    /// Look up the registration for `F`, checking it decodes into `N`.
    pub fn resolve<F, N>(&self) -> Result<&Registration, ConnectionError>
    where
        F: ConnectionFilter,
        N: ConnectionNode,
    {
        let registration =
            self.entries
                .get(F::FILTER_TYPE)
                .ok_or_else(|| ConnectionError::Unsupported {
                    filter_type: F::FILTER_TYPE,
                    reason: "no connection registered".to_string(),
                })?;
        if registration.node_type != TypeId::of::<N>() {
            return Err(ConnectionError::Unsupported {
                filter_type: F::FILTER_TYPE,
                reason: format!(
                    "registered for {} not {}",
                    registration.node_type_name,
                    std::any::type_name::<N>()
                ),
            });
        }
        Ok(registration)
    }

    /// Returns `true` if `filter_type` is registered.
    #[must_use]
    pub fn contains(&self, filter_type: &str) -> bool {
        self.entries.contains_key(filter_type)
    }

    /// Number of registered connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
