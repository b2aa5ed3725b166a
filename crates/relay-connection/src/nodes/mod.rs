//! Built-in node types and their filters.
//!
//! Node structs mirror the JSON shape of one connection row; their serde
//! field names are exactly the fields requested. Filter structs follow the
//! delimiter convention described in [`crate::filter`].

mod category;
mod organization;
mod program;
mod subcategory;
mod subject;

pub use category::{Category, CategoryFilter};
pub use organization::{Organization, OrganizationFilter};
pub use program::{Program, ProgramFilter};
pub use subcategory::{Subcategory, SubcategoryFilter};
pub use subject::{Subject, SubjectFilter};
