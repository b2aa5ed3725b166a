//! Property-based tests for filter rendering and field selection.
//!
//! ## Test Categories
//! 1. **Empty filters**: no predicate set renders as the empty string
//! 2. **Leaf rendering**: no delimiter markers outside string literals, and
//!    every string value appears exactly as its quoted literal
//! 3. **Determinism**: rendering the same value twice is identical
//! 4. **Field selection**: built-in nodes select exactly their JSON fields

use std::collections::BTreeSet;

use proptest::prelude::*;

use relay_connection::nodes::{
    Category, CategoryFilter, Organization, OrganizationFilter, Program, ProgramFilter,
    Subcategory, SubcategoryFilter, Subject, SubjectFilter,
};
use relay_connection::{
    BooleanFilter, ConnectionNode, ConnectionRegistry, EntityStatus, StatusFilter, StringFilter,
    UuidFilter, field_selection, render_filter,
};

/// Text of `rendered` with every quoted string literal removed.
fn outside_string_literals(rendered: &str) -> String {
    let mut out = String::with_capacity(rendered.len());
    let mut in_literal = false;
    let mut escaped = false;
    for ch in rendered.chars() {
        if in_literal {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_literal = false;
            }
        } else if ch == '"' {
            in_literal = true;
        } else {
            out.push(ch);
        }
    }
    out
}

fn quoted(value: &str) -> String {
    serde_json::to_string(value).expect("quote string")
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

/// User-supplied text, biased towards underscores, quotes and backslashes.
fn value_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 _\"\\\\-]{0,24}",
        "__[a-zA-Z]{1,8}__",
        any::<String>(),
    ]
}

fn uuid_filter() -> impl Strategy<Value = UuidFilter> {
    (any::<bool>(), value_text()).prop_map(|(eq, value)| {
        if eq {
            UuidFilter::eq(value)
        } else {
            UuidFilter::neq(value)
        }
    })
}

fn string_filter() -> impl Strategy<Value = StringFilter> {
    (0u8..3, value_text(), proptest::option::of(any::<bool>())).prop_map(
        |(operator, value, case_insensitive)| {
            let filter = match operator {
                0 => StringFilter::eq(value),
                1 => StringFilter::neq(value),
                _ => StringFilter::contains(value),
            };
            match case_insensitive {
                Some(enabled) => filter.case_insensitive(enabled),
                None => filter,
            }
        },
    )
}

fn status_filter() -> impl Strategy<Value = StatusFilter> {
    (any::<bool>(), any::<bool>()).prop_map(|(eq, active)| {
        let status = if active {
            EntityStatus::Active
        } else {
            EntityStatus::Inactive
        };
        if eq {
            StatusFilter::eq(status)
        } else {
            StatusFilter::neq(status)
        }
    })
}

fn boolean_filter() -> impl Strategy<Value = BooleanFilter> {
    (any::<bool>(), any::<bool>()).prop_map(|(eq, value)| {
        if eq {
            BooleanFilter::eq(value)
        } else {
            BooleanFilter::neq(value)
        }
    })
}

fn program_filter() -> impl Strategy<Value = ProgramFilter> {
    (
        proptest::option::of(uuid_filter()),
        proptest::option::of(string_filter()),
        proptest::option::of(status_filter()),
        proptest::option::of(boolean_filter()),
        proptest::option::of(uuid_filter()),
    )
        .prop_map(|(id, name, status, system, organization_id)| ProgramFilter {
            id,
            name,
            status,
            system,
            organization_id,
            ..ProgramFilter::default()
        })
}

fn subject_filter() -> impl Strategy<Value = SubjectFilter> {
    (
        proptest::option::of(uuid_filter()),
        proptest::option::of(string_filter()),
        proptest::option::of(status_filter()),
        proptest::option::of(uuid_filter()),
    )
        .prop_map(|(id, name, status, category_id)| SubjectFilter {
            id,
            name,
            status,
            category_id,
            ..SubjectFilter::default()
        })
}

fn program_values(filter: &ProgramFilter) -> Vec<&str> {
    [
        filter.id.as_ref().map(|f| f.value.as_str()),
        filter.name.as_ref().map(|f| f.value.as_str()),
        filter.organization_id.as_ref().map(|f| f.value.as_str()),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn program_is_empty(filter: &ProgramFilter) -> bool {
    filter.id.is_none()
        && filter.name.is_none()
        && filter.status.is_none()
        && filter.system.is_none()
        && filter.organization_id.is_none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Property Tests: Leaf Rendering
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Delimiters never survive outside string literals.
    #[test]
    fn prop_program_leaves_have_no_markers(filter in program_filter()) {
        let rendered = render_filter(&filter).expect("render");
        prop_assert!(!outside_string_literals(&rendered).contains("__"), "{}", rendered);
    }

    /// Every user value is rendered as its own quoted literal.
    #[test]
    fn prop_program_values_stay_quoted(filter in program_filter()) {
        let rendered = render_filter(&filter).expect("render");
        for value in program_values(&filter) {
            let literal = quoted(value);
            prop_assert!(rendered.contains(&literal), "{} missing {}", rendered, literal);
        }
    }

    /// Only a filter with no predicate renders empty.
    #[test]
    fn prop_program_empty_iff_no_predicate(filter in program_filter()) {
        let rendered = render_filter(&filter).expect("render");
        prop_assert_eq!(rendered.is_empty(), program_is_empty(&filter));
        if !rendered.is_empty() {
            prop_assert!(rendered.starts_with('{') && rendered.ends_with('}'), "rendered = {}", rendered);
        }
    }

    /// Rendering is deterministic.
    #[test]
    fn prop_subject_rendering_is_stable(filter in subject_filter()) {
        let first = render_filter(&filter).expect("first");
        let second = render_filter(&filter).expect("second");
        prop_assert_eq!(&first, &second);
        prop_assert!(!outside_string_literals(&first).contains("__"));
    }

    /// Leaves nested in an OR group keep their values quoted.
    #[test]
    fn prop_or_group_keeps_values(left in program_filter(), right in program_filter()) {
        let values: Vec<String> = program_values(&left)
            .into_iter()
            .chain(program_values(&right))
            .map(quoted)
            .collect();
        let group = ProgramFilter {
            or: vec![left, right],
            ..ProgramFilter::default()
        };
        let rendered = render_filter(&group).expect("render");
        prop_assert!(rendered.starts_with("{OR: ["), "rendered = {}", rendered);
        prop_assert!(!outside_string_literals(&rendered).contains("__"));
        for literal in values {
            prop_assert!(rendered.contains(&literal));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Empty filters and field selection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn every_builtin_filter_renders_empty_by_default() {
    assert_eq!(render_filter(&ProgramFilter::default()).expect("program"), "");
    assert_eq!(render_filter(&OrganizationFilter::default()).expect("organization"), "");
    assert_eq!(render_filter(&SubcategoryFilter::default()).expect("subcategory"), "");
    assert_eq!(render_filter(&CategoryFilter::default()).expect("category"), "");
    assert_eq!(render_filter(&SubjectFilter::default()).expect("subject"), "");
}

fn json_keys<N: ConnectionNode>() -> BTreeSet<String> {
    match serde_json::to_value(N::default()).expect("serialize") {
        serde_json::Value::Object(object) => object.keys().cloned().collect(),
        other => panic!("node is not an object: {other}"),
    }
}

fn assert_selection<N: ConnectionNode>(expected: &str) {
    let selection = field_selection::<N>().expect("introspect");
    assert_eq!(selection.to_query_text(), expected);

    let selected: BTreeSet<String> = selection.fields().iter().cloned().collect();
    assert_eq!(selected.len(), selection.fields().len(), "duplicate field");
    assert_eq!(selected, json_keys::<N>());
}

#[test]
fn every_builtin_node_selects_exactly_its_json_fields() {
    assert_selection::<Program>("id name status system");
    assert_selection::<Organization>("id name status shortCode");
    assert_selection::<Subcategory>("id name status system");
    assert_selection::<Category>("id name status system");
    assert_selection::<Subject>("id name status system");
}

#[test]
fn registry_uses_the_introspected_selection() {
    let registry = ConnectionRegistry::with_defaults().expect("defaults");
    let organization = registry
        .resolve::<OrganizationFilter, Organization>()
        .expect("organization registered");
    assert_eq!(organization.selection().to_query_text(), "id name status shortCode");
    let subject = registry
        .resolve::<SubjectFilter, Subject>()
        .expect("subject registered");
    assert_eq!(subject.connection_name(), "subjectsConnection");
}
