//! Dotted property references.
//!
//! Collection change events name their property from the point of view of
//! the audited entity. A collection inside an embedded component is named
//! `component.field`; the component's own tree knows that field only by its
//! flattened name `component_field`.

use std::borrow::Cow;

/// Separator between a component's name and its fields' names.
pub const COMPONENT_SEPARATOR: &str = "_";

/// Returns the prefix fields of `component` are flattened under.
#[must_use]
pub fn component_prefix(component: &str) -> String {
    format!("{component}{COMPONENT_SEPARATOR}")
}

/// A reference split into the top-level key owning it and the name to hand
/// to that key's mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath<'a> {
    pub owner: &'a str,
    pub delegate: Cow<'a, str>,
}

/// Splits `reference` at its first dot.
///
/// Without a dot the reference names itself. Otherwise the part before the
/// dot is the owning component and the remainder is rewritten under the
/// component prefix; any further dots stay in the delegate name and are
/// resolved again by the nested tree.
#[must_use]
pub fn resolve(reference: &str) -> ResolvedPath<'_> {
    match reference.split_once('.') {
        Some((component, field)) => ResolvedPath {
            owner: component,
            delegate: Cow::Owned(format!("{}{field}", component_prefix(component))),
        },
        None => ResolvedPath {
            owner: reference,
            delegate: Cow::Borrowed(reference),
        },
    }
}
