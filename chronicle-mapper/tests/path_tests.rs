use chronicle_mapper::path::{ResolvedPath, component_prefix, resolve};
use chronicle_mapper::{Mapper, PropertyMapperTree};
use chronicle_types::PropertyKey;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn component_prefix_appends_separator() {
    assert_eq!(component_prefix("addr"), "addr_");
}

#[test]
fn plain_reference_names_itself() {
    let path = resolve("city");
    assert_eq!(path.owner, "city");
    assert_eq!(path.delegate, "city");
}

#[test]
fn dotted_reference_is_rewritten_under_component_prefix() {
    assert_eq!(
        resolve("addr.city"),
        ResolvedPath {
            owner: "addr",
            delegate: "addr_city".into(),
        }
    );
}

#[test]
fn only_first_dot_splits() {
    let path = resolve("addr.geo.points");
    assert_eq!(path.owner, "addr");
    assert_eq!(path.delegate, "addr_geo.points");

    let inner = resolve(&path.delegate);
    assert_eq!(inner.owner, "addr_geo");
    assert_eq!(inner.delegate, "addr_geo_points");
}

#[test]
fn resolved_names_match_registered_component_fields() {
    let mut tree = PropertyMapperTree::new();
    tree.add(PropertyKey::new("city"));
    tree.add_component(PropertyKey::new("addr"), "Address")
        .unwrap()
        .add(PropertyKey::new("city"));

    let path = resolve("addr.city");
    let composite = tree.get(path.owner).and_then(Mapper::as_composite).unwrap();
    assert!(composite.delegate().contains(&path.delegate));

    let plain = resolve("city");
    assert!(matches!(tree.get(plain.owner), Some(Mapper::Leaf(_))));
}

#[test]
fn owns_accepts_dotted_references() {
    let mut tree = PropertyMapperTree::new();
    tree.add_component(PropertyKey::new("addr"), "Address").unwrap();
    assert!(tree.owns("addr.tags"));
    assert!(tree.owns("addr"));
    assert!(!tree.owns("ghost.items"));
}

proptest! {
    #[test]
    fn undotted_reference_resolves_to_itself(reference in "[a-zA-Z_]{1,20}") {
        let path = resolve(&reference);
        prop_assert_eq!(path.owner, reference.as_str());
        prop_assert_eq!(path.delegate.as_ref(), reference.as_str());
    }

    #[test]
    fn dotted_reference_splits_at_first_dot(
        component in "[a-z]{1,10}",
        field in "[a-z.]{0,10}",
    ) {
        let reference = format!("{component}.{field}");
        let path = resolve(&reference);
        prop_assert_eq!(path.owner, component.as_str());
        prop_assert_eq!(path.delegate.into_owned(), format!("{component}_{field}"));
    }
}
