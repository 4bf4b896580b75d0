use ifacemaker_parser::signature::{FieldGroup, render_fields};
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,6}"
}

fn type_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("int".to_string()),
        Just("error".to_string()),
        Just("*Box".to_string()),
        Just("[]byte".to_string()),
        Just("map[string]int".to_string()),
    ]
}

fn unnamed_group() -> impl Strategy<Value = FieldGroup> {
    type_name().prop_map(FieldGroup::unnamed)
}

fn any_group() -> impl Strategy<Value = FieldGroup> {
    (prop::collection::vec(ident(), 0..3), type_name())
        .prop_map(|(names, ty)| FieldGroup::named(names, ty))
}

proptest! {
    #[test]
    fn single_unnamed_group_is_not_merged(group in unnamed_group()) {
        let rendered = render_fields(std::slice::from_ref(&group));
        prop_assert!(!rendered.merged);
        prop_assert_eq!(rendered.as_results(), group.ty);
    }

    #[test]
    fn two_or_more_groups_always_merged(groups in prop::collection::vec(any_group(), 2..6)) {
        let rendered = render_fields(&groups);
        prop_assert!(rendered.merged);
        prop_assert_eq!(rendered.parts.len(), groups.len());
        prop_assert!(rendered.as_results().starts_with('('));
    }

    #[test]
    fn any_named_group_forces_merge(
        groups in prop::collection::vec(unnamed_group(), 0..3),
        names in prop::collection::vec(ident(), 1..3),
        ty in type_name(),
    ) {
        let mut groups = groups;
        groups.push(FieldGroup::named(names, ty));
        prop_assert!(render_fields(&groups).merged);
    }

    #[test]
    fn parts_preserve_group_order(groups in prop::collection::vec(any_group(), 0..6)) {
        let rendered = render_fields(&groups);
        for (part, group) in rendered.parts.iter().zip(&groups) {
            prop_assert!(part.ends_with(&group.ty));
            if let Some(first) = group.names.first() {
                prop_assert!(part.starts_with(first.as_str()));
            }
        }
    }
}

#[test]
fn empty_list_is_empty_and_unmerged() {
    let rendered = render_fields(&[]);
    assert!(rendered.parts.is_empty());
    assert!(!rendered.merged);
}
