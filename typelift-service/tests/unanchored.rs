//! End-to-end unanchored resolution scenarios

use pretty_assertions::assert_eq;
use typelift_core::{ColumnSet, TypeDescriptor, TypeParent};
use typelift_service::prelude::*;

fn sorted(fields: &[String]) -> Vec<String> {
    let mut fields = fields.to_vec();
    fields.sort();
    fields
}

fn find<'a>(descriptors: &'a [TypeDescriptor], name: &str) -> &'a TypeDescriptor {
    descriptors
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| panic!("descriptor '{name}' not emitted"))
}

#[test]
fn shared_field_pairs_become_roots_and_inputs_derive_from_them() {
    let service = TypeLiftService::new();
    let descriptors = service
        .resolve_unanchored(&[
            ColumnSet::named("Audit", ["Id", "DateCreated", "DateDeleted"]),
            ColumnSet::named("Customer", ["Id", "DateCreated", "Name"]),
            ColumnSet::named("Tag", ["Id", "Name"]),
        ])
        .expect("resolution succeeds");

    // Two recurring pairs become root-level bases
    let roots: Vec<&TypeDescriptor> = descriptors.iter().filter(|d| d.is_root()).collect();
    assert!(roots.len() >= 2, "expected at least two roots, got {roots:?}");
    let root_field_sets: Vec<Vec<String>> =
        roots.iter().map(|d| sorted(&d.own_fields)).collect();
    assert!(root_field_sets.contains(&vec!["DateCreated".to_string(), "Id".to_string()]));
    assert!(root_field_sets.contains(&vec!["Id".to_string(), "Name".to_string()]));

    // Derived types declare only the fields their base does not supply
    let audit = find(&descriptors, "Audit");
    assert_eq!(audit.own_fields, vec!["DateDeleted"]);
    let audit_parent = audit.parent.as_ref().expect("Audit has a parent");
    assert_eq!(
        sorted(&find(&descriptors, audit_parent.name()).own_fields),
        vec!["DateCreated".to_string(), "Id".to_string()]
    );

    let customer = find(&descriptors, "Customer");
    assert_eq!(customer.own_fields, vec!["Name"]);

    // Tag is set-equal to the {Id,Name} base; everything is inherited
    let tag = find(&descriptors, "Tag");
    assert!(tag.own_fields.is_empty());
    let tag_parent = tag.parent.as_ref().expect("Tag has a parent");
    assert_eq!(
        sorted(&find(&descriptors, tag_parent.name()).own_fields),
        vec!["Id".to_string(), "Name".to_string()]
    );
}

#[test]
fn every_parent_precedes_its_children() {
    let service = TypeLiftService::new();
    let descriptors = service
        .resolve_unanchored(&[
            ColumnSet::new(["A", "B", "C", "D"]),
            ColumnSet::new(["A", "B", "C", "E"]),
            ColumnSet::new(["A", "B", "F"]),
            ColumnSet::new(["A", "B"]),
        ])
        .expect("resolution succeeds");

    for (position, descriptor) in descriptors.iter().enumerate() {
        if let Some(TypeParent::Class(parent)) = &descriptor.parent {
            let parent_position = descriptors
                .iter()
                .position(|d| &d.name == parent)
                .unwrap_or_else(|| panic!("parent '{parent}' not emitted"));
            assert!(
                parent_position < position,
                "parent '{parent}' emitted after child '{}'",
                descriptor.name
            );
        }
    }
}

#[test]
fn chain_union_restores_each_input_field_set() {
    let inputs = vec![
        ColumnSet::named("Audit", ["Id", "DateCreated", "DateDeleted"]),
        ColumnSet::named("Customer", ["Id", "DateCreated", "Name"]),
        ColumnSet::named("Tag", ["Id", "Name"]),
    ];
    let service = TypeLiftService::new();
    let descriptors = service
        .resolve_unanchored(&inputs)
        .expect("resolution succeeds");

    for input in &inputs {
        let name = input.name.as_deref().expect("inputs are named");
        let mut collected: Vec<String> = Vec::new();
        let mut current = Some(find(&descriptors, name));
        while let Some(descriptor) = current {
            for field in &descriptor.own_fields {
                assert!(
                    !collected.contains(field),
                    "field '{field}' declared twice along the chain of '{name}'"
                );
                collected.push(field.clone());
            }
            current = match &descriptor.parent {
                Some(TypeParent::Class(parent)) => Some(find(&descriptors, parent)),
                _ => None,
            };
        }
        assert_eq!(sorted(&collected), sorted(&input.fields));
    }
}

#[test]
fn resolution_is_deterministic_for_a_fixed_input_order() {
    let inputs = vec![
        ColumnSet::new(["Id", "DateCreated", "DateDeleted"]),
        ColumnSet::new(["Id", "DateCreated", "Name"]),
        ColumnSet::new(["Id", "Name"]),
    ];
    let service = TypeLiftService::new();
    let first = service.resolve_unanchored(&inputs).expect("first run");
    let second = service.resolve_unanchored(&inputs).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn inputs_with_nothing_in_common_are_emitted_as_roots() {
    let service = TypeLiftService::new();
    let descriptors = service
        .resolve_unanchored(&[
            ColumnSet::named("Left", ["A", "B"]),
            ColumnSet::named("Right", ["C", "D"]),
        ])
        .expect("resolution succeeds");

    assert_eq!(descriptors.len(), 2);
    assert!(descriptors.iter().all(TypeDescriptor::is_root));
    assert_eq!(find(&descriptors, "Left").own_fields, vec!["A", "B"]);
}

#[test]
fn emitted_source_sketch_reflects_the_hierarchy() {
    let service = TypeLiftService::new();
    let mut emitter = SourceTextEmitter::new();
    service
        .resolve_unanchored_into(
            &[
                ColumnSet::named("Audit", ["Id", "DateCreated", "DateDeleted"]),
                ColumnSet::named("Customer", ["Id", "DateCreated", "Name"]),
            ],
            &mut emitter,
        )
        .expect("resolution succeeds");

    let source = emitter.source();
    assert!(source.contains("type Audit extends "));
    assert!(source.contains("    DateDeleted;"));
}

#[test]
fn hierarchy_report_lists_own_and_inherited_fields() {
    let service = TypeLiftService::new();
    let descriptors = service
        .resolve_unanchored(&[
            ColumnSet::named("Audit", ["Id", "DateCreated", "DateDeleted"]),
            ColumnSet::named("Customer", ["Id", "DateCreated", "Name"]),
        ])
        .expect("resolution succeeds");

    let report = hierarchy_report(&descriptors);
    assert!(report.contains("Audit"));
    assert!(report.contains("own: DateDeleted"));
    assert!(report.contains("inherits: Id, DateCreated"));
}
