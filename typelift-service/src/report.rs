//! Textual hierarchy report
//!
//! A pure read over an emitted descriptor sequence: for each type, its own
//! fields and the chain of its ancestors' fields. Presentation only; the
//! resolution pipeline does not depend on this module.

use std::collections::HashMap;
use std::fmt::Write as _;
use typelift_core::{TypeDescriptor, TypeParent};

/// Render the descriptor sequence as an indented hierarchy report
///
/// Ancestors emitted within the same sequence are expanded with their own
/// fields; registry parents and marker placeholders are named but not
/// expanded, since their declarations live outside the sequence.
#[must_use]
pub fn hierarchy_report(descriptors: &[TypeDescriptor]) -> String {
    let by_name: HashMap<&str, &TypeDescriptor> = descriptors
        .iter()
        .map(|d| (d.name.as_str(), d))
        .collect();

    let mut report = String::new();
    for descriptor in descriptors {
        let _ = writeln!(report, "{}", descriptor.name);
        let _ = writeln!(report, "  own: {}", join_fields(&descriptor.own_fields));

        let mut indent = 2;
        let mut parent = descriptor.parent.as_ref();
        while let Some(link) = parent {
            let pad = " ".repeat(indent);
            match link {
                TypeParent::Class(name) => match by_name.get(name.as_str()) {
                    Some(ancestor) => {
                        let _ = writeln!(
                            report,
                            "{pad}{} (inherits: {})",
                            ancestor.name,
                            join_fields(&ancestor.own_fields)
                        );
                        parent = ancestor.parent.as_ref();
                    }
                    None => {
                        let _ = writeln!(report, "{pad}{name} (external base)");
                        parent = None;
                    }
                },
                TypeParent::Marker(name) => {
                    let _ = writeln!(report, "{pad}{name} (marker)");
                    parent = None;
                }
            }
            indent += 2;
        }
    }
    report
}

fn join_fields(fields: &[String]) -> String {
    if fields.is_empty() {
        "(none)".to_string()
    } else {
        fields.join(", ")
    }
}
