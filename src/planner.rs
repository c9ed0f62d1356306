use tracing::debug;

use crate::fd_ast::*;

/// Suggests a decomposition: a main table holding the key and every
/// attribute no violation claims, then one satellite per violation.
///
/// Satellites are not merged even when two violations produce the same
/// attribute set.
pub fn plan(
    table_name: &str,
    attributes: &AttributeSet,
    primary_key: &AttributeSet,
    dependencies: &[FunctionalDependency],
    violations: &[Violation],
) -> Vec<SuggestedTable> {
    let claimed: AttributeSet = violations
        .iter()
        .flat_map(|v| v.associated().dependent.iter())
        .collect();

    let mut main_attrs = primary_key.clone();
    for a in attributes.iter() {
        if !primary_key.contains(a) && !claimed.contains(a) {
            main_attrs.insert(a);
        }
    }

    let main_deps = dependencies
        .iter()
        .filter(|fd| !violations.iter().any(|v| v.associated() == *fd))
        .filter(|fd| fd.attributes().is_subset_of(&main_attrs))
        .cloned()
        .collect();

    let mut tables = vec![SuggestedTable {
        name: table_name.to_string(),
        attributes: main_attrs,
        dependencies: main_deps,
    }];
    tables.extend(violations.iter().map(satellite));

    debug!(tables = tables.len(), "planned decomposition");
    tables
}

fn satellite(violation: &Violation) -> SuggestedTable {
    let fd = violation.associated();
    SuggestedTable {
        name: fd.dependent.first().unwrap_or_default().to_string(),
        attributes: fd.attributes(),
        dependencies: vec![fd.clone()],
    }
}
