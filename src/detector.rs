use tracing::debug;

use crate::fd_ast::*;

/// Finds partial and transitive dependencies.
///
/// Partials come first in dependency order, then transitives in ordered-pair
/// order. The transitive check is pairwise only, so a cycle `A -> B`,
/// `B -> A` with neither side in the key reports both directions.
pub fn detect(dependencies: &[FunctionalDependency], primary_key: &AttributeSet) -> Vec<Violation> {
    let mut violations: Vec<Violation> = dependencies
        .iter()
        .filter(|fd| is_partial(fd, primary_key))
        .map(|fd| Violation::Partial {
            dependency: fd.clone(),
        })
        .collect();
    let partials = violations.len();

    for (i, from) in dependencies.iter().enumerate() {
        for (j, to) in dependencies.iter().enumerate() {
            if i != j && is_transitive(from, to, primary_key) {
                violations.push(Violation::Transitive {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }
    }

    debug!(
        partial = partials,
        transitive = violations.len() - partials,
        "detected violations"
    );
    violations
}

fn is_partial(fd: &FunctionalDependency, primary_key: &AttributeSet) -> bool {
    primary_key.len() > 1
        && !fd.determinant.is_empty()
        && fd.determinant.len() < primary_key.len()
        && fd.determinant.is_subset_of(primary_key)
}

fn is_transitive(
    from: &FunctionalDependency,
    to: &FunctionalDependency,
    primary_key: &AttributeSet,
) -> bool {
    from.dependent.intersects(&to.determinant) && !to.determinant.intersects(primary_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> AttributeSet {
        names.iter().copied().collect()
    }

    fn fd(left: &[&str], right: &[&str]) -> FunctionalDependency {
        FunctionalDependency::new(set(left), set(right))
    }

    #[test]
    fn partial_on_composite_key() {
        let deps = vec![fd(&["A"], &["C"]), fd(&["A", "B"], &["D"])];
        let v = detect(&deps, &set(&["A", "B"]));
        assert_eq!(v, vec![Violation::Partial { dependency: deps[0].clone() }]);
    }

    #[test]
    fn no_partial_on_single_key() {
        let deps = vec![fd(&["A"], &["B"])];
        assert!(detect(&deps, &set(&["A"])).is_empty());
    }

    #[test]
    fn determinant_outside_key_is_not_partial() {
        let deps = vec![fd(&["A", "C"], &["D"])];
        let v = detect(&deps, &set(&["A", "B"]));
        assert!(v.iter().all(|v| !v.is_partial()));
    }

    #[test]
    fn transitive_through_non_key() {
        let deps = vec![fd(&["A"], &["B"]), fd(&["B"], &["C"])];
        let v = detect(&deps, &set(&["A"]));
        assert_eq!(
            v,
            vec![Violation::Transitive {
                from: deps[0].clone(),
                to: deps[1].clone(),
            }]
        );
    }

    #[test]
    fn determinant_touching_key_is_not_transitive() {
        let deps = vec![fd(&["A"], &["B"]), fd(&["B", "A"], &["C"])];
        assert!(detect(&deps, &set(&["A"])).is_empty());
    }

    #[test]
    fn cycle_reports_both_directions() {
        let deps = vec![fd(&["A"], &["B"]), fd(&["B"], &["A"])];
        let v = detect(&deps, &set(&["C"]));
        assert_eq!(v.len(), 2);
        assert!(v.iter().all(Violation::is_transitive));
        assert_eq!(v[0].associated(), &deps[1]);
        assert_eq!(v[1].associated(), &deps[0]);
    }

    #[test]
    fn partials_precede_transitives() {
        let deps = vec![fd(&["C"], &["D"]), fd(&["A"], &["C"])];
        let v = detect(&deps, &set(&["A", "B"]));
        assert_eq!(v.len(), 2);
        assert!(v[0].is_partial());
        assert!(v[1].is_transitive());
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        assert!(detect(&[], &set(&["A", "B"])).is_empty());
        assert!(detect(&[fd(&["A"], &["B"])], &AttributeSet::new()).is_empty());
    }
}
