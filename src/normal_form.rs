use std::fmt;

use serde::Serialize;

use crate::fd_ast::Violation;

/// Coarse classification. BCNF is never told apart from 3NF here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NormalForm {
    #[serde(rename = "1NF")]
    First,
    #[serde(rename = "2NF")]
    Second,
    #[serde(rename = "3NF+")]
    ThirdOrHigher,
}

impl NormalForm {
    pub fn label(self) -> &'static str {
        match self {
            NormalForm::First => "1NF",
            NormalForm::Second => "2NF",
            NormalForm::ThirdOrHigher => "3NF+",
        }
    }

    /// What holding this form means for the schema.
    pub fn description(self) -> &'static str {
        match self {
            NormalForm::First => {
                "Atomic values, but some attributes depend on only part of the composite key."
            }
            NormalForm::Second => {
                "No partial dependencies, but some non-key attributes depend on other non-key attributes."
            }
            NormalForm::ThirdOrHigher => {
                "No partial or transitive dependencies were found."
            }
        }
    }
}

impl fmt::Display for NormalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify(violations: &[Violation]) -> NormalForm {
    if violations.iter().any(Violation::is_partial) {
        NormalForm::First
    } else if violations.iter().any(Violation::is_transitive) {
        NormalForm::Second
    } else {
        NormalForm::ThirdOrHigher
    }
}

/// One stage of the normalization walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Unnormalized,
    First,
    Second,
    Third,
    Boyce,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Unnormalized,
        Step::First,
        Step::Second,
        Step::Third,
        Step::Boyce,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Step::Unnormalized => "Unnormalized",
            Step::First => "1NF",
            Step::Second => "2NF",
            Step::Third => "3NF",
            Step::Boyce => "BCNF",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Step::Unnormalized => "Unnormalized data with redundancy.",
            Step::First => "Atomic values, no repeating groups.",
            Step::Second => "No partial dependencies.",
            Step::Third => "No transitive dependencies.",
            Step::Boyce => "Every determinant is a candidate key.",
        }
    }

    pub fn next(self) -> Step {
        let i = self as usize;
        Step::ALL[(i + 1).min(Step::ALL.len() - 1)]
    }

    pub fn prev(self) -> Step {
        let i = self as usize;
        Step::ALL[i.saturating_sub(1)]
    }

    /// Last step a schema with `label` satisfies. `3NF+` stops at 3NF since
    /// BCNF is not checked.
    pub fn reached(label: NormalForm) -> Step {
        match label {
            NormalForm::First => Step::First,
            NormalForm::Second => Step::Second,
            NormalForm::ThirdOrHigher => Step::Third,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fd_ast::{AttributeSet, FunctionalDependency};

    fn fd(left: &str, right: &str) -> FunctionalDependency {
        FunctionalDependency::new(
            std::iter::once(left).collect::<AttributeSet>(),
            std::iter::once(right).collect::<AttributeSet>(),
        )
    }

    #[test]
    fn classify_empty_is_third() {
        assert_eq!(classify(&[]), NormalForm::ThirdOrHigher);
    }

    #[test]
    fn classify_partial_wins() {
        let v = vec![
            Violation::Transitive { from: fd("A", "B"), to: fd("B", "C") },
            Violation::Partial { dependency: fd("A", "D") },
        ];
        assert_eq!(classify(&v), NormalForm::First);
    }

    #[test]
    fn classify_transitive_only() {
        let v = vec![Violation::Transitive { from: fd("A", "B"), to: fd("B", "C") }];
        assert_eq!(classify(&v), NormalForm::Second);
    }

    #[test]
    fn labels() {
        assert_eq!(NormalForm::First.to_string(), "1NF");
        assert_eq!(NormalForm::Second.to_string(), "2NF");
        assert_eq!(NormalForm::ThirdOrHigher.to_string(), "3NF+");
    }

    #[test]
    fn label_serializes_as_text() {
        let json = serde_json::to_string(&NormalForm::ThirdOrHigher).unwrap();
        assert_eq!(json, "\"3NF+\"");
    }

    #[test]
    fn step_navigation_saturates() {
        assert_eq!(Step::Unnormalized.prev(), Step::Unnormalized);
        assert_eq!(Step::Unnormalized.next(), Step::First);
        assert_eq!(Step::Third.next(), Step::Boyce);
        assert_eq!(Step::Boyce.next(), Step::Boyce);
        assert_eq!(Step::Boyce.prev(), Step::Third);
    }

    #[test]
    fn step_reached_by_label() {
        assert_eq!(Step::reached(NormalForm::First), Step::First);
        assert_eq!(Step::reached(NormalForm::Second), Step::Second);
        assert_eq!(Step::reached(NormalForm::ThirdOrHigher), Step::Third);
    }
}
