use std::fmt;

use serde::Serialize;

use crate::normal_form::NormalForm;

/// Ordered attribute names without duplicates. Order only matters for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeSet(Vec<String>);

impl AttributeSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `name` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|a| a == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_subset_of(&self, other: &AttributeSet) -> bool {
        self.iter().all(|a| other.contains(a))
    }

    pub fn intersects(&self, other: &AttributeSet) -> bool {
        self.iter().any(|a| other.contains(a))
    }

    /// `self` followed by the members of `other` not already in `self`.
    pub fn union(&self, other: &AttributeSet) -> AttributeSet {
        let mut out = self.clone();
        for a in other.iter() {
            out.insert(a);
        }
        out
    }
}

impl<S: Into<String>> FromIterator<S> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionalDependency {
    pub determinant: AttributeSet,
    pub dependent: AttributeSet,
}

impl FunctionalDependency {
    pub fn new(determinant: AttributeSet, dependent: AttributeSet) -> Self {
        Self {
            determinant,
            dependent,
        }
    }

    /// Every attribute on either side.
    pub fn attributes(&self) -> AttributeSet {
        self.determinant.union(&self.dependent)
    }
}

impl fmt::Display for FunctionalDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.determinant, self.dependent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    Partial {
        dependency: FunctionalDependency,
    },
    Transitive {
        from: FunctionalDependency,
        to: FunctionalDependency,
    },
}

impl Violation {
    /// The dependency whose dependents move out to a satellite table.
    pub fn associated(&self) -> &FunctionalDependency {
        match self {
            Violation::Partial { dependency } => dependency,
            Violation::Transitive { to, .. } => to,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Violation::Partial { .. })
    }

    pub fn is_transitive(&self) -> bool {
        matches!(self, Violation::Transitive { .. })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Partial { dependency } => {
                write!(f, "partial dependency: {dependency}")
            }
            Violation::Transitive { from, to } => {
                write!(f, "transitive dependency: {to} (via {from})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedTable {
    pub name: String,
    pub attributes: AttributeSet,
    pub dependencies: Vec<FunctionalDependency>,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub table_name: String,
    pub label: NormalForm,
    pub primary_key: AttributeSet,
    pub dependencies: Vec<FunctionalDependency>,
    pub violations: Vec<Violation>,
    pub tables: Vec<SuggestedTable>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisInput {
    pub table_name: String,
    pub attributes: AttributeSet,
    pub primary_key: AttributeSet,
    /// Newline-delimited `left -> right` lines.
    pub dependencies: String,
}
