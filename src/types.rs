//! Core value types: terms, propositions, knowledge sets and patterns.

use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// Object position of a proposition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// A resource identified by URI (a sem, a class, a property).
    Resource(String),
    /// A plain literal with an optional language tag.
    Literal { value: String, lang: Option<String> },
}

impl Term {
    pub fn resource(uri: impl Into<String>) -> Self {
        Term::Resource(uri.into())
    }

    pub fn literal(value: impl Into<String>, lang: Option<&str>) -> Self {
        Term::Literal {
            value: value.into(),
            lang: lang.map(str::to_string),
        }
    }

    /// URI of this term when it names a resource.
    pub fn as_resource(&self) -> Option<&str> {
        match self {
            Term::Resource(uri) => Some(uri),
            Term::Literal { .. } => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Resource(uri) => write!(f, "<{}>", uri),
            Term::Literal { value, lang: Some(lang) } => write!(f, "{:?}@{}", value, lang),
            Term::Literal { value, lang: None } => write!(f, "{:?}", value),
        }
    }
}

/// A directed typed relation: (subject, predicate, object)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Proposition {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl Proposition {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }

    /// Proposition between two resources.
    pub fn relation(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self::new(subject, predicate, Term::Resource(object.into()))
    }

    /// True when `uri` appears in subject or (resource) object position.
    pub fn mentions(&self, uri: &str) -> bool {
        self.subject == uri || self.object.as_resource() == Some(uri)
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// A set of propositions, passed to and returned from learn/forget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Knowledge {
    statements: BTreeSet<Proposition>,
}

impl Knowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a proposition; returns false if it was already present.
    pub fn insert(&mut self, proposition: Proposition) -> bool {
        self.statements.insert(proposition)
    }

    pub fn remove(&mut self, proposition: &Proposition) -> bool {
        self.statements.remove(proposition)
    }

    pub fn contains(&self, proposition: &Proposition) -> bool {
        self.statements.contains(proposition)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Proposition> {
        self.statements.iter()
    }

    /// Add every proposition of `other`.
    pub fn extend_from(&mut self, other: &Knowledge) {
        self.statements.extend(other.statements.iter().cloned());
    }

    /// Propositions matching a pattern, in set order.
    pub fn matching(&self, pattern: &Pattern) -> Vec<Proposition> {
        self.statements
            .iter()
            .filter(|p| pattern.matches(p))
            .cloned()
            .collect()
    }
}

impl FromIterator<Proposition> for Knowledge {
    fn from_iter<I: IntoIterator<Item = Proposition>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl Extend<Proposition> for Knowledge {
    fn extend<I: IntoIterator<Item = Proposition>>(&mut self, iter: I) {
        self.statements.extend(iter);
    }
}

impl IntoIterator for Knowledge {
    type Item = Proposition;
    type IntoIter = btree_set::IntoIter<Proposition>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Knowledge {
    type Item = &'a Proposition;
    type IntoIter = btree_set::Iter<'a, Proposition>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// Triple pattern; `None` positions are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    pub subject: Option<String>,
    pub predicate: Option<String>,
    pub object: Option<Term>,
}

impl Pattern {
    /// Pattern matching every proposition.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn with_object(mut self, object: Term) -> Self {
        self.object = Some(object);
        self
    }

    pub fn matches(&self, proposition: &Proposition) -> bool {
        self.subject.as_deref().map_or(true, |s| s == proposition.subject)
            && self
                .predicate
                .as_deref()
                .map_or(true, |p| p == proposition.predicate)
            && self.object.as_ref().map_or(true, |o| *o == proposition.object)
    }
}
