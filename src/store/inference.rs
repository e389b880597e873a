//! Inference-enabled store wrapper
//!
//! Wraps any [`TripleStore`] and materializes entailed statements after each
//! insert or union. Derived statements are stored like asserted ones, so the
//! size delta a caller observes includes them. Removal never retracts
//! previously derived statements.

use crate::error::StoreError;
use crate::store::TripleStore;
use crate::types::{Knowledge, Pattern, Proposition, Term};
use crate::vocab::{RDFS_DOMAIN, RDFS_RANGE, RDFS_SUBCLASS_OF, RDFS_SUBPROPERTY_OF, RDF_TYPE};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Inference level applied when statements are added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferencePolicy {
    /// Store exactly what is asserted.
    None,
    /// RDFS entailment: class and property hierarchies, domain and range.
    #[default]
    Rdfs,
}

impl InferencePolicy {
    /// Statements entailed by `base` that are not already in it.
    pub fn derive(&self, base: &Knowledge) -> Knowledge {
        match self {
            InferencePolicy::None => Knowledge::new(),
            InferencePolicy::Rdfs => rdfs_closure(base),
        }
    }
}

/// Store wrapper applying an [`InferencePolicy`]
pub struct InferenceStore<S> {
    inner: S,
    policy: InferencePolicy,
}

impl<S: TripleStore> InferenceStore<S> {
    pub fn new(inner: S, policy: InferencePolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> InferencePolicy {
        self.policy
    }

    fn materialize(&mut self) -> Result<(), StoreError> {
        if self.policy == InferencePolicy::None {
            return Ok(());
        }
        let derived = self.policy.derive(&self.inner.statements()?);
        if !derived.is_empty() {
            tracing::trace!(derived = derived.len(), "Materialized entailed statements");
            self.inner.insert(&derived)?;
        }
        Ok(())
    }
}

impl<S: TripleStore> TripleStore for InferenceStore<S> {
    fn size(&self) -> Result<usize, StoreError> {
        self.inner.size()
    }

    fn query(&self, pattern: &Pattern) -> Result<Vec<Proposition>, StoreError> {
        self.inner.query(pattern)
    }

    fn insert(&mut self, statements: &Knowledge) -> Result<(), StoreError> {
        self.inner.insert(statements)?;
        self.materialize()
    }

    fn remove(&mut self, pattern: &Pattern) -> Result<(), StoreError> {
        self.inner.remove(pattern)
    }

    fn difference(&mut self, other: &Knowledge) -> Result<(), StoreError> {
        self.inner.difference(other)
    }

    fn release(&mut self) -> Result<(), StoreError> {
        self.inner.release()
    }

    fn union(&mut self, other: &Knowledge) -> Result<(), StoreError> {
        self.inner.union(other)?;
        self.materialize()
    }

    fn statements(&self) -> Result<Knowledge, StoreError> {
        self.inner.statements()
    }
}

/// Forward-chain the RDFS rules over `base` until nothing new is derived.
///
/// Returns only the newly derived statements.
pub fn rdfs_closure(base: &Knowledge) -> Knowledge {
    let mut all = base.clone();
    let mut derived = Knowledge::new();

    loop {
        let round: Vec<Proposition> = rdfs_round(&all)
            .into_iter()
            .filter(|p| !all.contains(p))
            .collect();
        if round.is_empty() {
            break;
        }
        for proposition in round {
            all.insert(proposition.clone());
            derived.insert(proposition);
        }
    }

    derived
}

fn edges<'a>(all: &'a Knowledge, predicate: &str) -> HashMap<&'a str, HashSet<&'a str>> {
    let mut map: HashMap<&str, HashSet<&str>> = HashMap::new();
    for p in all.iter().filter(|p| p.predicate == predicate) {
        if let Some(object) = p.object.as_resource() {
            map.entry(p.subject.as_str()).or_default().insert(object);
        }
    }
    map
}

fn rdfs_round(all: &Knowledge) -> Vec<Proposition> {
    let sub_class = edges(all, RDFS_SUBCLASS_OF);
    let sub_property = edges(all, RDFS_SUBPROPERTY_OF);
    let domain = edges(all, RDFS_DOMAIN);
    let range = edges(all, RDFS_RANGE);

    let mut out = Vec::new();

    // rdfs5 / rdfs11: transitivity
    for (hierarchy, predicate) in [
        (&sub_class, RDFS_SUBCLASS_OF),
        (&sub_property, RDFS_SUBPROPERTY_OF),
    ] {
        for (a, parents) in hierarchy {
            for b in parents {
                if let Some(grandparents) = hierarchy.get(b) {
                    for c in grandparents {
                        out.push(Proposition::relation(*a, predicate, *c));
                    }
                }
            }
        }
    }

    for p in all.iter() {
        // rdfs9: type propagation along subClassOf
        if p.predicate == RDF_TYPE {
            if let Some(class) = p.object.as_resource() {
                for parent in sub_class.get(class).into_iter().flatten() {
                    out.push(Proposition::relation(p.subject.as_str(), RDF_TYPE, *parent));
                }
            }
        }
        // rdfs7: property inheritance
        for parent in sub_property.get(p.predicate.as_str()).into_iter().flatten() {
            out.push(Proposition::new(p.subject.as_str(), *parent, p.object.clone()));
        }
        // rdfs2: domain
        for class in domain.get(p.predicate.as_str()).into_iter().flatten() {
            out.push(Proposition::relation(p.subject.as_str(), RDF_TYPE, *class));
        }
        // rdfs3: range, resources only
        if let Term::Resource(object) = &p.object {
            for class in range.get(p.predicate.as_str()).into_iter().flatten() {
                out.push(Proposition::relation(object.as_str(), RDF_TYPE, *class));
            }
        }
    }

    out
}
