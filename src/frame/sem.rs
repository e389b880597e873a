//! Sem handles returned by frame lookups.

use crate::types::{Proposition, Term};
use crate::vocab::{RDFS_COMMENT, RDFS_LABEL, RDF_TYPE};

/// Snapshot of a sem's description at lookup time
///
/// A sem has no lifecycle of its own; this handle is a read-only view of
/// the type, label and comment statements a frame held for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sem {
    uri: String,
    types: Vec<String>,
    labels: Vec<Term>,
    comments: Vec<Term>,
}

impl Sem {
    /// Build a handle from the statements having `uri` as subject.
    pub(crate) fn from_statements(uri: &str, statements: &[Proposition]) -> Self {
        let mut sem = Sem {
            uri: uri.to_string(),
            types: Vec::new(),
            labels: Vec::new(),
            comments: Vec::new(),
        };
        for p in statements.iter().filter(|p| p.subject == uri) {
            match p.predicate.as_str() {
                RDF_TYPE => {
                    if let Some(class) = p.object.as_resource() {
                        sem.types.push(class.to_string());
                    }
                }
                RDFS_LABEL => sem.labels.push(p.object.clone()),
                RDFS_COMMENT => sem.comments.push(p.object.clone()),
                _ => {}
            }
        }
        sem
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Taxonomy types asserted (or inferred) for this sem.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn labels(&self) -> &[Term] {
        &self.labels
    }

    pub fn comments(&self) -> &[Term] {
        &self.comments
    }

    /// First label in `lang`, or the first label at all when `lang` is `None`.
    pub fn label(&self, lang: Option<&str>) -> Option<&str> {
        pick(&self.labels, lang)
    }

    /// First comment in `lang`, or the first comment at all when `lang` is `None`.
    pub fn comment(&self, lang: Option<&str>) -> Option<&str> {
        pick(&self.comments, lang)
    }
}

fn pick<'a>(terms: &'a [Term], lang: Option<&str>) -> Option<&'a str> {
    terms.iter().find_map(|term| match term {
        Term::Literal { value, lang: tag } if lang.is_none() || tag.as_deref() == lang => {
            Some(value.as_str())
        }
        _ => None,
    })
}
