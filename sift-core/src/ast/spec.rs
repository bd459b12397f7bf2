use serde::{Deserialize, Serialize};

use crate::ast::{Criterion, CriterionBuilder};

/// An ordered collection of filter criteria over one target entity,
/// assembled fluently and translated into a single conjunctive predicate
/// by [`to_predicate`](SearchSpec::to_predicate).
///
/// Building is a plain sequence of in-memory mutations; translation only
/// reads, so a fully-built spec can be re-evaluated any number of times.
///
/// # Example
/// ```
/// use sift_core::SearchSpec;
///
/// let author: Option<&str> = None;
/// let spec = SearchSpec::new()
///     .add(["title"]).like("prince")
///     .add(["author", "name"]).eq(author)   // None: filter not applied
///     .add(["year"]).only_if(false).gt(1950);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSpec {
    criteria: Vec<Criterion>,
}

impl SearchSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a criterion over `fields` and return its builder.
    ///
    /// Segments before the last cross a relationship; the last names the
    /// attribute read off the entity reached so far.
    ///
    /// # Panics
    /// Panics if `fields` is empty.
    pub fn add<S: Into<String>>(self, fields: impl IntoIterator<Item = S>) -> CriterionBuilder {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        assert!(
            !fields.is_empty(),
            "a criterion needs at least one field segment"
        );
        CriterionBuilder::new(self, fields)
    }

    /// The registered criteria, in insertion order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub(crate) fn push(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }
}
