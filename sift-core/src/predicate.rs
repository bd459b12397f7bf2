//! Predicate translation: turning a [`SearchSpec`] into one combined
//! predicate against a backend-supplied builder.

use crate::ast::{Criterion, Operator, SearchSpec, Value};
use crate::error::SiftError;

/// Capability interface the translation layer runs against.
///
/// A backend supplies entity references (the root and join targets),
/// attribute resolution, and the primitive boolean fragments; the
/// translation layer decides which fragments to build and how they
/// combine. [`SqlBuilder`](crate::sql::SqlBuilder) renders SQL through
/// this trait; any store able to satisfy it can substitute.
pub trait PredicateBuilder {
    /// Reference to the root entity or a join target.
    type Entity;
    /// A resolved attribute on an entity reference.
    type Attribute;
    /// One boolean fragment, or the combined predicate.
    type Predicate;

    /// Reference to the root entity the specification targets.
    fn root(&mut self) -> Self::Entity;

    /// Traverse the named relationship, producing a fresh entity
    /// reference. Called once per traversal per criterion; duplicate
    /// traversals are not coalesced at this layer.
    fn join(&mut self, from: &Self::Entity, relation: &str) -> Result<Self::Entity, SiftError>;

    /// Resolve a named attribute. Whether the attribute actually exists
    /// on the entity is the backend's concern.
    fn attribute(&mut self, entity: &Self::Entity, field: &str)
    -> Result<Self::Attribute, SiftError>;

    fn eq(&mut self, attr: Self::Attribute, value: &Value) -> Result<Self::Predicate, SiftError>;
    fn ne(&mut self, attr: Self::Attribute, value: &Value) -> Result<Self::Predicate, SiftError>;

    /// Wildcard match of `pattern` against the lowercased attribute.
    fn like(&mut self, attr: Self::Attribute, pattern: &str) -> Result<Self::Predicate, SiftError>;

    fn is_in(&mut self, attr: Self::Attribute, values: &[Value])
    -> Result<Self::Predicate, SiftError>;
    fn not_in(
        &mut self,
        attr: Self::Attribute,
        values: &[Value],
    ) -> Result<Self::Predicate, SiftError>;

    fn gt(&mut self, attr: Self::Attribute, value: &Value) -> Result<Self::Predicate, SiftError>;
    fn gte(&mut self, attr: Self::Attribute, value: &Value) -> Result<Self::Predicate, SiftError>;
    fn lt(&mut self, attr: Self::Attribute, value: &Value) -> Result<Self::Predicate, SiftError>;
    fn lte(&mut self, attr: Self::Attribute, value: &Value) -> Result<Self::Predicate, SiftError>;

    /// Conjunction of fragments. An empty list is the identity
    /// predicate: it matches every row, never none.
    fn and(&mut self, predicates: Vec<Self::Predicate>) -> Self::Predicate;
}

impl SearchSpec {
    /// Translate the contributing criteria into one combined predicate.
    ///
    /// A criterion contributes when its `only_if` condition holds and it
    /// either carries an operand or was marked strict; everything else
    /// is skipped as "filter not applied". Surviving fragments are
    /// ANDed in insertion order; with none left the result matches
    /// every row.
    pub fn to_predicate<B: PredicateBuilder>(
        &self,
        builder: &mut B,
    ) -> Result<B::Predicate, SiftError> {
        let mut fragments = Vec::new();
        for criterion in self.criteria().iter().filter(|c| c.contributes()) {
            fragments.push(translate(criterion, builder)?);
        }
        Ok(builder.and(fragments))
    }
}

fn translate<B: PredicateBuilder>(
    criterion: &Criterion,
    builder: &mut B,
) -> Result<B::Predicate, SiftError> {
    let (field, relations) = criterion
        .fields
        .split_last()
        .ok_or(SiftError::EmptyFieldPath)?;

    let mut entity = builder.root();
    for relation in relations {
        entity = builder.join(&entity, relation)?;
    }
    let attr = builder.attribute(&entity, field)?;

    match criterion.op {
        Operator::Eq => builder.eq(attr, &criterion.value),
        Operator::Ne => builder.ne(attr, &criterion.value),
        Operator::Like => match &criterion.value {
            Value::String(s) => builder.like(attr, &format!("%{}%", s.to_lowercase())),
            other => Err(SiftError::InvalidOperand {
                op: Operator::Like,
                expected: "string",
                found: other.kind(),
            }),
        },
        Operator::In => builder.is_in(attr, collection(criterion)?),
        Operator::NotIn => builder.not_in(attr, collection(criterion)?),
        Operator::Gt => builder.gt(attr, orderable(criterion)?),
        Operator::Gte => builder.gte(attr, orderable(criterion)?),
        Operator::Lt => builder.lt(attr, orderable(criterion)?),
        Operator::Lte => builder.lte(attr, orderable(criterion)?),
    }
}

fn collection(criterion: &Criterion) -> Result<&[Value], SiftError> {
    match &criterion.value {
        Value::Array(items) => Ok(items),
        other => Err(SiftError::InvalidOperand {
            op: criterion.op,
            expected: "array",
            found: other.kind(),
        }),
    }
}

fn orderable(criterion: &Criterion) -> Result<&Value, SiftError> {
    match &criterion.value {
        Value::Null | Value::Array(_) => Err(SiftError::InvalidOperand {
            op: criterion.op,
            expected: "orderable scalar",
            found: criterion.value.kind(),
        }),
        value => Ok(value),
    }
}
