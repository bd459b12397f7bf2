use serde::{Deserialize, Serialize};

use crate::ast::{Operator, SearchSpec, Value};

/// One configured filter condition: a field path, an operator with its
/// operand, and the flags deciding whether it contributes to the
/// combined predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Path segments; every segment before the last crosses a
    /// relationship, the last names the attribute. Never empty when
    /// built through [`SearchSpec::add`].
    pub fields: Vec<String>,
    pub op: Operator,
    pub value: Value,
    /// When false the criterion is skipped wholesale (`only_if`).
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// A strict criterion applies even with an empty array operand,
    /// forcing an empty result instead of skipping the filter.
    #[serde(default)]
    pub strict: bool,
}

fn default_true() -> bool {
    true
}

impl Criterion {
    /// Whether an operand is present: non-null, and non-empty in the
    /// case of an array.
    pub fn has_value(&self) -> bool {
        match &self.value {
            Value::Null => false,
            Value::Array(items) => !items.is_empty(),
            _ => true,
        }
    }

    /// Whether this criterion takes part in the combined predicate.
    pub fn contributes(&self) -> bool {
        self.enabled && (self.strict || self.has_value())
    }
}

/// Builder for one criterion, returned by [`SearchSpec::add`].
///
/// Owns the specification while the criterion is half-built; every
/// operator method finalizes the criterion into the spec and hands the
/// spec back for chaining. A criterion without an operator therefore
/// never reaches translation.
#[derive(Debug)]
pub struct CriterionBuilder {
    spec: SearchSpec,
    fields: Vec<String>,
    enabled: bool,
    strict: bool,
}

impl CriterionBuilder {
    pub(crate) fn new(spec: SearchSpec, fields: Vec<String>) -> Self {
        Self {
            spec,
            fields,
            enabled: true,
            strict: false,
        }
    }

    /// Apply this criterion only when `condition` holds; otherwise it is
    /// recorded but never contributes.
    pub fn only_if(mut self, condition: bool) -> Self {
        self.enabled = condition;
        self
    }

    fn apply(mut self, op: Operator, value: Value) -> SearchSpec {
        self.spec.push(Criterion {
            fields: self.fields,
            op,
            value,
            enabled: self.enabled,
            strict: self.strict,
        });
        self.spec
    }

    /// attribute = operand
    pub fn eq(self, value: impl Into<Value>) -> SearchSpec {
        self.apply(Operator::Eq, value.into())
    }

    /// attribute != operand
    pub fn ne(self, value: impl Into<Value>) -> SearchSpec {
        self.apply(Operator::Ne, value.into())
    }

    /// Case-insensitive substring match against a textual attribute.
    pub fn like(self, value: impl Into<String>) -> SearchSpec {
        self.apply(Operator::Like, Value::String(value.into()))
    }

    /// attribute IN (operands)
    pub fn is_in<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> SearchSpec {
        let items: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.apply(Operator::In, Value::Array(items))
    }

    /// attribute NOT IN (operands)
    pub fn not_in<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> SearchSpec {
        let items: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.apply(Operator::NotIn, Value::Array(items))
    }

    /// IN that still applies when the operand list is empty, so an empty
    /// list means "match nothing" rather than "filter not applied".
    pub fn strictly_in<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> SearchSpec {
        self.strict = true;
        let items: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.apply(Operator::In, Value::Array(items))
    }

    /// attribute > operand
    pub fn gt(self, value: impl Into<Value>) -> SearchSpec {
        self.apply(Operator::Gt, value.into())
    }

    /// attribute >= operand
    pub fn gte(self, value: impl Into<Value>) -> SearchSpec {
        self.apply(Operator::Gte, value.into())
    }

    /// attribute < operand
    pub fn lt(self, value: impl Into<Value>) -> SearchSpec {
        self.apply(Operator::Lt, value.into())
    }

    /// attribute <= operand
    pub fn lte(self, value: impl Into<Value>) -> SearchSpec {
        self.apply(Operator::Lte, value.into())
    }
}
