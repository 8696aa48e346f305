//! Local `$ref` resolution.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::OpenApiError;

/// Resolves `#/...` references against the document root.
pub(crate) struct Resolver<'a> {
    root: &'a Value,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Follow a chain of references to a concrete node.
    pub(crate) fn deref(&self, value: &'a Value) -> Result<&'a Value, OpenApiError> {
        let mut current = value;
        let mut seen: Vec<&str> = Vec::new();
        while let Some(reference) = ref_of(current) {
            if seen.contains(&reference) {
                return Err(OpenApiError::CyclicRef(reference.to_owned()));
            }
            seen.push(reference);
            current = self.lookup(reference)?;
        }
        Ok(current)
    }

    fn lookup(&self, reference: &str) -> Result<&'a Value, OpenApiError> {
        reference
            .strip_prefix('#')
            .and_then(|pointer| self.root.pointer(pointer))
            .ok_or_else(|| OpenApiError::UnresolvedRef(reference.to_owned()))
    }

    /// Copy of `value` with references inlined.
    ///
    /// A reference to a schema that is already being expanded is left as a
    /// `$ref` node. Unresolvable references are kept as is.
    pub(crate) fn expand(&self, value: &Value) -> Value {
        self.expand_inner(value, &mut Vec::new())
    }

    fn expand_inner(&self, value: &Value, stack: &mut Vec<String>) -> Value {
        match value {
            Value::Object(map) => {
                if let Some(reference) = ref_of(value) {
                    if stack.iter().any(|r| r == reference) {
                        return value.clone();
                    }
                    return match self.lookup(reference) {
                        Ok(target) => {
                            stack.push(reference.to_owned());
                            let expanded = self.expand_inner(target, stack);
                            stack.pop();
                            expanded
                        }
                        Err(e) => {
                            warn!(error = %e, "Leaving reference unresolved");
                            value.clone()
                        }
                    };
                }
                Value::Object(
                    map.iter()
                        .map(|(k, v)| (k.clone(), self.expand_inner(v, stack)))
                        .collect::<Map<_, _>>(),
                )
            }
            Value::Array(items) => {
                Value::Array(items.iter().map(|v| self.expand_inner(v, stack)).collect())
            }
            other => other.clone(),
        }
    }
}

fn ref_of(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}
