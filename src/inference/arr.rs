use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::context::GenerationContext;

/// Pick the one value an array's element type is inferred from.
///
/// - empty → `None`
/// - first-element mode, or a non-object first element → the first element
/// - merge mode → all object elements folded into one, non-null values only,
///   later elements overwriting earlier ones
pub fn representative_element<'v>(
    elements: &'v [Value],
    ctx: &GenerationContext,
) -> Option<Cow<'v, Value>> {
    let first = elements.first()?;
    if !ctx.merge_array_approach || !first.is_object() {
        return Some(Cow::Borrowed(first));
    }
    let merged = merge_objects(elements);
    tracing::debug!(elements = elements.len(), keys = merged.len(), "merged array elements");
    Some(Cow::Owned(Value::Object(merged)))
}

/// Union of the non-null entries of every object element. A key keeps the
/// position of its first appearance and the value of its last.
pub fn merge_objects(elements: &[Value]) -> Map<String, Value> {
    let mut acc = Map::new();
    for obj in elements.iter().filter_map(Value::as_object) {
        for (k, v) in obj {
            if !v.is_null() {
                acc.insert(k.clone(), v.clone());
            }
        }
    }
    acc
}
