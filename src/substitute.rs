//! Field-type substitution: replace references to rewritten enums with `uint32`/`uint64`.
//!
//! Only identifiers in type position are touched: the first token on a line
//! (optionally after `optional`/`required`/`repeated`) followed by a field name.
//! Values, longer identifiers, comments and strings never match.

use crate::error::TransformError;
use crate::parser::parse;
use crate::rewrite::TypeSubstitutionMap;

pub fn substitute_types(source: &str, types: &TypeSubstitutionMap) -> Result<String, TransformError> {
    if types.is_empty() {
        return Ok(source.to_string());
    }
    let schema = parse(source)?;
    let mut errors = Vec::new();
    let mut out = String::with_capacity(source.len());
    let mut copied = 0;

    for type_ref in &schema.type_refs {
        let Some(bitmask) = types.get(&type_ref.name) else {
            continue;
        };
        let declared = schema.declaration_count(&type_ref.name);
        if declared > bitmask.declarations {
            errors.push(TransformError::AmbiguousSubstitution {
                name: type_ref.name.clone(),
                line: type_ref.line,
                reason: format!(
                    "{} declarations share the name but only {} {} a bitmap enum",
                    declared,
                    bitmask.declarations,
                    if bitmask.declarations == 1 { "is" } else { "are" }
                ),
            });
            continue;
        }
        tracing::trace!(name = %type_ref.name, line = type_ref.line, width = %bitmask.width, "substituted field type");
        out.push_str(&source[copied..type_ref.span.start]);
        out.push_str(bitmask.width.keyword());
        copied = type_ref.span.end;
    }
    TransformError::aggregate(errors)?;

    out.push_str(&source[copied..]);
    Ok(out)
}
