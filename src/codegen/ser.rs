//! `toJson` bodies.
use super::{code, line, quote};
use crate::context::GenerationContext;
use crate::ir::{FieldEntry, TypeDescriptor};

pub fn render_to_json(fields: &[FieldEntry], ctx: &GenerationContext) -> String {
    let mut out = line(ctx, 1, "Map<String, dynamic> toJson() {");
    out += &code(ctx, 2, "final Map<String, dynamic> _data = <String, dynamic>{}");
    for f in fields {
        out += &render_field(f, ctx);
    }
    out += &code(ctx, 2, "return _data");
    out += &line(ctx, 1, "}");
    out
}

/// Write one field into `_data` under its original key.
pub fn render_field(f: &FieldEntry, ctx: &GenerationContext) -> String {
    let target = format!("_data[{}]", quote(&f.original_key));
    let name = &f.identifier_name;
    let value = match &f.descriptor {
        TypeDescriptor::Object { .. } => format!("{name}{}.toJson()", ctx.handler_symbol()),
        TypeDescriptor::Array { element: Some(el) } if !el.is_primitive() => {
            format!("{name}{}.map({}).toList()", ctx.handler_symbol(), element_encoder(el))
        }
        TypeDescriptor::Array { .. } => name.clone(),
        TypeDescriptor::Scalar(_) | TypeDescriptor::Null { .. } => {
            return code(ctx, 2, &format!("{target} = {name}"));
        }
    };
    let mut out = line(ctx, 2, &format!("if ({name} != null) {{"));
    out += &code(ctx, 3, &format!("{target} = {value}"));
    out += &line(ctx, 2, "}");
    out
}

fn element_encoder(el: &TypeDescriptor) -> String {
    match el {
        TypeDescriptor::Array { element: Some(inner) } => {
            format!("(e) => e?.map({})?.toList() ?? []", element_encoder(inner))
        }
        TypeDescriptor::Array { element: None } => "(e) => e".to_string(),
        _ => "(e) => e.toJson()".to_string(),
    }
}
