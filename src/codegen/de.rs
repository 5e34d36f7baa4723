//! `fromJson` bodies.
use super::{code, line, quote};
use crate::context::GenerationContext;
use crate::ir::{FieldEntry, ScalarKind, TypeDescriptor};

pub fn render_from_json(class_name: &str, fields: &[FieldEntry], ctx: &GenerationContext) -> String {
    let mut out = line(ctx, 1, &format!("{class_name}.fromJson(Map<String, dynamic> json) {{"));
    for f in fields {
        out += &render_field(f, ctx);
    }
    out += &line(ctx, 1, "}");
    out
}

/// Assignment for one field, wrapped in a shape check when `should_check_type` is on.
pub fn render_field(f: &FieldEntry, ctx: &GenerationContext) -> String {
    let raw = format!("json[{}]", quote(&f.original_key));
    let assign = format!("{} = {}", f.identifier_name, decode_expr(&f.descriptor, &raw, ctx));
    match type_guard(&f.descriptor, &raw, ctx) {
        None => code(ctx, 2, &assign),
        Some(guard) => {
            let mut out = line(ctx, 2, &format!("if ({guard}) {{"));
            out += &code(ctx, 3, &assign);
            out += &line(ctx, 2, "}");
            out
        }
    }
}

/// Runtime shape test for `raw`; `dynamic` fields are never guarded.
fn type_guard(d: &TypeDescriptor, raw: &str, ctx: &GenerationContext) -> Option<String> {
    let type_name = d.type_name();
    if !ctx.should_check_type || type_name == "dynamic" {
        return None;
    }
    let shape = match d {
        TypeDescriptor::Object { .. } => "Map",
        TypeDescriptor::Array { .. } => "List",
        _ if ctx.use_num && d.is_numeric() => "num",
        _ => type_name.as_str(),
    };
    Some(format!("{raw} is {shape}"))
}

pub fn decode_expr(d: &TypeDescriptor, raw: &str, ctx: &GenerationContext) -> String {
    match d {
        TypeDescriptor::Object { class_name } => {
            format!("{raw} == null ? null : {class_name}.fromJson({raw})")
        }
        TypeDescriptor::Array { element: None } => format!("{raw} ?? []"),
        TypeDescriptor::Array { element: Some(el) } if d.is_primitive() => {
            format!("{raw} == null ? null : List<{}>.from({raw})", el.type_name())
        }
        TypeDescriptor::Array { element: Some(el) } => {
            format!("{raw} == null ? null : ({raw} as List).map({}).toList()", element_decoder(el))
        }
        TypeDescriptor::Scalar(kind) if ctx.use_num && kind.is_numeric() => {
            let method = if *kind == ScalarKind::Int { "toInt" } else { "toDouble" };
            format!("({raw} as num).{method}()")
        }
        TypeDescriptor::Scalar(_) | TypeDescriptor::Null { .. } => raw.to_string(),
    }
}

/// Closure turning one raw element of a non-primitive list into its typed value.
fn element_decoder(el: &TypeDescriptor) -> String {
    match el {
        TypeDescriptor::Array { element: Some(inner) } => {
            format!("(e) => e == null ? [] : (e as List).map({}).toList()", element_decoder(inner))
        }
        TypeDescriptor::Array { element: None } => "(e) => e ?? []".to_string(),
        other => format!("(e) => {}.fromJson(e)", other.type_name()),
    }
}
