//! Dart source emission.
//!
//! Every method of a generated class is rendered by its own pure function of
//! `(class_name, fields, ctx)`. Layout depends only on nesting depth and
//! `ctx.indent_width`, so identical input renders byte-identically.
pub mod de;
pub mod ser;

use indexmap::IndexSet;

use crate::context::GenerationContext;
use crate::ir::FieldEntry;
use crate::naming::file_stem;

pub use de::render_from_json;
pub use ser::render_to_json;

/// Whole class: fields, constructor, `fromJson`, `fromList`?, `toJson`, `copyWith`?.
pub fn render_class(class_name: &str, fields: &[FieldEntry], ctx: &GenerationContext) -> String {
    let mut sections = Vec::new();
    if !fields.is_empty() {
        sections.push(render_fields(fields, ctx));
    }
    sections.push(render_constructor(class_name, fields, ctx));
    sections.push(render_from_json(class_name, fields, ctx));
    if ctx.include_from_list {
        sections.push(render_from_list(class_name, ctx));
    }
    sections.push(render_to_json(fields, ctx));
    if ctx.include_copy_with {
        sections.push(render_copy_with(class_name, fields, ctx));
    }
    format!("class {class_name} {{\n{}}}\n", sections.join("\n"))
}

pub fn render_fields(fields: &[FieldEntry], ctx: &GenerationContext) -> String {
    fields
        .iter()
        .map(|f| code(ctx, 1, &format!("{} {}", field_type(f, ctx), f.identifier_name)))
        .collect()
}

pub fn render_constructor(class_name: &str, fields: &[FieldEntry], ctx: &GenerationContext) -> String {
    if fields.is_empty() {
        return code(ctx, 1, &format!("{class_name}()"));
    }
    let params = fields
        .iter()
        .map(|f| format!("this.{}", f.identifier_name))
        .collect::<Vec<_>>()
        .join(", ");
    code(ctx, 1, &format!("{class_name}({{{params}}})"))
}

pub fn render_from_list(class_name: &str, ctx: &GenerationContext) -> String {
    let mut out = line(
        ctx,
        1,
        &format!("static List<{class_name}> fromList(List<Map<String, dynamic>> list) {{"),
    );
    out += &code(ctx, 2, &format!("return list.map({class_name}.fromJson).toList()"));
    out += &line(ctx, 1, "}");
    out
}

pub fn render_copy_with(class_name: &str, fields: &[FieldEntry], ctx: &GenerationContext) -> String {
    if fields.is_empty() {
        return code(ctx, 1, &format!("{class_name} copyWith() => {class_name}()"));
    }
    let mut out = line(ctx, 1, &format!("{class_name} copyWith({{"));
    for f in fields {
        out += &line(ctx, 2, &format!("{} {},", field_type(f, ctx), f.identifier_name));
    }
    out += &line(ctx, 1, &format!("}}) => {class_name}("));
    for f in fields {
        let name = &f.identifier_name;
        out += &line(ctx, 2, &format!("{name}: {name} ?? this.{name},"));
    }
    out += &line(ctx, 1, ");");
    out
}

/// `import` lines for the generated classes `fields` refer to, when a package is configured.
pub fn render_imports(
    class_name: &str,
    fields: &[FieldEntry],
    ctx: &GenerationContext,
) -> Option<String> {
    let package = ctx.package_import.as_deref()?;
    let referenced: IndexSet<&str> = fields
        .iter()
        .filter_map(|f| f.descriptor.referenced_class())
        .filter(|name| *name != class_name)
        .collect();
    if referenced.is_empty() {
        return None;
    }
    Some(
        referenced
            .into_iter()
            .map(|name| format!("import 'package:{package}/{}.dart';\n", file_stem(name)))
            .collect(),
    )
}

// ------------------------------- Helpers ---------------------------------- //

fn field_type(f: &FieldEntry, ctx: &GenerationContext) -> String {
    ctx.format_type(&f.descriptor.type_name())
}

/// Indented line.
fn line(ctx: &GenerationContext, depth: usize, text: &str) -> String {
    format!("{}{text}\n", ctx.indent(depth))
}

/// Indented statement.
fn code(ctx: &GenerationContext, depth: usize, text: &str) -> String {
    format!("{}{text};\n", ctx.indent(depth))
}

/// Dart string literal for a JSON key.
fn quote(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    out.push('"');
    for c in key.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
