//! Type inference and class synthesis engine.
//!
//! Walk one JSON value, decide a `TypeDescriptor` per field and emit a Dart
//! class for every object found along the way.
//!
//! - Synthesis is eager and depth-first: a nested object's class is rendered
//!   and registered before the field that refers to it gets its descriptor.
//! - All mutable state (allocated names, registered models) lives in one
//!   `Session`, so independent runs can go in parallel.
pub mod arr;
pub mod num;

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::codegen;
use crate::context::GenerationContext;
use crate::ir::{ClassModel, FieldEntry, ScalarKind, TypeDescriptor};
use crate::naming::NameAllocator;
use crate::registry::ModelRegistry;

// ------------------------------- Session ---------------------------------- //

pub struct Session<'a> {
    ctx: &'a GenerationContext,
    names: NameAllocator,
    registry: ModelRegistry,
}

impl<'a> Session<'a> {
    pub fn new(ctx: &'a GenerationContext) -> Self {
        Self { ctx, names: NameAllocator::new(), registry: ModelRegistry::new() }
    }

    /// Classify `value`, synthesizing classes for any objects it contains.
    pub fn infer(&mut self, key: &str, value: &Value) -> TypeDescriptor {
        match value {
            Value::Null => TypeDescriptor::Null {
                placeholder: self.ctx.null_value_data_type.clone(),
            },
            Value::Number(n) => TypeDescriptor::Scalar(num::classify(n)),
            Value::String(_) => TypeDescriptor::Scalar(ScalarKind::String),
            Value::Bool(_) => TypeDescriptor::Scalar(ScalarKind::Bool),
            Value::Array(xs) => match arr::representative_element(xs, self.ctx) {
                None => TypeDescriptor::empty_array(),
                Some(el) => TypeDescriptor::array_of(self.infer(key, &el)),
            },
            Value::Object(map) => {
                let class_name = self.names.allocate(key);
                self.synthesize(class_name.clone(), map);
                TypeDescriptor::Object { class_name }
            }
        }
    }

    /// Build, render and register the class for one object.
    fn synthesize(&mut self, class_name: String, map: &Map<String, Value>) {
        let mut members = NameAllocator::for_members();
        let mut fields = Vec::with_capacity(map.len());
        for (key, value) in map {
            let descriptor = self.infer(key, value);
            fields.push(FieldEntry {
                original_key: key.clone(),
                identifier_name: members.allocate(key),
                descriptor,
            });
        }
        let source_text = codegen::render_class(&class_name, &fields, self.ctx);
        let auxiliary_imports = codegen::render_imports(&class_name, &fields, self.ctx);
        self.registry.register(ClassModel { class_name, source_text, auxiliary_imports, fields });
    }

    /// Generate the root class (and everything below it) and hand back all models,
    /// root first.
    pub fn run(mut self, root_name: &str, value: &Value) -> Vec<ClassModel> {
        let class_name = self.names.allocate(root_name);
        let body = root_body(value, self.ctx);
        self.synthesize(class_name, &body);
        self.registry.results()
    }
}

/// Object the root class is built from. Scalars and empty arrays give no fields.
fn root_body<'v>(value: &'v Value, ctx: &GenerationContext) -> Cow<'v, Map<String, Value>> {
    let rep = match value {
        Value::Array(xs) => arr::representative_element(xs, ctx),
        other => Some(Cow::Borrowed(other)),
    };
    match rep {
        Some(Cow::Borrowed(Value::Object(map))) => Cow::Borrowed(map),
        Some(Cow::Owned(Value::Object(map))) => Cow::Owned(map),
        _ => Cow::Owned(Map::new()),
    }
}

// ------------------------------- Front API -------------------------------- //

/// One complete generation run with a fresh session.
pub fn generate(ctx: &GenerationContext, root_name: &str, value: &Value) -> Vec<ClassModel> {
    Session::new(ctx).run(root_name, value)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn names(models: &[ClassModel]) -> Vec<&str> {
        models.iter().map(|m| m.class_name.as_str()).collect()
    }

    fn field<'m>(model: &'m ClassModel, key: &str) -> &'m FieldEntry {
        model.fields.iter().find(|f| f.original_key == key).unwrap()
    }

    fn sample() -> Value {
        json!({
            "id": 17,
            "display_name": "Ada",
            "score": 9.5,
            "active": true,
            "nickname": null,
            "tags": ["a", "b"],
            "history": [],
            "owner": {"id": 1, "contact": {"email": "x@y.z"}},
            "items": [{"sku": "a1", "qty": 1}, {"sku": "b2", "note": "gift"}],
            "grid": [[{"x": 1}]],
        })
    }

    #[test]
    fn deterministic_output() {
        let ctx = GenerationContext { include_copy_with: true, include_from_list: true, ..Default::default() };
        let a = generate(&ctx, "root", &sample());
        let b = generate(&ctx, "root", &sample());
        assert_eq!(a, b);
        let text_a: String = a.iter().map(|m| m.source_text.as_str()).collect();
        let text_b: String = b.iter().map(|m| m.source_text.as_str()).collect();
        assert_eq!(text_a, text_b);
    }

    #[test]
    fn class_names_are_unique() {
        let v = json!({
            "item": {"item": {"item": {}}},
            "data": [{"item": {"v": 1}}],
        });
        let models = generate(&GenerationContext::default(), "item", &v);
        let set: HashSet<_> = names(&models).into_iter().collect();
        assert_eq!(set.len(), models.len());
    }

    #[test]
    fn scalar_round_trip_keeps_key_set() {
        let v = json!({"a": 1, "b_c": "x", "d": false, "e": 0.5});
        let models = generate(&GenerationContext::default(), "root", &v);
        assert_eq!(models.len(), 1);
        let keys: Vec<_> = models[0].fields.iter().map(|f| f.original_key.as_str()).collect();
        assert_eq!(keys, ["a", "b_c", "d", "e"]);
        for key in keys {
            assert!(models[0].source_text.contains(&format!("_data[\"{key}\"] =")));
        }
    }

    #[test]
    fn array_merge_completeness() {
        let v = json!({"rows": [{"a": 1}, {"b": 2}]});
        let models = generate(&GenerationContext::default(), "root", &v);
        let rows = models.iter().find(|m| m.class_name == "Rows").unwrap();
        let keys: Vec<_> = rows.fields.iter().map(|f| f.original_key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn array_first_element_mode() {
        let ctx = GenerationContext { merge_array_approach: false, ..Default::default() };
        let v = json!({"rows": [{"a": 1}, {"b": 2}]});
        let models = generate(&ctx, "root", &v);
        let rows = models.iter().find(|m| m.class_name == "Rows").unwrap();
        let keys: Vec<_> = rows.fields.iter().map(|f| f.original_key.as_str()).collect();
        assert_eq!(keys, ["a"]);
    }

    #[test]
    fn sibling_collision_suffixes_in_encounter_order() {
        let v = json!({"left": {"item": {"x": 1}}, "right": {"item": {"y": 2}}});
        let models = generate(&GenerationContext::default(), "root", &v);
        let left = models.iter().find(|m| m.class_name == "Left").unwrap();
        let right = models.iter().find(|m| m.class_name == "Right").unwrap();
        assert_eq!(field(left, "item").descriptor.type_name(), "Item");
        assert_eq!(field(right, "item").descriptor.type_name(), "Item1");
    }

    #[test]
    fn nested_ordering_root_first_deepest_last() {
        let v = json!({"user": {"address": {"city": "X"}}});
        let models = generate(&GenerationContext::default(), "root", &v);
        assert_eq!(names(&models), ["Root", "User", "Address"]);
    }

    #[test]
    fn null_placeholder() {
        let ctx = GenerationContext::default();
        let mut session = Session::new(&ctx);
        let d = session.infer("x", &Value::Null);
        assert_eq!(d, TypeDescriptor::Null { placeholder: "dynamic".into() });
        assert_eq!(d.type_name(), "dynamic");
        assert!(d.is_primitive());

        let ctx = GenerationContext { null_value_data_type: "Object".into(), ..Default::default() };
        let d = Session::new(&ctx).infer("x", &Value::Null);
        assert_eq!(d.type_name(), "Object");
    }

    #[test]
    fn empty_array_generates_nothing() {
        let ctx = GenerationContext::default();
        let mut session = Session::new(&ctx);
        let d = session.infer("history", &json!([]));
        assert_eq!(d.type_name(), "List<dynamic>");
        assert!(session.registry.is_empty());
    }

    #[test]
    fn descriptors_for_sample() {
        let models = generate(&GenerationContext::default(), "root", &sample());
        assert_eq!(names(&models), ["Root", "Grid", "Items", "Owner", "Contact"]);
        let root = &models[0];
        let expect = [
            ("id", "int"),
            ("display_name", "String"),
            ("score", "double"),
            ("active", "bool"),
            ("nickname", "dynamic"),
            ("tags", "List<String>"),
            ("history", "List<dynamic>"),
            ("owner", "Owner"),
            ("items", "List<Items>"),
            ("grid", "List<List<Grid>>"),
        ];
        for (key, ty) in expect {
            assert_eq!(field(root, key).descriptor.type_name(), ty, "{key}");
        }
        assert_eq!(field(root, "display_name").identifier_name, "displayName");
        assert!(field(root, "tags").descriptor.is_primitive());
        assert!(!field(root, "items").descriptor.is_primitive());
    }

    #[test]
    fn root_array_is_merged_into_root_class() {
        let v = json!([{"a": 1, "gone": null}, {"b": "x"}]);
        let models = generate(&GenerationContext::default(), "entry", &v);
        assert_eq!(names(&models), ["Entry"]);
        let keys: Vec<_> = models[0].fields.iter().map(|f| f.original_key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn root_scalar_gives_empty_class() {
        let models = generate(&GenerationContext::default(), "root", &json!(42));
        assert_eq!(models.len(), 1);
        assert!(models[0].fields.is_empty());
        assert!(models[0].source_text.starts_with("class Root {"));
    }

    #[test]
    fn root_name_is_reserved_before_children() {
        let v = json!({"root": {"x": 1}});
        let models = generate(&GenerationContext::default(), "root", &v);
        assert_eq!(names(&models), ["Root", "Root1"]);
    }

    #[test]
    fn json_key_does_not_shadow_from_json_parameter() {
        let models = generate(&GenerationContext::default(), "root", &json!({"json": "a", "other": 1}));
        let root = &models[0];
        assert_eq!(field(root, "json").identifier_name, "json1");
        assert!(root.source_text.contains("    json1 = json[\"json\"];\n    other = json[\"other\"];\n"));
        assert!(root.source_text.contains("_data[\"json\"] = json1;"));
    }

    #[test]
    fn member_names_are_unique_per_class() {
        let v = json!({"user_name": "a", "userName": "b", "toJson": 1});
        let models = generate(&GenerationContext::default(), "root", &v);
        let idents: Vec<_> = models[0].fields.iter().map(|f| f.identifier_name.as_str()).collect();
        assert_eq!(idents, ["userName", "userName1", "toJson1"]);
        assert_eq!(models[0].source_text.matches("String? userName;").count(), 1);
    }

    #[test]
    fn core_type_keys_get_suffixed_classes() {
        let models = generate(&GenerationContext::default(), "root", &json!({"map": {"a": 1}, "list": {"b": 2}}));
        assert_eq!(names(&models), ["Root", "List1", "Map1"]);
        assert!(models[0].source_text.contains("Map1? map;"));
        assert!(!models.iter().any(|m| m.source_text.contains("class Map {")));
    }

    #[test]
    fn imports_follow_package_setting() {
        let ctx = GenerationContext { package_import: Some("app/models".into()), ..Default::default() };
        let models = generate(&ctx, "root", &json!({"user": {"a": 1}, "users": [{"a": 1}]}));
        assert_eq!(
            models[0].auxiliary_imports.as_deref(),
            Some("import 'package:app/models/user.dart';\nimport 'package:app/models/users.dart';\n")
        );
        assert_eq!(models[1].auxiliary_imports, None);
    }
}
