// Inferred type model and generated class records. No serde_json::Value here.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Int,
    Double,
    String,
    Bool,
}

impl ScalarKind {
    pub fn type_name(self) -> &'static str {
        match self {
            ScalarKind::Int => "int",
            ScalarKind::Double => "double",
            ScalarKind::String => "String",
            ScalarKind::Bool => "bool",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ScalarKind::Int | ScalarKind::Double)
    }
}

/// Inferred shape of one JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum TypeDescriptor {
    Null { placeholder: String },       // observed only as null
    Scalar(ScalarKind),
    Array { element: Option<Box<TypeDescriptor>> }, // None: empty, element unknown
    Object { class_name: String },      // refers to a generated class
}

/// Element type name used when an array was observed empty.
pub const UNKNOWN_ELEMENT: &str = "dynamic";

impl TypeDescriptor {
    pub fn array_of(element: TypeDescriptor) -> Self {
        TypeDescriptor::Array { element: Some(Box::new(element)) }
    }

    pub fn empty_array() -> Self {
        TypeDescriptor::Array { element: None }
    }

    pub fn type_name(&self) -> String {
        match self {
            TypeDescriptor::Null { placeholder } => placeholder.clone(),
            TypeDescriptor::Scalar(kind) => kind.type_name().to_string(),
            TypeDescriptor::Array { element: Some(el) } => format!("List<{}>", el.type_name()),
            TypeDescriptor::Array { element: None } => format!("List<{UNKNOWN_ELEMENT}>"),
            TypeDescriptor::Object { class_name } => class_name.clone(),
        }
    }

    /// Arrays inherit primitiveness from their element; an empty array is not primitive.
    pub fn is_primitive(&self) -> bool {
        match self {
            TypeDescriptor::Null { .. } | TypeDescriptor::Scalar(_) => true,
            TypeDescriptor::Array { element } => {
                element.as_deref().is_some_and(TypeDescriptor::is_primitive)
            }
            TypeDescriptor::Object { .. } => false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeDescriptor::Scalar(kind) if kind.is_numeric())
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeDescriptor::Array { .. })
    }

    pub fn is_object(&self) -> bool {
        matches!(self, TypeDescriptor::Object { .. })
    }

    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        match self {
            TypeDescriptor::Array { element } => element.as_deref(),
            _ => None,
        }
    }

    /// Innermost generated class this descriptor refers to, looking through arrays.
    pub fn referenced_class(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Object { class_name } => Some(class_name.as_str()),
            TypeDescriptor::Array { element: Some(el) } => el.referenced_class(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldEntry {
    pub original_key: String,    // JSON key, kept for (de)serialization
    pub identifier_name: String, // Dart member name
    pub descriptor: TypeDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassModel {
    pub class_name: String,
    #[serde(skip)]
    pub source_text: String,
    pub auxiliary_imports: Option<String>,
    pub fields: Vec<FieldEntry>,
}
