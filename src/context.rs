//! Generation settings for one run.
//!
//! A `GenerationContext` is built once (defaults, then an optional JSON config
//! file, then CLI flags) and only read afterwards.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GenerationContext {
    /// spaces per nesting level
    pub indent_width: usize,
    /// wrap each `fromJson` assignment in a runtime shape check
    pub should_check_type: bool,
    /// type used for fields only ever observed as `null`
    pub null_value_data_type: String,
    /// append `?` to field and parameter types
    pub null_safety: bool,
    pub include_copy_with: bool,
    pub include_from_list: bool,
    /// union object fields across array elements instead of reading the first one
    pub merge_array_approach: bool,
    /// accept any `num` at runtime and convert to `int`/`double`
    pub use_num: bool,
    /// package name used to import sibling classes, e.g. `my_app/models`
    pub package_import: Option<String>,
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self {
            indent_width: 2,
            should_check_type: false,
            null_value_data_type: "dynamic".to_string(),
            null_safety: true,
            include_copy_with: false,
            include_from_list: false,
            merge_array_approach: true,
            use_num: false,
            package_import: None,
        }
    }
}

impl GenerationContext {
    pub fn indent(&self, depth: usize) -> String {
        " ".repeat(self.indent_width * depth)
    }

    /// Nullability marker for emitted types.
    pub fn handler_symbol(&self) -> &'static str {
        if self.null_safety { "?" } else { "" }
    }

    /// Render a field/parameter type, `dynamic` never gets a marker.
    pub fn format_type(&self, type_name: &str) -> String {
        if type_name == "dynamic" {
            return type_name.to_string();
        }
        format!("{type_name}{}", self.handler_symbol())
    }

    pub fn from_json_str(src: &str) -> Result<Self, Error> {
        let de = &mut serde_json::Deserializer::from_str(src);
        serde_path_to_error::deserialize::<_, Self>(de).map_err(|err| Error::Config {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let src = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&src)
    }
}
